//! Fluent builder for one agent.
//!
//! # Usage
//!
//! ```rust
//! use gs_agent::{AgentSpec, AgentStore};
//! use gs_core::{BehaviorKind, Cell, SearchStrategy};
//!
//! let mut store = AgentStore::new();
//! let id = store.insert(
//!     AgentSpec::new(BehaviorKind::Collector, Cell::new(0, 1))
//!         .strategy(SearchStrategy::AStar)
//!         .energy(80.0),
//! );
//! assert_eq!(store.get(id).unwrap().energy, 80.0);
//! ```

use std::collections::BTreeSet;

use gs_core::{AgentId, BehaviorKind, Cell, SearchStrategy};

use crate::{Agent, AgentMemory, AgentStats};

/// Starting energy when a spec does not override it.
pub const DEFAULT_ENERGY: f64 = 100.0;
/// Vision radius when a spec does not override it.
pub const DEFAULT_VISION_RADIUS: u32 = 10;

/// Everything needed to create an agent except its id, which the store
/// allocates.
#[derive(Clone, Debug)]
pub struct AgentSpec {
    kind:          BehaviorKind,
    pos:           Cell,
    strategy:      SearchStrategy,
    energy:        f64,
    color:         Option<String>,
    vision_radius: u32,
    code:          Option<String>,
}

impl AgentSpec {
    pub fn new(kind: BehaviorKind, pos: Cell) -> Self {
        Self {
            kind,
            pos,
            strategy:      SearchStrategy::default(),
            energy:        DEFAULT_ENERGY,
            color:         None,
            vision_radius: DEFAULT_VISION_RADIUS,
            code:          None,
        }
    }

    pub fn strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn energy(mut self, energy: f64) -> Self {
        self.energy = energy;
        self
    }

    /// Display colour.  Defaults to the kind's colour.
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn vision_radius(mut self, radius: u32) -> Self {
        self.vision_radius = radius;
        self
    }

    /// Sandbox program.  Must already be validated; only meaningful for
    /// custom agents.
    pub fn code(mut self, code: Option<String>) -> Self {
        self.code = code;
        self
    }

    #[inline]
    pub fn pos(&self) -> Cell {
        self.pos
    }

    #[inline]
    pub fn kind(&self) -> BehaviorKind {
        self.kind
    }

    pub(crate) fn build(self, id: AgentId) -> Agent {
        Agent {
            id,
            pos:           self.pos,
            energy:        self.energy,
            color:         self.color.unwrap_or_else(|| self.kind.default_color().to_owned()),
            kind:          self.kind,
            strategy:      self.strategy,
            vision_radius: self.vision_radius,
            steps:         0,
            path:          vec![self.pos],
            memory:        AgentMemory {
                visited: BTreeSet::new(),
                inbox:   Vec::new(),
                code:    self.code,
            },
            stats:         AgentStats::default(),
        }
    }
}
