//! The agent entity.

use std::collections::BTreeSet;

use gs_core::{AgentId, BehaviorKind, Cell, SearchStrategy};

/// Oldest path entries are dropped past this length so unlimited runs stay
/// bounded in memory.
pub const PATH_HISTORY_LIMIT: usize = 1_000;

// ── Memory ────────────────────────────────────────────────────────────────────

/// Per-agent private memory.  Which parts are used depends on the kind.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct AgentMemory {
    /// Cells the agent has stood on (explorer behaviour).
    pub visited: BTreeSet<Cell>,
    /// Claims seen from peers on the last tick this agent decided
    /// (cooperative behaviour).
    pub inbox: Vec<Cell>,
    /// Validated sandbox program (custom behaviour).
    pub code: Option<String>,
}

// ── Stats ─────────────────────────────────────────────────────────────────────

/// Running analytics counters.  Never read by decision logic.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct AgentStats {
    pub food_collected:      u32,
    pub collisions:          u32,
    pub obstacles_destroyed: u32,
    pub energy_consumed:     f64,
    pub energy_gained:       f64,
}

// ── Agent ─────────────────────────────────────────────────────────────────────

/// One agent.  Created by the engine from an [`AgentSpec`][crate::AgentSpec].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Agent {
    pub id:            AgentId,
    pub pos:           Cell,
    /// Inert at `<= 0`.  Never exceeds the engine's configured cap.
    pub energy:        f64,
    pub color:         String,
    pub kind:          BehaviorKind,
    /// Search used by planning kinds.
    pub strategy:      SearchStrategy,
    /// Manhattan bound on perceived food and obstacles.
    pub vision_radius: u32,
    /// Successful moves so far.
    pub steps:         u64,
    /// Positions in order, starting with the spawn cell.
    pub path:          Vec<Cell>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub memory:        AgentMemory,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stats:         AgentStats,
}

impl Agent {
    /// Dead agents are skipped by the step loop but stay in the world.
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.energy > 0.0
    }

    /// Cells within vision, by Manhattan distance.
    #[inline]
    pub fn sees(&self, cell: Cell) -> bool {
        self.pos.manhattan(cell) <= self.vision_radius
    }

    /// Deduct `cost` and record it as consumed.
    pub fn spend(&mut self, cost: f64) {
        self.energy -= cost;
        self.stats.energy_consumed += cost;
    }

    /// Add `amount`, capped at `max`.  Returns what was actually gained.
    pub fn gain(&mut self, amount: f64, max: f64) -> f64 {
        let before = self.energy;
        self.energy = (self.energy + amount).min(max);
        let gained = (self.energy - before).max(0.0);
        self.stats.energy_gained += gained;
        gained
    }

    /// Advance onto `cell` and record the step.
    pub fn move_to(&mut self, cell: Cell) {
        self.pos = cell;
        self.steps += 1;
        self.push_path(cell);
    }

    /// Teleport without counting a step (administrative moves).
    pub fn place_at(&mut self, cell: Cell) {
        self.pos = cell;
        self.push_path(cell);
    }

    fn push_path(&mut self, cell: Cell) {
        if self.path.len() >= PATH_HISTORY_LIMIT {
            self.path.remove(0);
        }
        self.path.push(cell);
    }
}
