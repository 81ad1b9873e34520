//! Agent storage: `AgentStore` (entities) and `AgentRngs` (per-agent RNG).
//!
//! # Why two structs?
//!
//! The step loop needs `&mut AgentRng` for the deciding agent while decision
//! logic reads a snapshot that contains every agent.  Keeping RNG state out
//! of [`Agent`] means snapshots never clone RNGs and the borrow of one
//! agent's stream never conflicts with reads of the world:
//!
//! ```ignore
//! // gs-sim step loop (simplified):
//! let snapshot = world.clone();
//! for id in world.agents.ids() {
//!     let rng = rngs.get_mut(id);
//!     let intents = decide(&snapshot.agents[id], &ctx, rng);
//!     ...
//! }
//! ```

use rustc_hash::FxHashMap;

use gs_core::{AgentId, AgentRng, Cell};

use crate::{Agent, AgentSpec};

// ── AgentRngs ─────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG state, keyed by id and seeded lazily on first
/// use from the run seed.
#[derive(Clone, Debug)]
pub struct AgentRngs {
    seed:  u64,
    inner: FxHashMap<AgentId, AgentRng>,
}

impl AgentRngs {
    pub fn new(global_seed: u64) -> Self {
        Self { seed: global_seed, inner: FxHashMap::default() }
    }

    /// Mutable reference to one agent's RNG, creating it on first use.
    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> &mut AgentRng {
        let seed = self.seed;
        self.inner.entry(agent).or_insert_with(|| AgentRng::new(seed, agent))
    }

    /// Forget an agent's stream (on removal).
    pub fn remove(&mut self, agent: AgentId) {
        self.inner.remove(&agent);
    }

    /// Drop every stream and adopt a new seed.
    pub fn reseed(&mut self, global_seed: u64) {
        self.seed = global_seed;
        self.inner.clear();
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── AgentStore ────────────────────────────────────────────────────────────────

/// Every agent in insertion order, plus the id counter.
///
/// Insertion order is the deterministic order in which the engine lets
/// agents act, so removal preserves the relative order of the rest.
#[derive(Clone, Debug, Default)]
pub struct AgentStore {
    agents:  Vec<Agent>,
    next_id: AgentId,
}

impl AgentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an id and append the agent.  Placement rules (occupancy,
    /// bounds) are the caller's job.
    pub fn insert(&mut self, spec: AgentSpec) -> AgentId {
        let id = self.next_id;
        self.next_id = id.next();
        self.agents.push(spec.build(id));
        id
    }

    /// Re-insert a fully formed agent (snapshot load), keeping its id and
    /// advancing the counter past it.
    pub fn restore(&mut self, agent: Agent) {
        if agent.id >= self.next_id {
            self.next_id = agent.id.next();
        }
        self.agents.push(agent);
    }

    pub fn remove(&mut self, id: AgentId) -> Option<Agent> {
        let idx = self.position(id)?;
        Some(self.agents.remove(idx))
    }

    /// Remove every agent and restart the id counter.
    pub fn clear(&mut self) {
        self.agents.clear();
        self.next_id = AgentId::FIRST;
    }

    #[inline]
    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == id)
    }

    #[inline]
    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.iter_mut().find(|a| a.id == id)
    }

    /// The agent standing on `cell`, if any.
    pub fn at(&self, cell: Cell) -> Option<&Agent> {
        self.agents.iter().find(|a| a.pos == cell)
    }

    /// Ids in insertion order.  Collected so callers can mutate while
    /// iterating.
    pub fn ids(&self) -> Vec<AgentId> {
        self.agents.iter().map(|a| a.id).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Agent> {
        self.agents.iter_mut()
    }

    pub fn as_slice(&self) -> &[Agent] {
        &self.agents
    }

    pub fn alive_count(&self) -> usize {
        self.agents.iter().filter(|a| a.is_alive()).count()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    fn position(&self, id: AgentId) -> Option<usize> {
        self.agents.iter().position(|a| a.id == id)
    }
}
