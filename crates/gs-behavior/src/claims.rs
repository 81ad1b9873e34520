//! Tick-scoped claim log for cooperative foraging.
//!
//! # Visibility
//!
//! The log is cleared at the start of every tick and only appended to during
//! that tick's sequential agent pass.  Visibility is therefore directional:
//! an agent sees claims from agents *earlier* in insertion order, never from
//! agents after it, and never from a previous tick.

use gs_core::{AgentId, Cell};

/// One broadcast claim.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Claim {
    pub agent: AgentId,
    pub cell:  Cell,
}

#[derive(Clone, Debug, Default)]
pub struct ClaimLog {
    entries: Vec<Claim>,
}

impl ClaimLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget every claim.  Called once at tick start.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn push(&mut self, agent: AgentId, cell: Cell) {
        self.entries.push(Claim { agent, cell });
    }

    /// `true` if an agent other than `me` has claimed `cell`.
    pub fn is_claimed_by_other(&self, cell: Cell, me: AgentId) -> bool {
        self.entries.iter().any(|c| c.cell == cell && c.agent != me)
    }

    /// Cells claimed by agents other than `me`, in claim order.
    pub fn cells_claimed_by_others(&self, me: AgentId) -> Vec<Cell> {
        self.entries.iter().filter(|c| c.agent != me).map(|c| c.cell).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Claim> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
