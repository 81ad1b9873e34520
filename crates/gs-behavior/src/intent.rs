//! Agent intents — what an agent asks the engine to do this tick.

use gs_core::{Cell, Delta};

/// An action that an agent wants to perform during the current tick.
///
/// Intents are produced by [`BehaviorModel::replan`][crate::BehaviorModel::replan]
/// and applied by the engine in the order returned.  Only the first `Move`
/// is honoured; later ones are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Step by `delta`.  The engine clamps each component into `{-1, 0, 1}`
    /// and the target into bounds before resolving collisions.
    Move(Delta),

    /// Add `cell` to the agent's visited memory.
    Remember(Cell),

    /// Broadcast a claim on a target cell for the rest of this tick.
    Claim(Cell),

    /// Replace the agent's inbox with the claims it saw this tick.
    Inbox(Vec<Cell>),
}

impl Intent {
    /// The requested move of an intent list, if any.
    pub fn first_move(intents: &[Intent]) -> Option<Delta> {
        intents.iter().find_map(|i| match i {
            Intent::Move(d) => Some(*d),
            _ => None,
        })
    }
}
