//! Q-learning placeholder.
//!
//! No table schema, learning rate, or reward signal is defined yet, so this
//! kind acts exactly like [`reactive`](super::reactive) and keeps no state.

use gs_agent::Agent;
use gs_core::AgentRng;

use super::reactive;
use crate::{BehaviorResult, Intent, TickContext};

pub fn decide(agent: &Agent, ctx: &TickContext<'_>, rng: &mut AgentRng) -> BehaviorResult<Vec<Intent>> {
    reactive::decide(agent, ctx, rng)
}
