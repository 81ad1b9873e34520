//! Collector: plans to the nearest visible food with the agent's own search
//! strategy.  Food in range but unreachable means no move; no food in range
//! means exploring.

use gs_agent::Agent;
use gs_core::AgentRng;

use super::{explorer, nearest_food, step_toward};
use crate::{BehaviorResult, Intent, TickContext};

pub fn decide(agent: &Agent, ctx: &TickContext<'_>, rng: &mut AgentRng) -> BehaviorResult<Vec<Intent>> {
    match nearest_food(agent, ctx.world) {
        Some(food) => Ok(step_toward(agent, ctx.world, food.pos, agent.strategy)),
        None => explorer::decide(agent, ctx, rng),
    }
}
