//! Cooperative: non-overlapping foraging through tick-scoped claims.
//!
//! Reads the claims made by agents earlier in this tick's pass, picks the
//! nearest visible food nobody else has claimed, claims it, and paths to it
//! with A*.  With nothing unclaimed in range it explores.

use gs_agent::Agent;
use gs_core::{AgentRng, SearchStrategy};

use super::{explorer, food_by_distance, step_toward};
use crate::{BehaviorResult, Intent, TickContext};

pub fn decide(agent: &Agent, ctx: &TickContext<'_>, rng: &mut AgentRng) -> BehaviorResult<Vec<Intent>> {
    let mut intents = vec![Intent::Inbox(ctx.claims.cells_claimed_by_others(agent.id))];

    let target = food_by_distance(agent, ctx.world)
        .into_iter()
        .find(|f| !ctx.claims.is_claimed_by_other(f.pos, agent.id));

    match target {
        Some(food) => {
            intents.push(Intent::Claim(food.pos));
            intents.extend(step_toward(agent, ctx.world, food.pos, SearchStrategy::AStar));
        }
        None => intents.extend(explorer::decide(agent, ctx, rng)?),
    }
    Ok(intents)
}
