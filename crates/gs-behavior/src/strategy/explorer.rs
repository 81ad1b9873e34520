//! Explorer: coverage over foraging.
//!
//! Remembers every cell it decides on, prefers unblocked neighbours it has
//! not visited (random among them), and falls back to any unblocked
//! neighbour once everything nearby is visited.  There is no backtracking,
//! so it can loop in enclosed areas.

use gs_agent::Agent;
use gs_core::{AgentRng, Delta};

use super::open_steps;
use crate::{BehaviorResult, Intent, TickContext};

pub fn decide(agent: &Agent, ctx: &TickContext<'_>, rng: &mut AgentRng) -> BehaviorResult<Vec<Intent>> {
    let mut intents = vec![Intent::Remember(agent.pos)];

    let open = open_steps(agent, ctx.world);
    let fresh: Vec<Delta> = open
        .iter()
        .copied()
        .filter(|&d| !agent.memory.visited.contains(&agent.pos.offset(d)))
        .collect();

    let pool = if fresh.is_empty() { &open } else { &fresh };
    if let Some(&step) = rng.choose(pool) {
        intents.push(Intent::Move(step));
    }
    Ok(intents)
}
