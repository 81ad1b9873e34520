//! Reactive: memoryless greedy forager.
//!
//! 1. Food orthogonally adjacent and within vision → step onto it
//!    (N, E, S, W priority).
//! 2. Food within vision → greedy step: close the larger axis gap first,
//!    fall back to the other axis if that cell is blocked.
//! 3. Otherwise → uniformly random unblocked neighbour.

use gs_agent::Agent;
use gs_core::{AgentRng, Delta, Direction};
use gs_world::World;

use super::{nearest_food, random_open_step};
use crate::{BehaviorResult, Intent, TickContext};

pub fn decide(agent: &Agent, ctx: &TickContext<'_>, rng: &mut AgentRng) -> BehaviorResult<Vec<Intent>> {
    let world = ctx.world;

    if let Some(step) = adjacent_food(agent, world) {
        return Ok(vec![Intent::Move(step)]);
    }

    if let Some(food) = nearest_food(agent, world) {
        let gap = agent.pos.delta_to(food.pos);
        if let Some(step) = greedy_candidates(gap).into_iter().find(|&d| can_enter(agent, world, d)) {
            return Ok(vec![Intent::Move(step)]);
        }
    }

    Ok(random_open_step(agent, world, rng))
}

fn adjacent_food(agent: &Agent, world: &World) -> Option<Delta> {
    // A zero radius sees only the agent's own cell.
    if agent.vision_radius == 0 {
        return None;
    }
    Direction::ALL
        .iter()
        .map(|d| d.delta())
        .find(|&d| world.food_at(agent.pos.offset(d)).is_some())
}

/// Single-axis steps that reduce `gap`, larger axis first (x on ties).
fn greedy_candidates(gap: Delta) -> Vec<Delta> {
    let horizontal = Delta::new(gap.dx.signum(), 0);
    let vertical = Delta::new(0, gap.dy.signum());
    let ordered = if gap.dy.abs() > gap.dx.abs() {
        [vertical, horizontal]
    } else {
        [horizontal, vertical]
    };
    ordered.into_iter().filter(|d| !d.is_zero()).collect()
}

fn can_enter(agent: &Agent, world: &World, step: Delta) -> bool {
    let to = agent.pos.offset(step);
    world.contains(to) && !world.is_blocked(to)
}
