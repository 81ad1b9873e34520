//! One decision function per [`BehaviorKind`](gs_core::BehaviorKind).
//!
//! Every function has the shape
//! `fn decide(&Agent, &TickContext, &mut AgentRng) -> BehaviorResult<Vec<Intent>>`
//! and reads only the snapshot in the context.
//!
//! | Kind          | Food visible                          | Nothing visible          |
//! |---------------|---------------------------------------|--------------------------|
//! | reactive      | greedy step toward nearest            | random unblocked step    |
//! | explorer      | (ignores food)                        | prefer unvisited cells   |
//! | collector     | path to nearest (agent's search)      | explorer                 |
//! | cooperative   | claim nearest unclaimed, A* to it     | explorer                 |
//! | competitive   | A* to best-scoring race               | random orthogonal step   |
//! | q_learning    | reactive                              | reactive                 |
//! | custom        | sandboxed user code                   | sandboxed user code      |

pub mod collector;
pub mod competitive;
pub mod cooperative;
pub mod custom;
pub mod explorer;
pub mod q_learning;
pub mod reactive;

use gs_agent::Agent;
use gs_core::{AgentRng, Cell, Delta, Direction, SearchStrategy};
use gs_spatial::{finder_for, next_step};
use gs_world::{Food, World};

use crate::Intent;

/// Visible food ordered by Manhattan distance; ties keep placement order.
pub(crate) fn food_by_distance<'w>(agent: &Agent, world: &'w World) -> Vec<&'w Food> {
    let mut seen = world.visible_food(agent.pos, agent.vision_radius);
    // Stable sort keeps placement order among equals.
    seen.sort_by_key(|f| agent.pos.manhattan(f.pos));
    seen
}

/// Nearest visible food.
pub(crate) fn nearest_food<'w>(agent: &Agent, world: &'w World) -> Option<&'w Food> {
    food_by_distance(agent, world).into_iter().next()
}

/// In-bounds neighbours that are not blocked, as deltas in N, E, S, W order.
pub(crate) fn open_steps(agent: &Agent, world: &World) -> Vec<Delta> {
    Direction::ALL
        .iter()
        .map(|d| d.delta())
        .filter(|&d| {
            let to = agent.pos.offset(d);
            world.contains(to) && !world.is_blocked(to)
        })
        .collect()
}

/// A uniformly random unblocked neighbour, or nothing if boxed in.
pub(crate) fn random_open_step(agent: &Agent, world: &World, rng: &mut AgentRng) -> Vec<Intent> {
    let steps = open_steps(agent, world);
    rng.choose(&steps).map(|&d| vec![Intent::Move(d)]).unwrap_or_default()
}

/// First step of a `strategy` search toward `goal`; empty if unreachable.
pub(crate) fn step_toward(agent: &Agent, world: &World, goal: Cell, strategy: SearchStrategy) -> Vec<Intent> {
    let step = next_step(finder_for(strategy), &world.graph(), agent.pos, goal);
    if step.is_zero() {
        Vec::new()
    } else {
        vec![Intent::Move(step)]
    }
}
