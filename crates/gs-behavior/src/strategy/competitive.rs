//! Competitive: race rivals to the food worth the most.
//!
//! For each visible food the agent wins the race iff it is strictly closer
//! than every other live agent.  Candidates are scored
//!
//! ```text
//! score = value / (1 + my_distance)   × 2   if the agent wins
//!                                     × 0.5 if a rival is strictly closer
//! ```
//!
//! and the best one (earliest on ties) is approached with A*.  With nothing
//! visible the agent takes a uniformly random orthogonal step.

use gs_agent::Agent;
use gs_core::{AgentRng, Cell, Direction, SearchStrategy};

use super::step_toward;
use crate::{BehaviorResult, Intent, TickContext};

pub fn decide(agent: &Agent, ctx: &TickContext<'_>, rng: &mut AgentRng) -> BehaviorResult<Vec<Intent>> {
    let world = ctx.world;
    let rivals: Vec<Cell> = world
        .agents
        .iter()
        .filter(|a| a.id != agent.id && a.is_alive())
        .map(|a| a.pos)
        .collect();

    let mut best: Option<(f64, Cell)> = None;
    for food in world.visible_food(agent.pos, agent.vision_radius) {
        let mine = agent.pos.manhattan(food.pos);
        let theirs = rivals.iter().map(|r| r.manhattan(food.pos)).min().unwrap_or(u32::MAX);
        let score = race_score(food.value, mine, theirs);
        if best.is_none_or(|(top, _)| score > top) {
            best = Some((score, food.pos));
        }
    }

    match best {
        Some((_, target)) => Ok(step_toward(agent, world, target, SearchStrategy::AStar)),
        None => {
            let dir = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
            Ok(vec![Intent::Move(dir.delta())])
        }
    }
}

pub(crate) fn race_score(value: f64, mine: u32, theirs: u32) -> f64 {
    let base = value / (1.0 + f64::from(mine));
    if mine < theirs {
        base * 2.0
    } else if theirs < mine {
        base * 0.5
    } else {
        base
    }
}
