//! Movement and interaction resolution against the live world.
//!
//! Applied one agent at a time in insertion order, so an earlier agent can
//! take a contested cell before a later one tries to enter it.

use tracing::debug;

use gs_core::{AgentId, Cell, Delta};
use gs_world::{Food, World};

use crate::EnergyConfig;

/// What happened to one agent's requested move.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MoveOutcome {
    /// Zero delta, or a delta clamped back onto the agent's own cell.  Free.
    Stay,
    Moved { from: Cell, to: Cell },
    /// Wall, agent, or an obstacle the agent cannot afford to destroy.
    Collided { at: Cell },
    /// Obstacle removed; the agent paid `cost` and did not advance.
    Destroyed { at: Cell, cost: f64 },
}

/// Resolve `delta` for agent `id`.
///
/// Each component is clamped to `{-1, 0, 1}` and the target into bounds.
pub fn resolve_move(world: &mut World, id: AgentId, delta: Delta, energy: &EnergyConfig) -> MoveOutcome {
    let Some(from) = world.agents.get(id).map(|a| a.pos) else {
        return MoveOutcome::Stay;
    };
    let delta = delta.clamp_unit();
    if delta.is_zero() {
        return MoveOutcome::Stay;
    }
    let to = world.clamp(from.offset(delta));
    if to == from {
        return MoveOutcome::Stay;
    }

    let obstacle = world.obstacle_at(to).map(|o| (o.destructible, o.destruction_cost));
    let agent_there = world.agents.at(to).is_some();

    let outcome = match obstacle {
        Some((true, cost)) if world.agents.get(id).is_some_and(|a| a.energy > cost) => {
            world.take_obstacle_at(to);
            MoveOutcome::Destroyed { at: to, cost }
        }
        Some(_) => MoveOutcome::Collided { at: to },
        None if agent_there => MoveOutcome::Collided { at: to },
        None => MoveOutcome::Moved { from, to },
    };

    let Some(agent) = world.agents.get_mut(id) else {
        return MoveOutcome::Stay;
    };
    match outcome {
        MoveOutcome::Moved { to, .. } => {
            agent.move_to(to);
            agent.spend(energy.move_cost);
        }
        MoveOutcome::Collided { .. } => {
            agent.spend(energy.collision_cost);
            agent.stats.collisions += 1;
        }
        MoveOutcome::Destroyed { cost, .. } => {
            agent.spend(cost);
            agent.stats.obstacles_destroyed += 1;
        }
        MoveOutcome::Stay => {}
    }
    debug!(agent = %id, ?outcome, "Move resolved");
    outcome
}

/// Eat the food under agent `id`, if any.  Energy is capped at
/// `max_energy`.
pub fn resolve_food(world: &mut World, id: AgentId, max_energy: f64) -> Option<Food> {
    let pos = world.agents.get(id)?.pos;
    let food = world.consume_food_at(pos)?;
    if let Some(agent) = world.agents.get_mut(id) {
        agent.gain(food.value, max_energy);
        agent.stats.food_collected += 1;
    }
    debug!(agent = %id, cell = %pos, value = food.value, "Food eaten");
    Some(food)
}
