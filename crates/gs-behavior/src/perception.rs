//! The bounded view of the world handed to untrusted code.

use gs_agent::Agent;
use gs_core::Cell;
use gs_world::World;

/// Everything a custom agent's code may read.  Plain data, no references
/// back into the engine.
#[derive(Clone, Debug, PartialEq)]
pub struct Perception {
    pub position:      Cell,
    pub energy:        f64,
    pub width:         i32,
    pub height:        i32,
    pub vision_radius: u32,
    /// Food cells within vision, in placement order.
    pub food:          Vec<Cell>,
    /// Obstacle cells within vision, in placement order.
    pub obstacles:     Vec<Cell>,
}

impl Perception {
    /// Build the perception of `agent` from a world snapshot.
    pub fn of(agent: &Agent, world: &World) -> Self {
        let dims = world.dims();
        Perception {
            position:      agent.pos,
            energy:        agent.energy,
            width:         dims.width(),
            height:        dims.height(),
            vision_radius: agent.vision_radius,
            food:          world.visible_food(agent.pos, agent.vision_radius).iter().map(|f| f.pos).collect(),
            obstacles:     world.visible_obstacles(agent.pos, agent.vision_radius).iter().map(|o| o.pos).collect(),
        }
    }
}
