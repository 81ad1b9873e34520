//! Plain data row types written by output backends.

use gs_core::Tick;
use gs_sim::TickReport;
use gs_world::World;

/// One agent's state at a snapshot tick.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentTickRow {
    pub tick:           u64,
    pub agent_id:       u32,
    pub kind:           &'static str,
    pub x:              i32,
    pub y:              i32,
    pub energy:         f64,
    pub alive:          bool,
    pub steps:          u64,
    pub food_collected: u32,
    pub collisions:     u32,
    /// Distinct cells in the agent's path history.
    pub cells_visited:  usize,
}

impl AgentTickRow {
    /// One row per agent, in acting order.
    pub fn from_world(tick: Tick, world: &World) -> Vec<AgentTickRow> {
        world
            .agents
            .iter()
            .map(|a| {
                let mut cells = a.path.clone();
                cells.sort_unstable();
                cells.dedup();
                AgentTickRow {
                    tick:           tick.0,
                    agent_id:       a.id.0,
                    kind:           a.kind.as_str(),
                    x:              a.pos.x,
                    y:              a.pos.y,
                    energy:         a.energy,
                    alive:          a.is_alive(),
                    steps:          a.steps,
                    food_collected: a.stats.food_collected,
                    collisions:     a.stats.collisions,
                    cells_visited:  cells.len(),
                }
            })
            .collect()
    }
}

/// Counters for one completed tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:                u64,
    pub decided:             usize,
    pub moves:               usize,
    pub collisions:          usize,
    pub obstacles_destroyed: usize,
    pub food_eaten:          usize,
    pub dynamic_moved:       usize,
    /// Stop reason if the tick paused the run, else empty.
    pub halted:              &'static str,
}

impl From<&TickReport> for TickSummaryRow {
    fn from(r: &TickReport) -> Self {
        Self {
            tick:                r.tick.0,
            decided:             r.decided,
            moves:               r.moves,
            collisions:          r.collisions,
            obstacles_destroyed: r.obstacles_destroyed,
            food_eaten:          r.food_eaten,
            dynamic_moved:       r.dynamic_moved,
            halted:              r.halted.map_or("", |s| s.as_str()),
        }
    }
}
