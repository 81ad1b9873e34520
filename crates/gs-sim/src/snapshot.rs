//! Serializable world state: emitted after every command and tick, and
//! accepted back by `load_state`.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::info;

use gs_agent::Agent;
use gs_behavior::BehaviorModel;
use gs_core::{BehaviorKind, GridDims};
use gs_world::{Food, Obstacle, World};

use crate::{Sim, SimConfig, SimError, SimResult, VisitMap};

/// The client-facing slice of [`SimConfig`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigView {
    pub max_steps:     u64,
    pub is_unlimited:  bool,
    pub stop_on_food:  bool,
    /// Milliseconds between timer-driven ticks.
    pub tick_interval: u64,
}

impl From<&SimConfig> for ConfigView {
    fn from(c: &SimConfig) -> Self {
        Self {
            max_steps:     c.max_steps,
            is_unlimited:  c.unlimited,
            stop_on_food:  c.stop_on_no_food,
            tick_interval: c.tick_interval_ms,
        }
    }
}

impl ConfigView {
    fn apply_to(&self, c: &mut SimConfig) {
        c.max_steps = self.max_steps;
        c.unlimited = self.is_unlimited;
        c.stop_on_no_food = self.stop_on_food;
        if self.tick_interval > 0 {
            c.tick_interval_ms = self.tick_interval;
        }
    }
}

/// Full world state.  Self-contained: agents carry their own code and
/// memory, so a snapshot rebuilds a world without outside lookups.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldSnapshot {
    pub step:       u64,
    pub width:      i32,
    pub height:     i32,
    pub is_running: bool,
    pub agents:     Vec<Agent>,
    pub food:       Vec<Food>,
    pub obstacles:  Vec<Obstacle>,
    pub config:     ConfigView,
    /// Latest accepted program per agent kind.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub agent_code: BTreeMap<BehaviorKind, String>,
}

impl WorldSnapshot {
    pub fn to_json(&self) -> SimResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(src: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(src)?)
    }
}

impl<B: BehaviorModel> Sim<B> {
    /// Current state as a snapshot.
    pub fn snapshot(&self) -> WorldSnapshot {
        let dims = self.world.dims();
        WorldSnapshot {
            step:       self.tick.0,
            width:      dims.width(),
            height:     dims.height(),
            is_running: self.running,
            agents:     self.world.agents.as_slice().to_vec(),
            food:       self.world.food().to_vec(),
            obstacles:  self.world.obstacles().to_vec(),
            config:     ConfigView::from(&self.config),
            agent_code: self.code_by_kind.clone(),
        }
    }

    /// Snapshot for persistence.  The run flag is cleared so a loaded world
    /// starts paused.
    pub fn export_state(&self) -> WorldSnapshot {
        WorldSnapshot { is_running: false, ..self.snapshot() }
    }

    /// Replace the whole world with `snap`.
    ///
    /// All-or-nothing: on error the current world is untouched.  Every
    /// program the snapshot carries must pass the runner's checks, ids must
    /// be unique and energy is capped at the configured maximum.  Agent RNG
    /// streams restart from the configured seed.
    pub fn load_state(&mut self, snap: WorldSnapshot) -> SimResult<()> {
        let dims = GridDims::new(snap.width, snap.height)?;
        self.check_programs(&snap)?;

        let max_energy = self.config.energy.max_energy;
        let mut world = World::new(dims);
        let mut visits = VisitMap::new(dims);
        for mut agent in snap.agents {
            agent.energy = agent.energy.min(max_energy);
            visits.record(agent.pos);
            world.restore_agent(agent)?;
        }
        for food in snap.food {
            world.restore_food(food)?;
        }
        for obstacle in snap.obstacles {
            world.restore_obstacle(obstacle)?;
        }

        self.world = world;
        self.clear_run_state();
        self.visits = visits;
        self.tick.0 = snap.step;
        snap.config.apply_to(&mut self.config);
        self.code_by_kind = snap.agent_code;
        info!(
            %dims,
            step   = snap.step,
            agents = self.world.agents.len(),
            "World state loaded"
        );
        Ok(())
    }

    fn check_programs(&self, snap: &WorldSnapshot) -> SimResult<()> {
        let stored = snap.agent_code.iter().map(|(&kind, code)| (kind, code.as_str()));
        let carried = snap
            .agents
            .iter()
            .filter_map(|a| a.memory.code.as_deref().map(|code| (a.kind, code)));

        let mut checked = BTreeSet::new();
        for (kind, code) in stored.chain(carried) {
            if !checked.insert(code) {
                continue;
            }
            if let Err(err) = self.runner.validate(code) {
                return Err(SimError::RejectedCode { kind, message: err.to_string() });
            }
        }
        Ok(())
    }
}
