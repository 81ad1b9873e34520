//! Engine configuration.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::lenient::{self, field};
use crate::{SimError, SimResult};

/// Tick interval at speed 1×, in milliseconds.
pub const BASE_TICK_INTERVAL_MS: u64 = 500;

// ── EnergyConfig ──────────────────────────────────────────────────────────────

/// Energy economics of movement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyConfig {
    /// Paid for every successful step.
    pub move_cost:      f64,
    /// Paid when a move is rejected by a wall or agent.
    pub collision_cost: f64,
    /// Eating never raises energy above this.
    pub max_energy:     f64,
    /// Energy of agents placed without an explicit value.
    pub initial_energy: f64,
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            move_cost:      0.5,
            collision_cost: 0.1,
            max_energy:     150.0,
            initial_energy: 100.0,
        }
    }
}

// ── PlacementDefaults ─────────────────────────────────────────────────────────

/// Values used by placement commands that do not carry their own.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementDefaults {
    pub food_value:       f64,
    pub destruction_cost: f64,
    pub vision_radius:    u32,
}

impl Default for PlacementDefaults {
    fn default() -> Self {
        Self {
            food_value:       gs_world::DEFAULT_FOOD_VALUE,
            destruction_cost: gs_world::DEFAULT_DESTRUCTION_COST,
            vision_radius:    gs_agent::DEFAULT_VISION_RADIUS,
        }
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Global engine configuration.  Survives `reset` and `resize`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Step budget; ignored when `unlimited`.
    pub max_steps:             u64,
    pub unlimited:             bool,
    /// Halt once every food item is eaten (with at least one agent present).
    pub stop_on_no_food:       bool,
    /// Wall-clock time between timer-driven ticks.
    pub tick_interval_ms:      u64,
    /// Master RNG seed.  The same seed and command sequence reproduce a run.
    pub seed:                  u64,
    /// Observer `on_snapshot` cadence.  0 disables snapshots.
    pub output_interval_ticks: u64,
    pub energy:                EnergyConfig,
    pub defaults:              PlacementDefaults,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_steps:             100,
            unlimited:             false,
            stop_on_no_food:       true,
            tick_interval_ms:      BASE_TICK_INTERVAL_MS,
            seed:                  42,
            output_interval_ticks: 1,
            energy:                EnergyConfig::default(),
            defaults:              PlacementDefaults::default(),
        }
    }
}

impl SimConfig {
    /// Parse a TOML document; missing keys take their defaults.
    pub fn from_toml_str(src: &str) -> SimResult<Self> {
        let cfg: SimConfig = toml::from_str(src).map_err(|e| SimError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> SimResult<()> {
        let e = &self.energy;
        if !(e.max_energy > 0.0) {
            return Err(SimError::Config(format!("max_energy must be positive, got {}", e.max_energy)));
        }
        if !(e.move_cost >= 0.0 && e.collision_cost >= 0.0) {
            return Err(SimError::Config("movement costs must be non-negative".to_owned()));
        }
        if !(self.defaults.food_value >= 0.0 && self.defaults.destruction_cost >= 0.0) {
            return Err(SimError::Config("placement defaults must be non-negative".to_owned()));
        }
        if self.tick_interval_ms == 0 {
            return Err(SimError::Config("tick_interval_ms must be at least 1".to_owned()));
        }
        Ok(())
    }

    /// Tick interval for a speed multiplier; `None` unless `speed > 0`.
    pub fn interval_for_speed(speed: f64) -> Option<u64> {
        (speed.is_finite() && speed > 0.0)
            .then(|| ((BASE_TICK_INTERVAL_MS as f64 / speed).round() as u64).max(1))
    }

    /// Apply a loose JSON patch from a client.
    ///
    /// Each recognised key is parsed on its own.  A malformed value is
    /// logged and skipped and the prior value stays.  Returns the keys that
    /// were skipped.
    pub fn apply_patch(&mut self, patch: &Value) -> Vec<String> {
        let mut skipped = Vec::new();
        if !patch.is_object() {
            warn!(%patch, "Config patch is not an object; ignored");
            skipped.push("<patch>".to_owned());
            return skipped;
        }

        let mut take = |keys: &[&'static str], apply: &mut dyn FnMut(&Value) -> bool| {
            if let Some((key, value)) = field(patch, keys) {
                if !apply(value) {
                    warn!(key, %value, "Skipping malformed config value");
                    skipped.push(key.to_owned());
                }
            }
        };

        take(&["maxSteps", "max_steps"], &mut |v| {
            lenient::as_u64(v).map(|n| self.max_steps = n).is_some()
        });
        take(&["isUnlimited", "unlimited", "is_unlimited"], &mut |v| {
            lenient::as_bool(v).map(|b| self.unlimited = b).is_some()
        });
        take(&["stopOnFood", "stop_on_food", "stop_on_no_food"], &mut |v| {
            lenient::as_bool(v).map(|b| self.stop_on_no_food = b).is_some()
        });
        take(&["tickInterval", "tick_interval_ms"], &mut |v| {
            lenient::as_u64(v).filter(|&ms| ms > 0).map(|ms| self.tick_interval_ms = ms).is_some()
        });
        take(&["speed"], &mut |v| {
            lenient::as_f64(v)
                .and_then(SimConfig::interval_for_speed)
                .map(|ms| self.tick_interval_ms = ms)
                .is_some()
        });
        take(&["seed"], &mut |v| lenient::as_u64(v).map(|n| self.seed = n).is_some());
        take(&["outputInterval", "output_interval_ticks"], &mut |v| {
            lenient::as_u64(v).map(|n| self.output_interval_ticks = n).is_some()
        });

        skipped
    }
}
