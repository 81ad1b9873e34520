//! Command handling.
//!
//! Every command runs between ticks, never during one.  Placement and
//! validation failures are [`Rejection`]s; the world is left as it was.

use serde_json::Value;
use tracing::{debug, info, warn};

use gs_agent::AgentSpec;
use gs_behavior::BehaviorModel;
use gs_core::{BehaviorKind, Cell, GridDims, Mobility, SearchStrategy};
use gs_world::{FoodSpec, ObstacleSpec, PlacementError, Removed};

use crate::command::{
    AddAgentArgs, AddFoodArgs, AddObstacleArgs, BatchMoveArgs, CodeArgs, move_target,
};
use crate::lenient::{self, field};
use crate::{
    Command, CommandOutcome, CommandReply, NoopObserver, Rejection, Sim, SimConfig, SimObserver,
    TickOutcome,
};

impl From<PlacementError> for Rejection {
    fn from(e: PlacementError) -> Self {
        match e {
            PlacementError::OutOfBounds(cell) => Rejection::OutOfBounds { cell },
            PlacementError::Occupied(cell) => Rejection::Occupied { cell },
            dup @ PlacementError::DuplicateId(_) => Rejection::InvalidState { message: dup.to_string() },
        }
    }
}

/// Read one optional config key.  A present but malformed value is logged,
/// recorded in `skipped` and yields `None`.
fn read<T>(
    config:  &Value,
    keys:    &[&'static str],
    parse:   impl FnOnce(&Value) -> Option<T>,
    skipped: &mut Vec<String>,
) -> Option<T> {
    let (key, value) = field(config, keys)?;
    let parsed = parse(value);
    if parsed.is_none() {
        warn!(key, %value, "Skipping malformed placement value");
        skipped.push(key.to_owned());
    }
    parsed
}

impl<B: BehaviorModel> Sim<B> {
    /// Apply `cmd` and return the outcome with the resulting state.
    pub fn apply(&mut self, cmd: Command) -> CommandReply {
        self.apply_with(cmd, &mut NoopObserver)
    }

    /// [`apply`](Self::apply), reporting any tick it triggers to `observer`.
    pub fn apply_with<O: SimObserver + ?Sized>(&mut self, cmd: Command, observer: &mut O) -> CommandReply {
        let outcome = self.execute_with(cmd, observer);
        CommandReply { outcome, state: self.snapshot() }
    }

    /// Apply `cmd` without building a snapshot.
    pub fn execute(&mut self, cmd: Command) -> CommandOutcome {
        self.execute_with(cmd, &mut NoopObserver)
    }

    pub fn execute_with<O: SimObserver + ?Sized>(&mut self, cmd: Command, observer: &mut O) -> CommandOutcome {
        let name = cmd.name();
        let outcome = match cmd {
            Command::Start => {
                self.set_running(true);
                CommandOutcome::Applied
            }
            Command::Stop | Command::Pause => {
                self.set_running(false);
                CommandOutcome::Applied
            }
            Command::Reset => {
                self.reset();
                CommandOutcome::Applied
            }
            Command::Step => match self.step_with(observer) {
                TickOutcome::Advanced(_) => CommandOutcome::Applied,
                TickOutcome::Halted(stop) => CommandOutcome::rejected(Rejection::Halted { stop }),
            },
            Command::SetSpeed(args) => match SimConfig::interval_for_speed(args.speed) {
                Some(ms) => {
                    self.config.tick_interval_ms = ms;
                    info!(speed = args.speed, interval_ms = ms, "Speed changed");
                    CommandOutcome::Applied
                }
                None => {
                    warn!(speed = args.speed, "Ignoring non-positive speed");
                    CommandOutcome::rejected(Rejection::InvalidValue { key: "speed".to_owned() })
                }
            },
            Command::ResizeGrid(args) => match GridDims::new(args.width, args.height) {
                Ok(dims) => {
                    self.resize(dims);
                    CommandOutcome::Applied
                }
                Err(err) => {
                    warn!(%err, "Resize refused");
                    CommandOutcome::rejected(Rejection::InvalidDimensions {
                        width:  args.width,
                        height: args.height,
                    })
                }
            },
            Command::UpdateConfig(patch) => {
                if patch.is_object() {
                    let skipped = self.config.apply_patch(&patch);
                    info!(skipped = skipped.len(), "Configuration updated");
                    CommandOutcome::from_skipped(skipped)
                } else {
                    warn!(%patch, "Config patch is not an object; ignored");
                    CommandOutcome::rejected(Rejection::InvalidValue { key: "config".to_owned() })
                }
            }
            Command::UpdateAgentCode(args) => self.update_code(args),
            Command::AddAgent(args) => self.add_agent(args),
            Command::AddFood(args) => self.add_food(args),
            Command::AddObstacle(args) => self.add_obstacle(args),
            Command::RemoveElement(args) => self.remove_element(args.cell()),
            Command::BatchMove(args) => self.batch_move(args),
            Command::LoadState(snap) => match self.load_state(*snap) {
                Ok(()) => CommandOutcome::Applied,
                Err(err) => {
                    warn!(%err, "Snapshot refused");
                    CommandOutcome::rejected(Rejection::InvalidState { message: err.to_string() })
                }
            },
        };
        debug!(command = name, ?outcome, "Command handled");
        outcome
    }

    // ── Programs ──────────────────────────────────────────────────────────

    fn update_code(&mut self, args: CodeArgs) -> CommandOutcome {
        let kind = BehaviorKind::parse_lenient(&args.agent_type);
        if let Err(err) = self.runner.validate(&args.code) {
            warn!(%kind, %err, "Agent code rejected");
            return CommandOutcome::rejected(Rejection::CodeRejected { message: err.to_string() });
        }

        let mut swapped = 0usize;
        for agent in self.world.agents.iter_mut().filter(|a| a.kind == kind) {
            agent.memory.code = Some(args.code.clone());
            swapped += 1;
        }
        self.code_by_kind.insert(kind, args.code);
        info!(%kind, agents = swapped, "Agent code updated");
        CommandOutcome::Applied
    }

    // ── Placement ─────────────────────────────────────────────────────────

    fn add_agent(&mut self, args: AddAgentArgs) -> CommandOutcome {
        let cell = Cell::new(args.x, args.y);
        let kind = BehaviorKind::parse_lenient(&args.agent_type);
        let strategy = SearchStrategy::parse_lenient(&args.strategy);
        let max_energy = self.config.energy.max_energy;

        let mut skipped = Vec::new();
        let cfg = &args.config;
        let mut spec = AgentSpec::new(kind, cell)
            .strategy(strategy)
            .energy(self.config.energy.initial_energy.min(max_energy))
            .vision_radius(self.config.defaults.vision_radius);
        if let Some(color) = read(cfg, &["color"], lenient::as_string, &mut skipped) {
            spec = spec.color(color);
        }
        if let Some(energy) = read(cfg, &["initialEnergy", "initial_energy", "energy"], lenient::as_f64, &mut skipped) {
            spec = spec.energy(energy.min(max_energy));
        }
        if let Some(radius) = read(cfg, &["visionRadius", "vision_radius"], lenient::as_u32, &mut skipped) {
            spec = spec.vision_radius(radius);
        }

        let own_code = read(cfg, &["code"], lenient::as_string, &mut skipped).filter(|code| {
            match self.runner.validate(code) {
                Ok(()) => true,
                Err(err) => {
                    warn!(%kind, %err, "Placement code rejected; using the stored program");
                    skipped.push("code".to_owned());
                    false
                }
            }
        });
        spec = spec.code(own_code.or_else(|| self.code_by_kind.get(&kind).cloned()));

        match self.world.place_agent(spec) {
            Ok(id) => {
                self.visits.record(cell);
                info!(agent = %id, %kind, %cell, "Agent added");
                CommandOutcome::from_skipped(skipped)
            }
            Err(err) => {
                debug!(%err, "Agent placement refused");
                CommandOutcome::rejected(err.into())
            }
        }
    }

    fn add_food(&mut self, args: AddFoodArgs) -> CommandOutcome {
        let cell = Cell::new(args.x, args.y);
        let mut skipped = Vec::new();
        let value = read(
            &args.config,
            &["nutritionValue", "nutrition_value", "value"],
            |v| lenient::as_f64(v).filter(|n| *n >= 0.0),
            &mut skipped,
        )
        .unwrap_or(self.config.defaults.food_value);

        match self.world.place_food(cell, FoodSpec { value, tag: args.food_type }) {
            Ok(id) => {
                debug!(food = %id, %cell, value, "Food added");
                CommandOutcome::from_skipped(skipped)
            }
            Err(err) => {
                debug!(%err, "Food placement refused");
                CommandOutcome::rejected(err.into())
            }
        }
    }

    fn add_obstacle(&mut self, args: AddObstacleArgs) -> CommandOutcome {
        let cell = Cell::new(args.x, args.y);
        let cfg = &args.config;
        let mut skipped = Vec::new();
        let spec = ObstacleSpec {
            destructible: read(cfg, &["isDestructible", "destructible"], lenient::as_bool, &mut skipped)
                .unwrap_or(false),
            destruction_cost: read(
                cfg,
                &["destructionCost", "destruction_cost"],
                |v| lenient::as_f64(v).filter(|n| *n >= 0.0),
                &mut skipped,
            )
            .unwrap_or(self.config.defaults.destruction_cost),
            mobility: Mobility::parse_lenient(&args.subtype),
        };

        match self.world.place_obstacle(cell, spec) {
            Ok(id) => {
                debug!(obstacle = %id, %cell, "Obstacle added");
                CommandOutcome::from_skipped(skipped)
            }
            Err(err) => {
                debug!(%err, "Obstacle placement refused");
                CommandOutcome::rejected(err.into())
            }
        }
    }

    fn remove_element(&mut self, cell: Cell) -> CommandOutcome {
        match self.world.remove_at(cell) {
            Some(Removed::Agent(agent)) => {
                self.rngs.remove(agent.id);
                info!(agent = %agent.id, %cell, "Agent removed");
                CommandOutcome::Applied
            }
            Some(_) => {
                debug!(%cell, "Element removed");
                CommandOutcome::Applied
            }
            None => CommandOutcome::rejected(Rejection::NothingAt { cell }),
        }
    }

    /// Administrative teleport.  Targets are clamped into bounds; entries
    /// naming an unknown agent or an occupied cell are skipped.
    fn batch_move(&mut self, args: BatchMoveArgs) -> CommandOutcome {
        let mut skipped = Vec::new();
        for (i, m) in args.moves.iter().enumerate() {
            let Some(id) = move_target(m) else {
                warn!(index = i, id = %m.id, "Batch move has an unreadable agent id");
                skipped.push(format!("moves[{i}]"));
                continue;
            };
            let target = self.world.clamp(Cell::new(m.x, m.y));
            if self.world.teleport_agent(id, target) {
                self.visits.record(target);
            } else {
                debug!(agent = %id, cell = %target, "Batch move skipped");
                skipped.push(id.to_string());
            }
        }
        CommandOutcome::from_skipped(skipped)
    }
}
