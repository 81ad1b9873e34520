//! The `Sim` struct and its tick loop.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info};

use gs_agent::AgentRngs;
use gs_behavior::{BehaviorModel, ClaimLog, CodeRunner, Intent, KindDispatch, TickContext, decide};
use gs_core::{AgentId, BehaviorKind, GridDims, SimRng, Tick};
use gs_world::World;

use crate::resolve::{MoveOutcome, resolve_food, resolve_move};
use crate::{
    NoopObserver, RunSummary, SimConfig, SimError, SimObserver, SimResult, StopReason, TickOutcome,
    TickReport, VisitMap,
};

/// Offset separating the world RNG stream from agent streams.
const WORLD_STREAM: u64 = 0x5eed_0b57;

// ── Sim ───────────────────────────────────────────────────────────────────────

/// One independent world instance and everything needed to advance it.
///
/// Each [`step`](Self::step):
///
/// 1. **Stop check**: if a stop condition already holds, pause and return
///    [`TickOutcome::Halted`] without advancing.
/// 2. **Advance** the step counter and clear the claim log.
/// 3. **Dynamic obstacles** take one random step each.
/// 4. **Snapshot** the world.  Every decision this tick reads it.
/// 5. **Agents** act in insertion order: decide against the snapshot, then
///    resolve movement and food against the live world before the next
///    agent decides.  Dead agents are skipped.
/// 6. **Stop check** again; pause if a condition now holds.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<B: BehaviorModel = KindDispatch> {
    /// Engine configuration.  Survives reset and resize.
    pub config: SimConfig,

    /// Live world state.
    pub world: World,

    /// Per-agent deterministic RNGs, kept out of the world so snapshots
    /// never clone them.
    pub rngs: AgentRngs,

    pub(crate) world_rng:    SimRng,
    pub(crate) claims:       ClaimLog,
    pub(crate) tick:         Tick,
    pub(crate) running:      bool,
    pub(crate) behavior:     B,
    pub(crate) runner:       Arc<dyn CodeRunner>,
    /// Latest accepted program per kind; given to new agents of that kind.
    pub(crate) code_by_kind: BTreeMap<BehaviorKind, String>,
    pub(crate) visits:       VisitMap,
}

impl<B: BehaviorModel> Sim<B> {
    pub(crate) fn assemble(
        config:   SimConfig,
        dims:     GridDims,
        behavior: B,
        runner:   Arc<dyn CodeRunner>,
    ) -> Self {
        Self {
            rngs:         AgentRngs::new(config.seed),
            world_rng:    SimRng::new(config.seed ^ WORLD_STREAM),
            world:        World::new(dims),
            claims:       ClaimLog::new(),
            tick:         Tick::ZERO,
            running:      false,
            behavior,
            runner,
            code_by_kind: BTreeMap::new(),
            visits:       VisitMap::new(dims),
            config,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// Steps taken since the last reset.
    #[inline]
    pub fn tick(&self) -> Tick {
        self.tick
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn set_running(&mut self, running: bool) {
        if self.running != running {
            info!(running, tick = self.tick.0, "Run state changed");
        }
        self.running = running;
    }

    /// Claims made during the most recent tick.
    pub fn claims(&self) -> &ClaimLog {
        &self.claims
    }

    pub fn runner(&self) -> &Arc<dyn CodeRunner> {
        &self.runner
    }

    pub fn code_for(&self, kind: BehaviorKind) -> Option<&str> {
        self.code_by_kind.get(&kind).map(String::as_str)
    }

    pub fn visits(&self) -> &VisitMap {
        &self.visits
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Clear every entity and restart the counter.  Configuration, grid
    /// size and stored programs are kept.
    pub fn reset(&mut self) {
        self.world.clear();
        self.clear_run_state();
        info!(dims = %self.world.dims(), "World reset");
    }

    /// Change grid size.  Implies [`reset`](Self::reset).
    pub fn resize(&mut self, dims: GridDims) {
        self.world.resize(dims);
        self.clear_run_state();
        info!(%dims, "World resized");
    }

    pub(crate) fn clear_run_state(&mut self) {
        self.tick = Tick::ZERO;
        self.running = false;
        self.claims.clear();
        self.rngs.reseed(self.config.seed);
        self.world_rng = SimRng::new(self.config.seed ^ WORLD_STREAM);
        self.visits = VisitMap::new(self.world.dims());
    }

    /// The condition that currently forbids stepping, if any.
    pub fn stop_reason(&self) -> Option<StopReason> {
        if !self.config.unlimited && self.tick.0 >= self.config.max_steps {
            return Some(StopReason::StepBudget);
        }
        if self.config.stop_on_no_food && self.world.food().is_empty() && !self.world.agents.is_empty() {
            return Some(StopReason::NoFood);
        }
        None
    }

    // ── Stepping ──────────────────────────────────────────────────────────

    /// Advance one tick without an observer.
    pub fn step(&mut self) -> TickOutcome {
        self.step_with(&mut NoopObserver)
    }

    /// Advance one tick, reporting to `observer`.
    pub fn step_with<O: SimObserver + ?Sized>(&mut self, observer: &mut O) -> TickOutcome {
        if let Some(reason) = self.stop_reason() {
            self.set_running(false);
            observer.on_halt(self.tick, reason);
            return TickOutcome::Halted(reason);
        }

        self.tick = self.tick.next();
        let now = self.tick;
        observer.on_tick_start(now);
        self.claims.clear();

        let mut report = TickReport { tick: now, ..TickReport::default() };
        report.dynamic_moved = self.world.advance_dynamic_obstacles(&mut self.world_rng);

        let snapshot = self.world.clone();
        for agent in snapshot.agents.iter() {
            if !agent.is_alive() {
                continue;
            }
            report.decided += 1;

            let intents = {
                let ctx = TickContext::new(now, &snapshot, &self.claims, self.runner.as_ref());
                decide(&self.behavior, agent, &ctx, self.rngs.get_mut(agent.id))
            };
            self.apply_intents(agent.id, intents, &mut report);
        }

        if let Some(reason) = self.stop_reason() {
            self.set_running(false);
            report.halted = Some(reason);
            observer.on_halt(now, reason);
        }

        debug!(
            tick      = now.0,
            decided   = report.decided,
            moves     = report.moves,
            eaten     = report.food_eaten,
            "Tick complete"
        );
        observer.on_tick_end(now, &report);
        if now.is_multiple_of(self.config.output_interval_ticks) {
            observer.on_snapshot(now, &self.world);
        }
        TickOutcome::Advanced(report)
    }

    /// Apply one agent's intents in order.  Only the first `Move` counts.
    fn apply_intents(&mut self, id: AgentId, intents: Vec<Intent>, report: &mut TickReport) {
        let mut moved = false;
        for intent in intents {
            match intent {
                Intent::Remember(cell) => {
                    if let Some(agent) = self.world.agents.get_mut(id) {
                        agent.memory.visited.insert(cell);
                    }
                }
                Intent::Claim(cell) => self.claims.push(id, cell),
                Intent::Inbox(cells) => {
                    if let Some(agent) = self.world.agents.get_mut(id) {
                        agent.memory.inbox = cells;
                    }
                }
                Intent::Move(delta) if !moved => {
                    moved = true;
                    self.apply_move(id, delta, report);
                }
                Intent::Move(_) => {}
            }
        }
    }

    fn apply_move(&mut self, id: AgentId, delta: gs_core::Delta, report: &mut TickReport) {
        match resolve_move(&mut self.world, id, delta, &self.config.energy) {
            MoveOutcome::Moved { to, .. } => {
                report.moves += 1;
                self.visits.record(to);
                if resolve_food(&mut self.world, id, self.config.energy.max_energy).is_some() {
                    report.food_eaten += 1;
                }
            }
            MoveOutcome::Collided { .. } => report.collisions += 1,
            MoveOutcome::Destroyed { .. } => report.obstacles_destroyed += 1,
            MoveOutcome::Stay => {}
        }
    }

    /// Step until a stop condition holds.
    ///
    /// Fails with [`SimError::Unbounded`] for an unlimited configuration,
    /// which may never stop.
    pub fn run<O: SimObserver + ?Sized>(&mut self, observer: &mut O) -> SimResult<RunSummary> {
        if self.config.unlimited {
            return Err(SimError::Unbounded);
        }
        self.set_running(true);
        while let TickOutcome::Advanced(_) = self.step_with(observer) {}
        Ok(self.summary())
    }

    /// Step at most `n` times, stopping early on a halt.  Returns the number
    /// of ticks actually advanced.
    pub fn run_ticks<O: SimObserver + ?Sized>(&mut self, n: u64, observer: &mut O) -> u64 {
        let mut advanced = 0;
        for _ in 0..n {
            match self.step_with(observer) {
                TickOutcome::Advanced(_) => advanced += 1,
                TickOutcome::Halted(_) => break,
            }
        }
        advanced
    }

    // ── Analytics ─────────────────────────────────────────────────────────

    pub fn summary(&self) -> RunSummary {
        let agents = &self.world.agents;
        RunSummary {
            ticks:               self.tick.0,
            agents:              agents.len(),
            alive:               agents.alive_count(),
            food_remaining:      self.world.food().len(),
            food_collected:      agents.iter().map(|a| a.stats.food_collected).sum(),
            collisions:          agents.iter().map(|a| a.stats.collisions).sum(),
            obstacles_destroyed: agents.iter().map(|a| a.stats.obstacles_destroyed).sum(),
            energy_consumed:     agents.iter().map(|a| a.stats.energy_consumed).sum(),
            coverage_percent:    self.visits.coverage_percent(),
            heatmap:             self.visits.rows(),
        }
    }
}
