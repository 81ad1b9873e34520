//! Simulation observer trait for progress reporting and data collection.

use gs_core::Tick;
use gs_world::World;

use crate::{StopReason, TickReport};

/// Callbacks invoked by [`Sim::step_with`][crate::Sim::step_with] at key
/// points in the tick.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter;
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick, report: &TickReport) {
///         println!("{tick}: {} moves, {} eaten", report.moves, report.food_eaten);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called after the step counter advances, before any agent acts.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once every agent has acted.
    fn on_tick_end(&mut self, _tick: Tick, _report: &TickReport) {}

    /// Called every `config.output_interval_ticks` ticks with the
    /// end-of-tick world.
    fn on_snapshot(&mut self, _tick: Tick, _world: &World) {}

    /// Called whenever a stop condition pauses the run.
    fn on_halt(&mut self, _tick: Tick, _reason: StopReason) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
