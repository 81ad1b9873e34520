//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use tracing::warn;

use gs_core::Tick;
use gs_sim::{SimObserver, StopReason, TickReport};
use gs_world::World;

use crate::row::{AgentTickRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes agent rows and tick summaries to any
/// [`OutputWriter`].
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After the run, check with
/// [`take_error`][Self::take_error] or call [`finish`][Self::finish].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any).  Only the first one is kept.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Flush and return the writer, or the first error seen.
    pub fn finish(mut self) -> OutputResult<W> {
        if let Some(e) = self.last_error.take() {
            return Err(e);
        }
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            warn!(err = %e, "Output write failed");
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, _tick: Tick, report: &TickReport) {
        let result = self.writer.write_tick_summary(&TickSummaryRow::from(report));
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, world: &World) {
        let rows = AgentTickRow::from_world(tick, world);
        if !rows.is_empty() {
            let result = self.writer.write_agents(&rows);
            self.store_err(result);
        }
    }

    fn on_halt(&mut self, _tick: Tick, _reason: StopReason) {
        let result = self.writer.flush();
        self.store_err(result);
    }
}
