//! The `OutputWriter` trait implemented by output backends.

use crate::{AgentTickRow, OutputResult, TickSummaryRow};

/// A sink for per-agent rows and per-tick summaries.
///
/// Errors are reported per call; [`SimOutputObserver`][crate::SimOutputObserver]
/// keeps the first one for [`take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write one row per agent for a snapshot tick.
    fn write_agents(&mut self, rows: &[AgentTickRow]) -> OutputResult<()>;

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Push buffered rows to the underlying files.  Safe to call repeatedly;
    /// writing may continue afterwards.
    fn flush(&mut self) -> OutputResult<()>;
}
