//! `gs-output` — run analytics written to disk.
//!
//! | File                 | One row per                                  |
//! |----------------------|----------------------------------------------|
//! | `agent_ticks.csv`    | agent, every `output_interval_ticks` ticks   |
//! | `tick_summaries.csv` | completed tick                               |
//!
//! [`CsvWriter`] implements [`OutputWriter`] and is driven by
//! [`SimOutputObserver`], which implements `gs_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use gs_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs)?;
//! obs.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{AgentTickRow, TickSummaryRow};
pub use writer::OutputWriter;
