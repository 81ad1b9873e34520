//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `agent_ticks.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{AgentTickRow, OutputResult, TickSummaryRow};

pub const AGENT_FILE: &str = "agent_ticks.csv";
pub const SUMMARY_FILE: &str = "tick_summaries.csv";

/// Writes run output to two CSV files.
pub struct CsvWriter {
    agents:    Writer<File>,
    summaries: Writer<File>,
}

impl CsvWriter {
    /// Create (truncating) the two CSV files in `dir` and write the header
    /// rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut agents = Writer::from_path(dir.join(AGENT_FILE))?;
        agents.write_record([
            "tick", "agent_id", "kind", "x", "y", "energy", "alive", "steps",
            "food_collected", "collisions", "cells_visited",
        ])?;

        let mut summaries = Writer::from_path(dir.join(SUMMARY_FILE))?;
        summaries.write_record([
            "tick", "decided", "moves", "collisions", "obstacles_destroyed", "food_eaten",
            "dynamic_moved", "halted",
        ])?;

        Ok(Self { agents, summaries })
    }
}

impl OutputWriter for CsvWriter {
    fn write_agents(&mut self, rows: &[AgentTickRow]) -> OutputResult<()> {
        for row in rows {
            self.agents.write_record(&[
                row.tick.to_string(),
                row.agent_id.to_string(),
                row.kind.to_owned(),
                row.x.to_string(),
                row.y.to_string(),
                row.energy.to_string(),
                (row.alive as u8).to_string(),
                row.steps.to_string(),
                row.food_collected.to_string(),
                row.collisions.to_string(),
                row.cells_visited.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.decided.to_string(),
            row.moves.to_string(),
            row.collisions.to_string(),
            row.obstacles_destroyed.to_string(),
            row.food_eaten.to_string(),
            row.dynamic_moved.to_string(),
            row.halted.to_owned(),
        ])?;
        Ok(())
    }

    fn flush(&mut self) -> OutputResult<()> {
        self.agents.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
