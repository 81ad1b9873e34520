//! Integration tests for gs-output.

use serde_json::json;
use tempfile::TempDir;

use gs_core::GridDims;
use gs_sim::{Command, Sim, SimBuilder, SimConfig};

use crate::csv::{AGENT_FILE, SUMMARY_FILE};
use crate::{AgentTickRow, CsvWriter, OutputError, OutputResult, OutputWriter, SimOutputObserver, TickSummaryRow};

fn tmp() -> TempDir {
    tempfile::tempdir().expect("create temp dir")
}

fn sim(max_steps: u64) -> Sim {
    let mut config = SimConfig::default();
    config.max_steps = max_steps;
    let mut s = SimBuilder::new(config).dims(GridDims::new(6, 6).unwrap()).build().unwrap();
    for c in [
        json!({"type": "ADD_AGENT", "data": {"x": 0, "y": 0, "agent_type": "explorer"}}),
        json!({"type": "ADD_AGENT", "data": {"x": 5, "y": 0, "agent_type": "reactive"}}),
        json!({"type": "ADD_FOOD", "data": {"x": 5, "y": 5}}),
        json!({"type": "ADD_FOOD", "data": {"x": 3, "y": 5}}),
    ] {
        s.execute(serde_json::from_value::<Command>(c).unwrap());
    }
    s
}

fn read_rows(path: &std::path::Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut rdr = csv::Reader::from_path(path).unwrap();
    let headers = rdr.headers().unwrap().iter().map(str::to_owned).collect();
    let rows = rdr
        .records()
        .map(|r| r.unwrap().iter().map(str::to_owned).collect())
        .collect();
    (headers, rows)
}

#[cfg(test)]
mod csv_tests {
    use super::*;

    #[test]
    fn files_created_with_headers() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.flush().unwrap();

        let (agents, rows) = read_rows(&dir.path().join(AGENT_FILE));
        assert_eq!(agents[..3], ["tick", "agent_id", "kind"]);
        assert!(rows.is_empty());
        let (summaries, _) = read_rows(&dir.path().join(SUMMARY_FILE));
        assert_eq!(summaries.last().map(String::as_str), Some("halted"));
    }

    #[test]
    fn creates_missing_directory() {
        let dir = tmp();
        let nested = dir.path().join("runs").join("a");
        CsvWriter::new(&nested).unwrap();
        assert!(nested.join(AGENT_FILE).exists());
    }

    #[test]
    fn run_writes_rows_per_interval() {
        let dir = tmp();
        let mut s = sim(4);
        s.config.output_interval_ticks = 2;

        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        s.run(&mut obs).unwrap();
        obs.finish().unwrap();

        let (_, summaries) = read_rows(&dir.path().join(SUMMARY_FILE));
        assert_eq!(summaries.len(), 4);
        assert_eq!(summaries[0][0], "1");
        assert_eq!(summaries[3][7], "step_budget");
        assert_eq!(summaries[0][7], "");

        // Two agents at ticks 2 and 4.
        let (_, agents) = read_rows(&dir.path().join(AGENT_FILE));
        assert_eq!(agents.len(), 4);
        assert_eq!(agents[0][..3], ["2", "1", "explorer"]);
        assert_eq!(agents[1][..3], ["2", "2", "reactive"]);
        assert_eq!(agents[3][0], "4");
    }
}

#[cfg(test)]
mod row_tests {
    use super::*;

    #[test]
    fn agent_rows_follow_world() {
        let mut s = sim(10);
        s.step();
        let rows = AgentTickRow::from_world(s.tick(), &s.world);
        assert_eq!(rows.len(), 2);
        let explorer = &rows[0];
        assert_eq!(explorer.tick, 1);
        assert!(explorer.alive);
        assert_eq!(explorer.steps, 1);
        assert_eq!(explorer.cells_visited, 2);
        assert_eq!(explorer.energy, 99.5);
    }

    #[test]
    fn summary_row_mirrors_report() {
        let mut s = sim(10);
        let report = s.step().report().cloned().unwrap();
        let row = TickSummaryRow::from(&report);
        assert_eq!(row.tick, 1);
        assert_eq!(row.decided, 2);
        assert_eq!(row.moves, report.moves);
        assert_eq!(row.halted, "");
    }
}

#[cfg(test)]
mod observer_tests {
    use super::*;

    /// Fails every write.
    struct Broken;

    impl OutputWriter for Broken {
        fn write_agents(&mut self, _rows: &[AgentTickRow]) -> OutputResult<()> {
            Err(std::io::Error::other("disk full").into())
        }
        fn write_tick_summary(&mut self, _row: &TickSummaryRow) -> OutputResult<()> {
            Err(std::io::Error::other("disk full").into())
        }
        fn flush(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    #[test]
    fn write_errors_do_not_stop_the_run() {
        let mut s = sim(3);
        let mut obs = SimOutputObserver::new(Broken);
        let summary = s.run(&mut obs).unwrap();
        assert_eq!(summary.ticks, 3);
        assert!(matches!(obs.take_error(), Some(OutputError::Io(_))));
        assert!(obs.take_error().is_none());
    }

    #[test]
    fn finish_surfaces_first_error() {
        let mut s = sim(2);
        let mut obs = SimOutputObserver::new(Broken);
        s.run(&mut obs).unwrap();
        assert!(obs.finish().is_err());
    }
}
