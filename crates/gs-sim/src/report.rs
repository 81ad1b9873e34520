//! What a tick did, why a run stopped, and end-of-run analytics.

use std::fmt;

use serde::{Deserialize, Serialize};

use gs_core::{Cell, GridDims, Tick};

// ── StopReason ────────────────────────────────────────────────────────────────

/// Why the engine refused to advance (or paused after a tick).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// `max_steps` reached and the run is not unlimited.
    StepBudget,
    /// Every food item is gone and at least one agent is present.
    NoFood,
}

impl StopReason {
    pub fn as_str(self) -> &'static str {
        match self {
            StopReason::StepBudget => "step_budget",
            StopReason::NoFood     => "no_food",
        }
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── TickReport ────────────────────────────────────────────────────────────────

/// Counters for one completed tick.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickReport {
    pub tick:                Tick,
    /// Live agents that were asked to decide.
    pub decided:             usize,
    pub moves:               usize,
    pub collisions:          usize,
    pub obstacles_destroyed: usize,
    pub food_eaten:          usize,
    pub dynamic_moved:       usize,
    /// Set when the post-tick check paused the run.
    pub halted:              Option<StopReason>,
}

/// Result of one `step` call.
#[derive(Clone, Debug, PartialEq)]
pub enum TickOutcome {
    Advanced(TickReport),
    /// A stop condition already held; nothing changed.
    Halted(StopReason),
}

impl TickOutcome {
    pub fn report(&self) -> Option<&TickReport> {
        match self {
            TickOutcome::Advanced(r) => Some(r),
            TickOutcome::Halted(_) => None,
        }
    }
}

// ── VisitMap ──────────────────────────────────────────────────────────────────

/// How many times agents stood on each cell since the last reset.
#[derive(Clone, Debug, PartialEq)]
pub struct VisitMap {
    dims:   GridDims,
    counts: Vec<u32>,
}

impl VisitMap {
    pub fn new(dims: GridDims) -> Self {
        Self { dims, counts: vec![0; dims.cell_count()] }
    }

    pub fn record(&mut self, cell: Cell) {
        if let Some(i) = self.dims.index_of(cell) {
            self.counts[i] = self.counts[i].saturating_add(1);
        }
    }

    pub fn get(&self, cell: Cell) -> u32 {
        self.dims.index_of(cell).map_or(0, |i| self.counts[i])
    }

    pub fn visited_cells(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Share of cells visited at least once, 0–100.
    pub fn coverage_percent(&self) -> f64 {
        100.0 * self.visited_cells() as f64 / self.counts.len().max(1) as f64
    }

    /// Counts as rows (`rows[y][x]`).
    pub fn rows(&self) -> Vec<Vec<u32>> {
        let w = self.dims.width() as usize;
        self.counts.chunks(w.max(1)).map(<[u32]>::to_vec).collect()
    }
}

// ── RunSummary ────────────────────────────────────────────────────────────────

/// World-level analytics at any point in a run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub ticks:               u64,
    pub agents:              usize,
    pub alive:               usize,
    pub food_remaining:      usize,
    pub food_collected:      u32,
    pub collisions:          u32,
    pub obstacles_destroyed: u32,
    pub energy_consumed:     f64,
    pub coverage_percent:    f64,
    /// Visit counts, `heatmap[y][x]`.
    pub heatmap:             Vec<Vec<u32>>,
}
