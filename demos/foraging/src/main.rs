//! `foraging` — every behaviour kind competing for food on one grid.
//!
//! Places one agent of each kind around a 30×20 field scattered with food,
//! walls, crates and two wandering obstacles, then runs headless until the
//! food is gone or the step budget is spent.  Per-agent and per-tick CSVs
//! are written to `OUTPUT_DIR`.
//!
//! Run with:
//!   RUST_LOG=info cargo run -p foraging --release
//!
//! A TOML file given as the first argument overrides the engine defaults.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gs_behavior::CodeRunner;
use gs_core::GridDims;
use gs_output::{CsvWriter, SimOutputObserver};
use gs_sandbox::{SandboxConfig, WasmSandbox};
use gs_sim::{Command, CommandOutcome, SimBuilder, SimConfig};

// ── Constants ─────────────────────────────────────────────────────────────────

const WIDTH:       i32  = 30;
const HEIGHT:      i32  = 20;
const MAX_STEPS:   u64  = 300;
const FOOD_PIECES: i32  = 24;
const OUTPUT_DIR:  &str = "output/foraging";

/// Custom agent: step toward the first visible food, else drift east.
const SEEKER: &str = r#"
(module
  (import "agent" "x" (func $x (result i32)))
  (import "agent" "y" (func $y (result i32)))
  (import "agent" "food_count" (func $count (result i32)))
  (import "agent" "food_x" (func $fx (param i32) (result i32)))
  (import "agent" "food_y" (func $fy (param i32) (result i32)))
  (import "math" "sign" (func $sign (param i32) (result i32)))
  (import "random" "int" (func $rand (param i32 i32) (result i32)))
  (func (export "decide") (result i32 i32)
    (if (result i32 i32) (i32.eqz (call $count))
      (then (i32.const 1) (call $rand (i32.const -1) (i32.const 1)))
      (else
        (call $sign (i32.sub (call $fx (i32.const 0)) (call $x)))
        (call $sign (i32.sub (call $fy (i32.const 0)) (call $y)))))))
"#;

// ── Scenario ──────────────────────────────────────────────────────────────────

fn scenario() -> Vec<serde_json::Value> {
    let mut cmds = vec![json!({"type": "UPDATE_AGENT_CODE", "data": {"agent_type": "custom", "code": SEEKER}})];

    let agents = [
        ("reactive", "bfs", 1, 1),
        ("explorer", "bfs", 1, 18),
        ("collector", "a_star", 28, 1),
        ("cooperative", "a_star", 28, 18),
        ("cooperative", "a_star", 15, 1),
        ("competitive", "dijkstra", 15, 18),
        ("q_learning", "bfs", 1, 10),
        ("custom", "bfs", 28, 10),
    ];
    for (kind, strategy, x, y) in agents {
        cmds.push(json!({"type": "ADD_AGENT",
            "data": {"x": x, "y": y, "agent_type": kind, "strategy": strategy}}));
    }

    // A vertical wall with a gap, guarded by a crate.
    for y in 3..HEIGHT - 3 {
        if y == HEIGHT / 2 {
            cmds.push(json!({"type": "ADD_OBSTACLE",
                "data": {"x": WIDTH / 2, "y": y, "config": {"isDestructible": true, "destructionCost": 8}}}));
        } else {
            cmds.push(json!({"type": "ADD_OBSTACLE", "data": {"x": WIDTH / 2, "y": y}}));
        }
    }
    cmds.push(json!({"type": "ADD_OBSTACLE", "data": {"x": 7, "y": 6, "subtype": "dynamic"}}));
    cmds.push(json!({"type": "ADD_OBSTACLE", "data": {"x": 22, "y": 13, "subtype": "dynamic"}}));

    // Food on a fixed lattice so runs are comparable.
    for i in 0..FOOD_PIECES {
        let x = 3 + (i * 7) % (WIDTH - 6);
        let y = 2 + (i * 5) % (HEIGHT - 4);
        let food_type = if i % 4 == 0 { "energy" } else { "food" };
        cmds.push(json!({"type": "ADD_FOOD",
            "data": {"x": x, "y": y, "food_type": food_type, "config": {"nutritionValue": 15 + i % 3 * 5}}}));
    }
    cmds
}

fn load_config() -> Result<SimConfig> {
    if let Some(path) = std::env::args().nth(1) {
        let src = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
        return Ok(SimConfig::from_toml_str(&src)?);
    }
    let mut config = SimConfig::default();
    config.max_steps = MAX_STEPS;
    config.output_interval_ticks = 5;
    Ok(config)
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let config = load_config()?;
    let sandbox: Arc<dyn CodeRunner> = Arc::new(WasmSandbox::new(SandboxConfig::default())?);
    let mut sim = SimBuilder::new(config)
        .dims(GridDims::new(WIDTH, HEIGHT)?)
        .runner(sandbox)
        .build()?;

    let mut refused = 0usize;
    for cmd in scenario() {
        let cmd: Command = serde_json::from_value(cmd)?;
        if let CommandOutcome::Rejected { rejection } = sim.execute(cmd) {
            tracing::warn!(?rejection, "Scenario command refused");
            refused += 1;
        }
    }
    info!(
        agents    = sim.world.agents.len(),
        food      = sim.world.food().len(),
        obstacles = sim.world.obstacles().len(),
        refused,
        "Scenario ready"
    );

    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut observer = SimOutputObserver::new(writer);
    let summary = sim.run(&mut observer)?;
    observer.finish()?;

    info!(
        ticks          = summary.ticks,
        alive          = summary.alive,
        food_collected = summary.food_collected,
        food_remaining = summary.food_remaining,
        collisions     = summary.collisions,
        destroyed      = summary.obstacles_destroyed,
        coverage       = format!("{:.1}%", summary.coverage_percent),
        "Run complete"
    );
    for agent in sim.world.agents.iter() {
        info!(
            agent  = %agent.id,
            kind   = %agent.kind,
            energy = agent.energy,
            food   = agent.stats.food_collected,
            steps  = agent.steps,
            "Final agent state"
        );
    }
    info!(dir = OUTPUT_DIR, "CSV output written");
    Ok(())
}
