//! `gs-sim` — tick loop and command surface for the gridsim workspace.
//!
//! # Tick loop
//!
//! ```text
//! step():
//!   ① Stop check   — step budget spent, or no food left with agents present
//!                    → pause, return Halted, nothing changes.
//!   ② Advance      — tick += 1; claim log cleared.
//!   ③ Obstacles    — each dynamic obstacle takes one random free step.
//!   ④ Snapshot     — world cloned; every decision this tick reads the clone.
//!   ⑤ Agents       — live agents in insertion order:
//!                      decide (snapshot) → resolve move → eat (live world)
//!   ⑥ Stop check   — pause if a condition now holds.
//! ```
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`sim`]      | `Sim` — world, RNGs, claim log, run state, `step` / `run`  |
//! | [`builder`]  | `SimBuilder`                                               |
//! | [`config`]   | `SimConfig`, `EnergyConfig`, `PlacementDefaults`, TOML + JSON patching |
//! | [`command`]  | `Command` (wire enum), `CommandOutcome`, `Rejection`, `CommandReply` |
//! | [`control`]  | `Sim::apply` / `execute` — command handling                |
//! | [`resolve`]  | Movement, destruction and food resolution                  |
//! | [`snapshot`] | `WorldSnapshot`, `ConfigView`, export / load               |
//! | [`report`]   | `TickReport`, `TickOutcome`, `StopReason`, `VisitMap`, `RunSummary` |
//! | [`observer`] | `SimObserver` hooks, `NoopObserver`                        |
//! | [`lenient`]  | Forgiving readers for loosely typed client JSON            |
//! | [`error`]    | `SimError`, `SimResult<T>`                                 |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use gs_sim::{Command, NoopObserver, SimBuilder, SimConfig};
//!
//! let mut sim = SimBuilder::new(SimConfig::default()).build()?;
//! sim.apply(Command::from_json(r#"{"type":"ADD_AGENT","data":{"x":0,"y":0,"agent_type":"collector"}}"#)?);
//! sim.apply(Command::from_json(r#"{"type":"ADD_FOOD","data":{"x":5,"y":5}}"#)?);
//! let summary = sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod command;
pub mod config;
pub mod control;
pub mod error;
pub mod lenient;
pub mod observer;
pub mod report;
pub mod resolve;
pub mod sim;
pub mod snapshot;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use command::{Command, CommandOutcome, CommandReply, Rejection};
pub use config::{BASE_TICK_INTERVAL_MS, EnergyConfig, PlacementDefaults, SimConfig};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use report::{RunSummary, StopReason, TickOutcome, TickReport, VisitMap};
pub use resolve::{MoveOutcome, resolve_food, resolve_move};
pub use sim::Sim;
pub use snapshot::{ConfigView, WorldSnapshot};
