//! `gs-core` — foundational types for the `gridsim` workspace.
//!
//! This crate is a dependency of every other `gs-*` crate.  It intentionally
//! has no `gs-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`ids`]    | `AgentId`, `FoodId`, `ObstacleId`                         |
//! | [`cell`]   | `Cell`, `Delta`, `Direction`, Manhattan distance          |
//! | [`grid`]   | `GridDims` — bounds, clamping, containment                |
//! | [`time`]   | `Tick`                                                    |
//! | [`rng`]    | `AgentRng` (per-agent), `SimRng` (global)                 |
//! | [`kind`]   | `BehaviorKind`, `SearchStrategy`, `Mobility`              |
//! | [`error`]  | `GsError`, `GsResult`                                     |
//!
//! # Coordinates
//!
//! `x` grows to the east and `y` grows to the south, so `(0, 0)` is the
//! top-left cell and `Direction::North` is `dy = -1`.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod cell;
pub mod error;
pub mod grid;
pub mod ids;
pub mod kind;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use cell::{Cell, Delta, Direction};
pub use error::{GsError, GsResult};
pub use grid::GridDims;
pub use ids::{AgentId, FoodId, ObstacleId};
pub use kind::{BehaviorKind, Mobility, SearchStrategy};
pub use rng::{AgentRng, SimRng};
pub use time::Tick;
