//! `gs-agent` — agent entity and storage for the `gridsim` workspace.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`agent`]   | `Agent`, `AgentMemory`, `AgentStats`                      |
//! | [`store`]   | `AgentStore` (insertion-ordered), `AgentRngs` (per-agent RNG) |
//! | [`builder`] | `AgentSpec` (fluent construction of one agent)            |
//!
//! Agents never mutate themselves: decision logic reads them through a
//! snapshot and the engine applies the outcome.  The mutators on [`Agent`]
//! are the engine's vocabulary for doing so.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                   |
//! |---------|----------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on all public types.   |

pub mod agent;
pub mod builder;
pub mod store;


pub use agent::{Agent, AgentMemory, AgentStats, PATH_HISTORY_LIMIT};
pub use builder::{AgentSpec, DEFAULT_ENERGY, DEFAULT_VISION_RADIUS};
pub use store::{AgentRngs, AgentStore};
