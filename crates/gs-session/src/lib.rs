//! `gs-session` — many independent worlds behind one process.
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`id`]       | `SessionId` — `project::instance` keys with defaults       |
//! | [`registry`] | `SessionRegistry` — session → `Arc<Mutex<Sim>>`, `step_all`|
//! | [`driver`]   | `SessionDriver` — tokio task ticking one session           |
//! | [`error`]    | `SessionError`, `SessionResult<T>`                         |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | `step_all` fans out across sessions on Rayon.          |
//!
//! Sessions share nothing mutable except the code runner, which is
//! `Send + Sync`.  Isolation is per world: one lock per session, held for
//! exactly one tick or one command.

pub mod driver;
pub mod error;
pub mod id;
pub mod registry;


pub use driver::SessionDriver;
pub use error::{SessionError, SessionResult};
pub use id::{DEFAULT_PART, SessionId};
pub use registry::{SessionRegistry, SharedSim, lock_sim};
