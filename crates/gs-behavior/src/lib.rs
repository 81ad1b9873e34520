//! `gs-behavior` — agent decision logic.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                      |
//! |----------------|---------------------------------------------------------------|
//! | [`intent`]     | `Intent` enum (`Move`, `Remember`, `Claim`, `Inbox`)          |
//! | [`context`]    | `TickContext<'a>` — read-only tick snapshot shared by all agents |
//! | [`claims`]     | `ClaimLog` — tick-scoped, append-only cooperative claims      |
//! | [`perception`] | `Perception` — the bounded view handed to custom code         |
//! | [`runner`]     | `CodeRunner` trait (sandbox seam), `NoSandbox`                |
//! | [`model`]      | `BehaviorModel` trait, `KindDispatch` (one strategy per kind) |
//! | [`strategy`]   | `reactive`, `explorer`, `collector`, `cooperative`, `competitive`, `q_learning`, `custom` |
//! | [`dispatch`]   | `decide` — failure-containing call into a model               |
//! | [`error`]      | `BehaviorError`, `BehaviorResult<T>`                          |
//!
//! # Design notes
//!
//! The engine's step works as follows for each live agent, in insertion
//! order:
//!
//! 1. **Decide**: call [`decide`] against the *start-of-tick* snapshot.
//!    All reads go through `&TickContext`; no mutation.
//! 2. **Apply**: consume the returned `Vec<Intent>` and mutate the live
//!    world before the next agent decides.
//!
//! Claims are the one channel through which an earlier agent's decision is
//! visible to a later one in the same tick; see [`ClaimLog`].

pub mod claims;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod intent;
pub mod model;
pub mod perception;
pub mod runner;
pub mod strategy;


pub use claims::{Claim, ClaimLog};
pub use context::TickContext;
pub use dispatch::decide;
pub use error::{BehaviorError, BehaviorResult};
pub use intent::Intent;
pub use model::{BehaviorModel, KindDispatch};
pub use perception::Perception;
pub use runner::{CodeRunner, NoSandbox};
