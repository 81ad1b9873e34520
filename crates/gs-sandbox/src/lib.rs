//! `gs-sandbox` — runs custom agent code in WebAssembly.
//!
//! Custom agents submit a module in WebAssembly text format.  The module
//! computes one move per tick from a read-only perception record and nothing
//! else: it has no ambient access to the engine, the filesystem, or the
//! network because the only imports it can link are the host functions
//! listed in [`scope::HOST_FUNCTIONS`].
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`config`]   | `SandboxConfig` — fuel, memory, wall-clock and size quotas |
//! | [`validate`] | Import denylist / allowlist and entry-point checks         |
//! | [`scope`]    | Host functions (`agent.*`, `math.*`, `random.*`)           |
//! | [`sandbox`]  | `WasmSandbox` — the `CodeRunner` implementation            |
//! | [`error`]    | `SandboxError`, conversion into `BehaviorError`            |
//!
//! # Guest contract
//!
//! ```text
//! (module
//!   (import "agent" "x" (func $x (result i32)))
//!   (func (export "decide") (result i32 i32)
//!     i32.const 1
//!     i32.const 0))
//! ```
//!
//! `decide` returns `(dx, dy)` either as two `i32` results or as one `i64`
//! with `dx` in the low and `dy` in the high 32 bits.
//!
//! # Quotas
//!
//! Every call runs in a fresh store with a fuel budget, a linear-memory cap,
//! and an epoch deadline advanced by a background ticker thread.  Running
//! out of either fuel or time is reported as `Timeout`.

pub mod config;
pub mod error;
pub mod sandbox;
pub mod scope;
pub mod validate;

mod cache;


pub use config::SandboxConfig;
pub use error::{SandboxError, SandboxResult};
pub use sandbox::WasmSandbox;
