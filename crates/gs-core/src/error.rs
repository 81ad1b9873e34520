//! Workspace base error type.
//!
//! Only invariant violations live here.  Everyday "that didn't work" outcomes
//! (occupied cells, unreachable food, rejected code) are values in the crates
//! that produce them, not errors.

use thiserror::Error;

/// Invariant violations in the grid primitives.
#[derive(Debug, Error)]
pub enum GsError {
    #[error("invalid grid dimensions {width}x{height}: each side must be within 1..=100")]
    InvalidDimensions { width: i32, height: i32 },
}

/// Shorthand result type for all `gs-*` crates.
pub type GsResult<T> = Result<T, GsError>;
