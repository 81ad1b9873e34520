//! Spatial-subsystem error type.
//!
//! "No path" is not an error: searches return an empty [`Route`][crate::Route]
//! for unreachable goals.  Errors are reserved for malformed queries.

use thiserror::Error;

use gs_core::{Cell, GridDims};

/// Errors produced by `gs-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("{which} cell {cell} lies outside the {dims} grid")]
    OutOfBounds {
        which: &'static str,
        cell:  Cell,
        dims:  GridDims,
    },
}

pub type SpatialResult<T> = Result<T, SpatialError>;
