//! Placement failures.
//!
//! These are expected outcomes of client commands, not faults: the engine
//! turns them into rejection notices and the world is left unchanged.

use thiserror::Error;

use gs_core::Cell;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("cell {0} is outside the grid")]
    OutOfBounds(Cell),

    #[error("cell {0} is already occupied")]
    Occupied(Cell),

    /// A restored entity reuses an id already present in the world.
    #[error("id {0} is already in use")]
    DuplicateId(String),
}

pub type PlacementResult<T> = Result<T, PlacementError>;
