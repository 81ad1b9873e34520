use gs_core::{BehaviorKind, GsError};
use gs_world::PlacementError;
use thiserror::Error;

/// Fatal engine errors.  Only configuration, snapshot loading and decoding
/// can fail; a tick never does.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] GsError),

    #[error("snapshot does not fit the world: {0}")]
    Placement(#[from] PlacementError),

    #[error("snapshot carries {kind} code the runner rejects: {message}")]
    RejectedCode { kind: BehaviorKind, message: String },

    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("run() needs a step budget; the configuration is unlimited")]
    Unbounded,
}

pub type SimResult<T> = Result<T, SimError>;
