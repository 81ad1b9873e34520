use thiserror::Error;

/// Why a decision produced no intents.  Never fatal to the tick.
#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("code rejected: {0}")]
    CodeRejected(String),

    #[error("custom code failed: {0}")]
    Runtime(String),

    #[error("custom code exceeded its execution budget")]
    Timeout,

    #[error("custom code returned an invalid result: {0}")]
    InvalidResult(String),

    #[error("no sandbox is configured for custom code")]
    SandboxUnavailable,

    #[error("strategy panicked: {0}")]
    Panicked(String),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
