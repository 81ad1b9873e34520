use gs_behavior::BehaviorError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SandboxError {
    // ── Rejected at submission ───────────────────────────────────────────────
    #[error("code is empty")]
    Empty,

    #[error("code is {len} bytes, limit is {max}")]
    TooLarge { len: usize, max: usize },

    #[error("syntax error: {0}")]
    Syntax(String),

    #[error("invalid module: {0}")]
    Invalid(String),

    #[error("import from denied module `{module}` (`{module}.{name}`)")]
    DeniedModule { module: String, name: String },

    #[error("import of denied function `{module}.{name}`")]
    DeniedCall { module: String, name: String },

    #[error("unknown import `{module}.{name}`")]
    UnknownImport { module: String, name: String },

    #[error("module does not export a `decide` function")]
    MissingEntry,

    #[error("imports do not match the host functions: {0}")]
    Link(String),

    // ── Failed while running ─────────────────────────────────────────────────
    #[error("execution budget exhausted")]
    Timeout,

    #[error("`decide` has an unsupported signature: {0}")]
    WrongShape(String),

    #[error("trap: {0}")]
    Trap(String),

    #[error("engine error: {0}")]
    Engine(String),
}

impl From<SandboxError> for BehaviorError {
    fn from(err: SandboxError) -> Self {
        match err {
            SandboxError::Timeout => BehaviorError::Timeout,
            SandboxError::WrongShape(msg) => BehaviorError::InvalidResult(msg),
            SandboxError::Trap(msg) | SandboxError::Engine(msg) => BehaviorError::Runtime(msg),
            rejected => BehaviorError::CodeRejected(rejected.to_string()),
        }
    }
}

pub type SandboxResult<T> = Result<T, SandboxError>;
