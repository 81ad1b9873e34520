use gs_sim::SimError;
use thiserror::Error;

use crate::SessionId;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session {0} already exists")]
    Exists(SessionId),

    #[error("no session {0}")]
    NotFound(SessionId),

    #[error("session driver has stopped")]
    Closed,

    #[error(transparent)]
    Sim(#[from] SimError),
}

pub type SessionResult<T> = Result<T, SessionError>;
