//! Session-specific error types.

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, SessionId};

/// Errors returned by session lifecycle and query operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The session never existed, was ended, or idled out.
    #[error("Unknown session: {0}")]
    UnknownSession(SessionId),

    /// The session store could not complete the operation.
    #[error("Session storage failed: {0}")]
    Storage(String),
}

impl SessionError {
    pub fn unknown(id: SessionId) -> Self {
        SessionError::UnknownSession(id)
    }

    pub fn storage(message: impl Into<String>) -> Self {
        SessionError::Storage(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::UnknownSession(_) => ErrorCode::UnknownSession,
            SessionError::Storage(_) => ErrorCode::StorageError,
        }
    }

    /// True when the UI should start a fresh session.
    pub fn requires_new_session(&self) -> bool {
        matches!(self, SessionError::UnknownSession(_))
    }
}
