//! Error types for intent resolution.

use gm_ledger::{ErrorKind, LedgerError};
use thiserror::Error;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors that can occur while resolving a game beat.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The ledger refused or failed an operation.
    #[error("{0}")]
    Ledger(#[from] LedgerError),

    /// The narration backend could not be reached.
    #[error("narration backend unavailable: {0}")]
    Unavailable(String),

    /// The intent object is not one this engine understands.
    #[error("invalid intent: {0}")]
    InvalidIntent(String),

    /// A journal record could not be encoded or decoded.
    #[error("journal error: {0}")]
    Journal(#[from] serde_json::Error),
}

impl SessionError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Ledger(e) => e.kind(),
            Self::Unavailable(_) => ErrorKind::Unavailable,
            Self::InvalidIntent(_) => ErrorKind::InvalidArgument,
            Self::Journal(_) => ErrorKind::Internal,
        }
    }
}
