use gm_mechanics::MechError;

/// Alias for `Result<T, LedgerError>`.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Coarse error classification callers can branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A named campaign, clock, or preset does not exist.
    NotFound,
    /// The request itself is malformed.
    InvalidArgument,
    /// A backend is not reachable; retrying may help.
    Unavailable,
    /// Anything else (storage, serialization).
    Internal,
}

/// Errors that can occur when operating on the ledger.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// The named thing does not exist.
    #[error("{entity} not found: \"{name}\"")]
    NotFound {
        /// What was looked up (campaign, clock, ...).
        entity: &'static str,
        /// The name that was not found.
        name: String,
    },

    /// A malformed payload or an unknown preset name.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The store could not read or write state.
    #[error("storage error: {0}")]
    Storage(String),
}

impl LedgerError {
    /// Shorthand for a `NotFound` error.
    pub fn not_found(entity: &'static str, name: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            name: name.into(),
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::Storage(_) => ErrorKind::Internal,
        }
    }
}

impl From<MechError> for LedgerError {
    fn from(e: MechError) -> Self {
        Self::InvalidArgument(e.to_string())
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(e: std::io::Error) -> Self {
        Self::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(e: serde_json::Error) -> Self {
        Self::Storage(e.to_string())
    }
}
