//! Error types for the mechanics engine.

/// Errors that can occur during mechanics operations.
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// A trigger preset with this name is not shipped.
    #[error("unknown trigger preset: {0}")]
    UnknownPreset(String),

    /// A position label could not be parsed.
    #[error("unknown position: {0}")]
    UnknownPosition(String),

    /// An effect label could not be parsed.
    #[error("unknown effect: {0}")]
    UnknownEffect(String),

    /// A quality label could not be parsed.
    #[error("unknown quality: {0}")]
    UnknownQuality(String),
}

/// Convenience result type for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;
