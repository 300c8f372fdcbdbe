//! Error types for desk operations.

use authority_model::{InvestigationId, ModelError};
use thiserror::Error;

/// Result type alias for desk operations.
pub type Result<T> = std::result::Result<T, DeskError>;

/// Errors surfaced by the desk.
#[derive(Debug, Error)]
pub enum DeskError {
    /// No investigation with this id is loaded.
    #[error("Investigation {0} not found")]
    InvestigationNotFound(InvestigationId),

    /// An investigation with this id is already registered.
    #[error("Investigation {0} already exists")]
    AlreadyExists(InvestigationId),

    /// The id cannot be used as a file name.
    #[error("Invalid investigation id '{0}'")]
    InvalidId(String),

    /// The file was written by a newer format version.
    #[error("Unsupported schema version {found} (supported up to {supported})")]
    UnsupportedSchema { found: u32, supported: u32 },

    /// A file's name does not match the investigation it holds.
    #[error("File '{file_stem}.json' holds investigation {investigation_id}")]
    FileNameMismatch {
        file_stem: String,
        investigation_id: InvestigationId,
    },

    /// A model invariant was violated.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration file could not be parsed
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),
}
