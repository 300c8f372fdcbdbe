//! Errors raised by model operations.

use thiserror::Error;

use crate::sources::SourceId;

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

/// Violations of the investigation invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// The referenced authority source is not part of the investigation.
    #[error("Authority source {0} not found")]
    SourceNotFound(SourceId),

    /// An authority source with this id is already registered.
    #[error("Authority source {0} already exists")]
    DuplicateSource(SourceId),

    /// A source cannot be connected to itself.
    #[error("Cannot connect authority source {0} to itself")]
    SelfConnection(SourceId),
}
