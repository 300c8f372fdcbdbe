//! Evidence records attached to an authority source.

use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

/// A dated, typed and optionally cited observation about a source.
///
/// Evidence is immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    /// Free-text label such as "Corporate Charter" or "Legal Document".
    #[serde(rename = "type")]
    pub kind: String,

    pub description: String,

    /// Citation or reference; empty when none was given.
    #[serde(default)]
    pub source: String,

    #[serde(default = "Timestamp::now")]
    pub timestamp: Timestamp,
}

impl Evidence {
    pub fn new(kind: impl Into<String>, description: impl Into<String>, timestamp: Timestamp) -> Self {
        Self {
            kind: kind.into(),
            description: description.into(),
            source: String::new(),
            timestamp,
        }
    }

    /// Set the citation.
    pub fn with_source(mut self, reference: impl Into<String>) -> Self {
        self.source = reference.into();
        self
    }

    /// Whether a citation was recorded.
    pub fn has_source(&self) -> bool {
        !self.source.is_empty()
    }
}
