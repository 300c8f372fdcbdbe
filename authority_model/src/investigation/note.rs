//! Free-text investigation notes.

use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

/// A timestamped note on an investigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    #[serde(default = "Timestamp::now")]
    pub timestamp: Timestamp,
    pub note: String,
}

impl Note {
    pub fn new(note: impl Into<String>, timestamp: Timestamp) -> Self {
        Self {
            timestamp,
            note: note.into(),
        }
    }
}
