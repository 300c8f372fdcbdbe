//! Authority sources - the entities, documents or bodies under investigation.

mod evidence;

pub use evidence::*;

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use uuid::Uuid;

use crate::time::Timestamp;

/// Identifier of an authority source, unique within its investigation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceId(pub String);

impl SourceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Create a fresh random id of the form `AUTH-XXXXXXXX`.
    pub fn generate() -> Self {
        let raw = Uuid::new_v4().simple().to_string();
        Self(format!("AUTH-{}", raw[..8].to_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SourceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for SourceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for SourceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for SourceId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A source of authority being investigated.
///
/// Evidence is append-only. Connections are kept symmetric by the owning
/// [`Investigation`](crate::Investigation), so they can only be read here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthoritySource {
    pub source_id: SourceId,
    pub name: String,
    pub description: String,

    /// Free-text category, e.g. "Executive" or "Governance".
    pub authority_type: String,

    #[serde(default = "Timestamp::now")]
    pub created_at: Timestamp,

    #[serde(default)]
    evidence: Vec<Evidence>,

    /// Connected source ids in the order they were linked.
    #[serde(default)]
    connections: Vec<SourceId>,
}

impl AuthoritySource {
    /// Create a source with no evidence and no connections.
    pub fn new(
        source_id: impl Into<SourceId>,
        name: impl Into<String>,
        description: impl Into<String>,
        authority_type: impl Into<String>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            name: name.into(),
            description: description.into(),
            authority_type: authority_type.into(),
            created_at,
            evidence: Vec::new(),
            connections: Vec::new(),
        }
    }

    /// Evidence in the order it was recorded.
    pub fn evidence(&self) -> &[Evidence] {
        &self.evidence
    }

    pub fn connections(&self) -> &[SourceId] {
        &self.connections
    }

    pub fn is_connected_to(&self, other: &str) -> bool {
        self.connections.iter().any(|c| c.as_str() == other)
    }

    pub(crate) fn push_evidence(&mut self, evidence: Evidence) {
        self.evidence.push(evidence);
    }

    /// Record a one-way link. Returns false if it was already present.
    pub(crate) fn link(&mut self, other: &SourceId) -> bool {
        if self.is_connected_to(other.as_str()) {
            return false;
        }
        self.connections.push(other.clone());
        true
    }
}
