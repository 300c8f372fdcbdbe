//! Investigations - named cases bundling authority sources and notes.

mod note;

pub use note::*;

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::error::{ModelError, Result};
use crate::sources::{AuthoritySource, Evidence, SourceId};
use crate::time::Timestamp;

/// Status given to every new investigation.
pub const DEFAULT_STATUS: &str = "active";

/// Identifier of an investigation. Also used as its file stem on disk.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvestigationId(pub String);

impl InvestigationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Create a fresh random id of the form `INV-XXXXXXXX`.
    pub fn generate() -> Self {
        let raw = Uuid::new_v4().simple().to_string();
        Self(format!("INV-{}", raw[..8].to_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for InvestigationId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for InvestigationId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for InvestigationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for InvestigationId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for InvestigationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn default_status() -> String {
    DEFAULT_STATUS.to_string()
}

/// An investigation targeting one or more sources of authority.
///
/// Every connection stored on a source names another source of the same
/// investigation, and connections are always symmetric. Sources arriving
/// with connections already attached are checked and back-linked on entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investigation {
    pub investigation_id: InvestigationId,
    pub title: String,
    pub description: String,

    #[serde(default = "Timestamp::now")]
    pub created_at: Timestamp,

    /// Free-text status, "active" unless changed.
    #[serde(default = "default_status")]
    pub status: String,

    #[serde(default)]
    sources: BTreeMap<SourceId, AuthoritySource>,

    #[serde(default)]
    notes: Vec<Note>,
}

impl Investigation {
    /// Create an active investigation with no sources and no notes.
    pub fn new(
        investigation_id: impl Into<InvestigationId>,
        title: impl Into<String>,
        description: impl Into<String>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            investigation_id: investigation_id.into(),
            title: title.into(),
            description: description.into(),
            created_at,
            status: default_status(),
            sources: BTreeMap::new(),
            notes: Vec::new(),
        }
    }

    /// Register a new authority source.
    ///
    /// Fails if a source with the same id is already registered; use
    /// [`Investigation::replace_authority_source`] to overwrite on purpose.
    ///
    /// Any connections the source already carries must name registered
    /// sources; each of them gets the reverse link.
    pub fn add_authority_source(&mut self, source: AuthoritySource) -> Result<()> {
        if self.sources.contains_key(&source.source_id) {
            return Err(ModelError::DuplicateSource(source.source_id));
        }
        self.check_connections(&source)?;
        self.attach(source);
        Ok(())
    }

    /// Insert or overwrite a source, returning the previous record.
    ///
    /// The previous record's connections carry over to the new one, so peers
    /// linked to the old record stay linked both ways.
    pub fn replace_authority_source(&mut self, mut source: AuthoritySource) -> Result<Option<AuthoritySource>> {
        self.check_connections(&source)?;
        let previous = self.sources.remove(&source.source_id);
        if let Some(old) = &previous {
            for peer in old.connections() {
                source.link(peer);
            }
        }
        self.attach(source);
        Ok(previous)
    }

    /// Append evidence to a registered source.
    pub fn add_evidence(&mut self, source_id: &str, evidence: Evidence) -> Result<()> {
        let source = self
            .sources
            .get_mut(source_id)
            .ok_or_else(|| ModelError::SourceNotFound(source_id.into()))?;
        source.push_evidence(evidence);
        Ok(())
    }

    /// Connect two registered sources in both directions.
    ///
    /// Linking a pair that is already connected changes nothing.
    pub fn add_connection(&mut self, a: &str, b: &str) -> Result<()> {
        let id_a = self.require_source(a)?;
        let id_b = self.require_source(b)?;
        if id_a == id_b {
            return Err(ModelError::SelfConnection(id_a));
        }

        if let Some(source) = self.sources.get_mut(&id_a) {
            source.link(&id_b);
        }
        if let Some(source) = self.sources.get_mut(&id_b) {
            source.link(&id_a);
        }
        Ok(())
    }

    /// Append a timestamped note.
    pub fn add_note(&mut self, text: impl Into<String>, timestamp: Timestamp) {
        self.notes.push(Note::new(text, timestamp));
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    pub fn source(&self, source_id: &str) -> Option<&AuthoritySource> {
        self.sources.get(source_id)
    }

    pub fn has_source(&self, source_id: &str) -> bool {
        self.sources.contains_key(source_id)
    }

    /// Sources in ascending id order.
    pub fn sources(&self) -> impl Iterator<Item = &AuthoritySource> {
        self.sources.values()
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Total evidence entries across all sources.
    pub fn evidence_count(&self) -> usize {
        self.sources.values().map(|s| s.evidence().len()).sum()
    }

    /// Every pre-set connection must name another registered source.
    fn check_connections(&self, source: &AuthoritySource) -> Result<()> {
        for peer in source.connections() {
            if *peer == source.source_id {
                return Err(ModelError::SelfConnection(peer.clone()));
            }
            if !self.sources.contains_key(peer) {
                return Err(ModelError::SourceNotFound(peer.clone()));
            }
        }
        Ok(())
    }

    /// Insert a checked source and add the reverse of each of its links.
    fn attach(&mut self, source: AuthoritySource) {
        let id = source.source_id.clone();
        let peers = source.connections().to_vec();
        self.sources.insert(id.clone(), source);
        for peer in &peers {
            if let Some(other) = self.sources.get_mut(peer) {
                other.link(&id);
            }
        }
    }

    fn require_source(&self, source_id: &str) -> Result<SourceId> {
        self.sources
            .get_key_value(source_id)
            .map(|(id, _)| id.clone())
            .ok_or_else(|| ModelError::SourceNotFound(source_id.into()))
    }
}
