//! The desk - persistence and lookup for investigations.
//!
//! Each investigation lives in `<data_dir>/<investigation_id>.json`. The desk
//! loads every such file when it opens and owns the in-memory copies from
//! then on; callers never touch the files directly.

mod config;
mod file;

pub use config::*;
pub use file::{InvestigationFile, SCHEMA_VERSION};

use authority_model::{Clock, Investigation, InvestigationId, SystemClock, Timestamp};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DeskError, Result};
use crate::report::ReportWriter;

/// A file that was skipped while opening the desk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Store of investigations backed by a directory of JSON files.
#[derive(Debug)]
pub struct Desk {
    config: DeskConfig,
    clock: Box<dyn Clock>,
    reporter: ReportWriter,
    investigations: BTreeMap<InvestigationId, Investigation>,
    load_failures: Vec<LoadFailure>,
}

impl Desk {
    /// Open the desk using the wall clock.
    pub fn open(config: DeskConfig) -> Result<Self> {
        Self::open_with_clock(config, SystemClock)
    }

    /// Open the desk with a specific clock.
    ///
    /// Creates the data directory if needed and loads every investigation
    /// file in it. Files that cannot be read are logged and skipped.
    pub fn open_with_clock(config: DeskConfig, clock: impl Clock + 'static) -> Result<Self> {
        fs::create_dir_all(&config.data_dir)?;

        let mut desk = Self {
            reporter: ReportWriter::new(config.report.clone()),
            config,
            clock: Box::new(clock),
            investigations: BTreeMap::new(),
            load_failures: Vec::new(),
        };
        desk.load_investigations()?;

        tracing::debug!(
            data_dir = %desk.config.data_dir.display(),
            loaded = desk.investigations.len(),
            skipped = desk.load_failures.len(),
            "Opened investigator desk"
        );
        Ok(desk)
    }

    pub fn config(&self) -> &DeskConfig {
        &self.config
    }

    pub fn data_dir(&self) -> &Path {
        &self.config.data_dir
    }

    /// Current time according to the desk's clock.
    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Files skipped while opening.
    pub fn load_failures(&self) -> &[LoadFailure] {
        &self.load_failures
    }

    /// Path of the file backing an investigation.
    pub fn investigation_path(&self, investigation_id: &str) -> PathBuf {
        self.config
            .data_dir
            .join(format!("{}.{}", investigation_id, file::FILE_EXTENSION))
    }

    fn load_investigations(&mut self) -> Result<()> {
        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in fs::read_dir(&self.config.data_dir)? {
            match entry {
                Ok(entry) => paths.push(entry.path()),
                Err(e) => {
                    tracing::warn!(
                        data_dir = %self.config.data_dir.display(),
                        error = %e,
                        "Skipping unreadable directory entry"
                    );
                }
            }
        }
        paths.retain(|path| file::is_investigation_file(path));
        paths.sort();

        for path in paths {
            match file::read_investigation(&path) {
                Ok(inv) => {
                    tracing::debug!(path = %path.display(), investigation_id = %inv.investigation_id, "Loaded investigation");
                    self.investigations.insert(inv.investigation_id.clone(), inv);
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable investigation file");
                    self.load_failures.push(LoadFailure {
                        path,
                        message: e.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Create, persist and register a new investigation.
    ///
    /// Nothing is registered if the file cannot be written.
    pub fn create_investigation(
        &mut self,
        investigation_id: impl Into<InvestigationId>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<&mut Investigation> {
        let id = investigation_id.into();
        validate_id(&id)?;
        if self.investigations.contains_key(&id) {
            return Err(DeskError::AlreadyExists(id));
        }

        let inv = Investigation::new(id.clone(), title, description, self.clock.now());
        self.save_investigation(&inv)?;
        tracing::info!(investigation_id = %id, "Created investigation");

        Ok(self.investigations.entry(id).or_insert(inv))
    }

    pub fn get_investigation(&self, investigation_id: &str) -> Option<&Investigation> {
        self.investigations.get(investigation_id)
    }

    /// Mutable access to the in-memory copy. Changes reach disk on the next save.
    pub fn get_investigation_mut(&mut self, investigation_id: &str) -> Option<&mut Investigation> {
        self.investigations.get_mut(investigation_id)
    }

    /// All loaded investigations in ascending id order.
    pub fn list_investigations(&self) -> Vec<&Investigation> {
        self.investigations.values().collect()
    }

    /// Write an investigation to its file, replacing any previous content.
    pub fn save_investigation(&self, investigation: &Investigation) -> Result<PathBuf> {
        let path = self.investigation_path(investigation.investigation_id.as_str());
        file::write_investigation(&self.config.data_dir, &path, investigation)?;
        tracing::debug!(path = %path.display(), "Saved investigation");
        Ok(path)
    }

    /// Save the desk's copy of an investigation.
    pub fn persist(&self, investigation_id: &str) -> Result<PathBuf> {
        let inv = self
            .get_investigation(investigation_id)
            .ok_or_else(|| DeskError::InvestigationNotFound(investigation_id.into()))?;
        self.save_investigation(inv)
    }

    /// Apply a change to an investigation and save it.
    ///
    /// The closure receives the desk's clock for stamping new records. If the
    /// closure or the save fails, the in-memory copy is restored.
    pub fn update_investigation<T, F>(&mut self, investigation_id: &str, change: F) -> Result<T>
    where
        F: FnOnce(&mut Investigation, &dyn Clock) -> authority_model::Result<T>,
    {
        let inv = self
            .investigations
            .get_mut(investigation_id)
            .ok_or_else(|| DeskError::InvestigationNotFound(investigation_id.into()))?;

        let snapshot = inv.clone();
        let output = match change(&mut *inv, &*self.clock) {
            Ok(output) => output,
            Err(e) => {
                *inv = snapshot;
                return Err(e.into());
            }
        };

        if let Err(e) = self.persist(investigation_id) {
            if let Some(inv) = self.investigations.get_mut(investigation_id) {
                *inv = snapshot;
            }
            return Err(e);
        }
        Ok(output)
    }

    /// Render the report for an investigation.
    ///
    /// An unknown id yields a "not found" message rather than an error.
    pub fn generate_report(&self, investigation_id: &str) -> String {
        match self.get_investigation(investigation_id) {
            Some(inv) => self.reporter.render(inv),
            None => format!("Investigation {} not found", investigation_id),
        }
    }
}

/// Investigation ids double as file stems.
fn validate_id(id: &InvestigationId) -> Result<()> {
    let raw = id.as_str();
    let unusable = raw.is_empty()
        || raw == "."
        || raw == ".."
        || raw.contains(|c: char| matches!(c, '/' | '\\' | '\0'));
    if unusable {
        return Err(DeskError::InvalidId(raw.to_string()));
    }
    Ok(())
}
