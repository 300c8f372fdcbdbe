//! On-disk layout of a single investigation file.

use authority_model::Investigation;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{DeskError, Result};

/// Format version written into every file.
pub const SCHEMA_VERSION: u32 = 1;

/// Extension of investigation files.
pub const FILE_EXTENSION: &str = "json";

/// Files without a version field predate versioning and are version 1.
fn unversioned() -> u32 {
    1
}

#[derive(Serialize)]
struct InvestigationFileRef<'a> {
    schema_version: u32,
    #[serde(flatten)]
    investigation: &'a Investigation,
}

/// A persisted investigation together with its format version.
#[derive(Debug, Deserialize)]
pub struct InvestigationFile {
    #[serde(default = "unversioned")]
    pub schema_version: u32,
    #[serde(flatten)]
    pub investigation: Investigation,
}

/// Whether a directory entry looks like an investigation file.
pub fn is_investigation_file(path: &Path) -> bool {
    path.is_file() && path.extension().is_some_and(|ext| ext == FILE_EXTENSION)
}

/// Read and decode one investigation file.
///
/// The file stem must equal the stored `investigation_id`, otherwise the
/// next save would write a second file for the same id.
pub fn read_investigation(path: &Path) -> Result<Investigation> {
    let contents = fs::read_to_string(path)?;
    let file: InvestigationFile = serde_json::from_str(&contents)?;
    if file.schema_version > SCHEMA_VERSION {
        return Err(DeskError::UnsupportedSchema {
            found: file.schema_version,
            supported: SCHEMA_VERSION,
        });
    }

    let stem = path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    if stem != file.investigation.investigation_id.as_str() {
        return Err(DeskError::FileNameMismatch {
            file_stem: stem,
            investigation_id: file.investigation.investigation_id,
        });
    }
    Ok(file.investigation)
}

/// Encode an investigation as pretty-printed JSON with a trailing newline.
pub fn encode_investigation(investigation: &Investigation) -> Result<Vec<u8>> {
    let record = InvestigationFileRef {
        schema_version: SCHEMA_VERSION,
        investigation,
    };
    let mut bytes = serde_json::to_vec_pretty(&record)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Replace `path` with the encoded investigation.
///
/// The bytes go to a temporary file in `dir` that is synced and then renamed
/// over `path`, so the target is either the old or the new content.
pub fn write_investigation(dir: &Path, path: &Path, investigation: &Investigation) -> Result<()> {
    let bytes = encode_investigation(investigation)?;

    let mut tmp = tempfile::Builder::new()
        .prefix(".investigation-")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        writer.write_all(&bytes)?;
        writer.flush()?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
