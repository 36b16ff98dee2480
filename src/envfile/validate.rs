//! Validate operation
//!
//! Checks that a required set of keys exists and is non-empty in a file,
//! producing a per-key classification the CLI layer renders. A missing file
//! is a reportable condition, not an error.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use super::document::EnvDocument;
use super::parse::parse_lookup;
use super::EnvFileError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyStatus {
    /// Present with a non-empty value.
    Set,
    /// Present but empty after quote stripping.
    Empty,
    /// Not present in the file.
    Missing,
    /// The file itself does not exist.
    FileMissing,
}

#[derive(Debug, Serialize)]
pub struct KeyReport {
    pub key: String,
    pub status: KeyStatus,
}

#[derive(Debug, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub file_found: bool,
    pub keys: Vec<KeyReport>,
}

impl FileReport {
    /// A missing file is invalid even when no keys were required of it.
    pub fn is_valid(&self) -> bool {
        self.file_found && self.keys.iter().all(|k| k.status == KeyStatus::Set)
    }
}

/// Scan `path` and classify every required key.
///
/// Lookups are exact-case; on duplicate keys the last occurrence wins.
pub fn check_file(path: &Path, required: &[String]) -> Result<FileReport, EnvFileError> {
    let Some(doc) = EnvDocument::read(path)? else {
        debug!(file = %path.display(), "validate target missing");
        return Ok(FileReport {
            path: path.to_path_buf(),
            file_found: false,
            keys: required
                .iter()
                .map(|key| KeyReport { key: key.clone(), status: KeyStatus::FileMissing })
                .collect(),
        });
    };

    let mut values: HashMap<String, String> = HashMap::new();
    for line in doc.lines() {
        if let Some((key, value)) = parse_lookup(line) {
            values.insert(key, value);
        }
    }

    let keys = required
        .iter()
        .map(|key| {
            let status = match values.get(key) {
                None => KeyStatus::Missing,
                Some(value) if value.is_empty() => KeyStatus::Empty,
                Some(_) => KeyStatus::Set,
            };
            KeyReport { key: key.clone(), status }
        })
        .collect();

    Ok(FileReport { path: path.to_path_buf(), file_found: true, keys })
}
