//! JSON-file record store for the contribution leaderboard.

pub mod records;

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

pub use records::ContributionRecord;

/// All contribution records, keyed by username.
pub type Records = BTreeMap<String, ContributionRecord>;

/// Handle to the JSON file holding every [`ContributionRecord`].
///
/// The file is always read in full and written in full. There is no
/// locking; a second writer racing a [`RecordStore::save`] wins silently.
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    /// Bind a store to the given file path. The file does not need to exist.
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every record. A missing file is an empty store.
    pub fn load(&self) -> Result<Records, StoreError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No record file yet, starting empty");
                return Ok(Records::new());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        if raw.trim().is_empty() {
            return Ok(Records::new());
        }

        let records: Records = serde_json::from_str(&raw).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;

        for (username, record) in &records {
            if !record.gifted_count_consistent() {
                tracing::warn!(
                    username = %username,
                    gifted_subs_count = record.gifted_subs_count,
                    per_tier_sum = ?record.per_tier_gifted_total(),
                    "Gifted sub count disagrees with per-tier counts"
                );
            }
        }

        tracing::debug!(path = %self.path.display(), count = records.len(), "Loaded records");
        Ok(records)
    }

    /// Overwrite the file with the full record set.
    pub fn save(&self, records: &Records) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let json = to_indented_json(records).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;

        std::fs::write(&self.path, json).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        tracing::debug!(path = %self.path.display(), count = records.len(), "Saved records");
        Ok(())
    }
}

/// Four-space indentation, matching files written by earlier versions of the tool.
fn to_indented_json(records: &Records) -> Result<Vec<u8>, serde_json::Error> {
    let mut out = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    records.serialize(&mut ser)?;
    Ok(out)
}

/// Record store error type.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid record file {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests;
