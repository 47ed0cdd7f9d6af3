// Snapshot archive - read side of the JSON snapshot directory
use crate::application::errors::{QueryInputError, StorageError};
use crate::application::offline_query::SnapshotArchive;
use crate::domain::snapshot::{FilteredRecord, StoredSnapshot, SNAPSHOT_FILE_GLOB};
use crate::infrastructure::snapshot_store::{to_pretty_json, write_atomic};
use glob::Pattern;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct JsonSnapshotArchive {
    dir: PathBuf,
    pattern: Pattern,
}

impl JsonSnapshotArchive {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, glob::PatternError> {
        Ok(Self {
            dir: dir.into(),
            pattern: Pattern::new(SNAPSHOT_FILE_GLOB)?,
        })
    }
}

impl SnapshotArchive for JsonSnapshotArchive {
    fn snapshot_paths(&self) -> Vec<PathBuf> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Cannot list {}: {}", self.dir.display(), e);
                return Vec::new();
            }
        };

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|name| self.pattern.matches(name))
            })
            .collect();

        // Not a contract, just stable output between runs
        paths.sort();
        paths
    }

    fn load(&self, path: &Path) -> Result<StoredSnapshot, QueryInputError> {
        let text = std::fs::read_to_string(path).map_err(|source| QueryInputError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&text).map_err(|source| QueryInputError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn publish(&self, path: &Path, records: &[FilteredRecord]) -> Result<(), StorageError> {
        write_atomic(path, &to_pretty_json(records)?)
    }
}
