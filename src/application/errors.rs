// Error taxonomy for the acquisition pipeline and the offline query
use std::path::PathBuf;
use thiserror::Error;

/// A provider record that cannot become a canonical vessel record.
/// Recovered per record: the record is dropped, the poll continues.
#[derive(Debug, Error, PartialEq)]
#[error("malformed vessel record: {reason}")]
pub struct MalformedRecord {
    pub reason: String,
}

impl MalformedRecord {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Snapshot persistence failure. Fatal for the run.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Unreadable or corrupt snapshot file found during an offline scan.
/// Recovered per file: the file is skipped.
#[derive(Debug, Error)]
pub enum QueryInputError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
