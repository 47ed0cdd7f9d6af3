// JSON snapshot store - one pretty-printed file per poll
use crate::application::errors::StorageError;
use crate::application::snapshot_repository::SnapshotRepository;
use crate::domain::snapshot::Snapshot;
use async_trait::async_trait;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct JsonSnapshotStore {
    output_dir: PathBuf,
}

impl JsonSnapshotStore {
    /// Open the store, creating the output directory if needed.
    pub fn open(output_dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let output_dir = output_dir.into();
        std::fs::create_dir_all(&output_dir).map_err(|source| StorageError::Io {
            path: output_dir.clone(),
            source,
        })?;
        Ok(Self { output_dir })
    }
}

#[async_trait]
impl SnapshotRepository for JsonSnapshotStore {
    async fn write(&self, snapshot: &Snapshot) -> Result<PathBuf, StorageError> {
        let path = self.output_dir.join(snapshot.file_name());
        let data = to_pretty_json(snapshot)?;
        write_atomic(&path, &data)?;
        Ok(path)
    }

    fn location(&self) -> String {
        self.output_dir.display().to_string()
    }
}

pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, StorageError> {
    let mut data = serde_json::to_vec_pretty(value)?;
    data.push(b'\n');
    Ok(data)
}

/// Temp path next to `path`; never matches the snapshot glob.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write to a temp file, then rename over `path`.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<(), StorageError> {
    let temp = temp_path(path);
    let io_err = |source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Err(source) = std::fs::write(&temp, data) {
        let _ = std::fs::remove_file(&temp);
        return Err(io_err(source));
    }
    std::fs::rename(&temp, path).map_err(io_err)
}
