// Repository trait for snapshot persistence
use crate::application::errors::StorageError;
use crate::domain::snapshot::Snapshot;
use async_trait::async_trait;
use std::path::PathBuf;

#[async_trait]
pub trait SnapshotRepository: Send + Sync {
    /// Persist one snapshot and return where it landed
    async fn write(&self, snapshot: &Snapshot) -> Result<PathBuf, StorageError>;

    /// Human readable location for log lines
    fn location(&self) -> String;
}
