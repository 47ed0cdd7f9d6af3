// Offline query - re-extract vessels by date prefix and geofence from stored snapshots
use crate::application::errors::{QueryInputError, StorageError};
use crate::domain::geofence::{coerce_coordinate, BoundingBox, CoordinateError};
use crate::domain::snapshot::{FilteredRecord, StoredSnapshot};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Read access to a directory of stored snapshots, plus publishing of the
/// aggregated result.
pub trait SnapshotArchive: Send + Sync {
    /// Every file following the snapshot naming pattern
    fn snapshot_paths(&self) -> Vec<PathBuf>;

    fn load(&self, path: &Path) -> Result<StoredSnapshot, QueryInputError>;

    fn publish(&self, path: &Path, records: &[FilteredRecord]) -> Result<(), StorageError>;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOutcome {
    pub records: Vec<FilteredRecord>,
    pub files_found: usize,
    pub files_matched: usize,
    pub files_skipped: usize,
}

#[derive(Clone)]
pub struct OfflineQuery {
    archive: Arc<dyn SnapshotArchive>,
}

impl OfflineQuery {
    pub fn new(archive: Arc<dyn SnapshotArchive>) -> Self {
        Self { archive }
    }

    /// Scan every stored snapshot whose timestamp starts with `target_date`
    /// and keep the vessels inside `zone`.
    ///
    /// Unreadable files are skipped. Result order follows the archive's
    /// enumeration order, then the in-snapshot vessel order.
    pub fn run(&self, target_date: &str, zone: &BoundingBox) -> QueryOutcome {
        let paths = self.archive.snapshot_paths();
        let mut outcome = QueryOutcome {
            files_found: paths.len(),
            ..QueryOutcome::default()
        };

        tracing::info!("Scanning {} files for {}", paths.len(), target_date);

        for path in &paths {
            let snapshot = match self.archive.load(path) {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    tracing::warn!("Skipping unreadable file: {}", e);
                    outcome.files_skipped += 1;
                    continue;
                }
            };

            if !snapshot.timestamp_utc.starts_with(target_date) {
                continue;
            }

            outcome.files_matched += 1;
            outcome.records.extend(extract_matches(&snapshot, zone));
        }

        tracing::info!(
            "Found {} records in {} of {} files ({} skipped)",
            outcome.records.len(),
            outcome.files_matched,
            outcome.files_found,
            outcome.files_skipped
        );

        outcome
    }

    /// Write the aggregate. Nothing is written for an empty result.
    pub fn export(
        &self,
        records: &[FilteredRecord],
        output: &Path,
    ) -> Result<Option<PathBuf>, StorageError> {
        if records.is_empty() {
            return Ok(None);
        }

        self.archive.publish(output, records)?;
        tracing::info!("Saved {} records to {}", records.len(), output.display());
        Ok(Some(output.to_path_buf()))
    }
}

/// Coordinates of a stored vessel object.
pub fn vessel_position(vessel: &Value) -> Result<(f64, f64), CoordinateError> {
    let lat = coerce_coordinate(vessel.get("lat"))?;
    let lon = coerce_coordinate(vessel.get("lon"))?;
    Ok((lat, lon))
}

pub fn extract_matches(snapshot: &StoredSnapshot, zone: &BoundingBox) -> Vec<FilteredRecord> {
    snapshot
        .vessels
        .iter()
        .filter_map(|vessel| match vessel_position(vessel) {
            Ok((lat, lon)) => zone.contains(lat, lon).then(|| FilteredRecord {
                timestamp_utc: snapshot.timestamp_utc.clone(),
                epoch: snapshot.epoch,
                ship_data: vessel.clone(),
            }),
            Err(e) => {
                tracing::debug!("Skipping vessel without usable position: {}", e);
                None
            }
        })
        .collect()
}
