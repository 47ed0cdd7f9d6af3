// Snapshot domain models - one poll's result set and the offline query unit
use super::vessel::VesselRecord;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const SNAPSHOT_FILE_PREFIX: &str = "ais_";
pub const SNAPSHOT_FILE_GLOB: &str = "ais_*_epoch*.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub timestamp_utc: String,
    pub epoch: i64,
    pub poll_index: u64,
    pub vessel_count: usize,
    pub vessels: Vec<VesselRecord>,
}

impl Snapshot {
    /// `vessel_count` is derived here and nowhere else.
    pub fn new(poll_index: u64, captured_at: DateTime<Utc>, vessels: Vec<VesselRecord>) -> Self {
        Self {
            timestamp_utc: captured_at.to_rfc3339_opts(SecondsFormat::Micros, false),
            epoch: captured_at.timestamp(),
            poll_index,
            vessel_count: vessels.len(),
            vessels,
        }
    }

    /// Deterministic file name, e.g. `ais_20260217T101500Z_epoch1771323300.json`.
    pub fn file_name(&self) -> String {
        let token = DateTime::from_timestamp(self.epoch, 0)
            .map(|t| timestamp_token(&t))
            .unwrap_or_else(|| "invalid".to_string());
        format!("{}{}_epoch{}.json", SNAPSHOT_FILE_PREFIX, token, self.epoch)
    }
}

/// Filesystem-safe UTC token.
pub fn timestamp_token(at: &DateTime<Utc>) -> String {
    at.format("%Y%m%dT%H%M%SZ").to_string()
}

/// A vessel re-extracted from a stored snapshot.
///
/// `ship_data` is kept as the stored JSON object so older files with
/// extra or loosely typed fields survive the round trip untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilteredRecord {
    pub timestamp_utc: String,
    pub epoch: Option<i64>,
    pub ship_data: Value,
}

/// Loosely typed view of a stored snapshot file, as read back by the
/// offline query. Missing fields take empty defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StoredSnapshot {
    #[serde(default)]
    pub timestamp_utc: String,
    #[serde(default)]
    pub epoch: Option<i64>,
    #[serde(default)]
    pub vessels: Vec<Value>,
}
