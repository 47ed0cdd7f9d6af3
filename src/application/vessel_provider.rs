// Provider trait for fetching vessel positions
use crate::domain::geofence::BoundingBox;
use crate::domain::vessel::VesselRecord;
use async_trait::async_trait;

#[async_trait]
pub trait VesselProvider: Send + Sync {
    /// Short provider name used in logs
    fn name(&self) -> &str;

    /// Fetch current positions inside `zone`.
    ///
    /// Never fails: transport and parse problems are logged by the
    /// implementation and surface as an empty or partial list.
    async fn fetch_in_zone(&self, zone: &BoundingBox) -> Vec<VesselRecord>;
}
