// Domain layer - Vessel positions, geofences and snapshots
pub mod geofence;
pub mod snapshot;
pub mod vessel;
