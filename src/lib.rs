//! Scheduled AIS vessel-position snapshots and offline geofence queries.
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │   Provider   │───▶│  Scheduler   │───▶│   Snapshot   │
//! │ (Digitraffic,│    │  (poll loop) │    │    Store     │
//! │MyShipTracking│    └──────────────┘    └──────┬───────┘
//! └──────────────┘                               │ ais_*_epoch*.json
//!                                                ▼
//!                                         ┌──────────────┐
//!                                         │Offline Query │
//!                                         │(date + zone) │
//!                                         └──────────────┘
//! ```
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
