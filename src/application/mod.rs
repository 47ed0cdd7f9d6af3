// Application layer - Poll loop, offline query and the ports they depend on
pub mod clock;
pub mod errors;
pub mod offline_query;
pub mod scheduler;
pub mod snapshot_repository;
pub mod vessel_provider;
