// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod digitraffic_provider;
pub mod lenient;
pub mod myshiptracking_provider;
pub mod provider_error;
pub mod snapshot_archive;
pub mod snapshot_store;

#[cfg(test)]
pub mod stub_server;
