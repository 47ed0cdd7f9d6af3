// Command handlers - wire adapters into the application services
use crate::application::offline_query::{OfflineQuery, QueryOutcome};
use crate::application::scheduler::{PollSchedule, RunSummary, SnapshotScheduler};
use crate::application::vessel_provider::VesselProvider;
use crate::infrastructure::config::{AppConfig, ProviderKind};
use crate::infrastructure::digitraffic_provider::DigitrafficProvider;
use crate::infrastructure::myshiptracking_provider::MyShipTrackingProvider;
use crate::infrastructure::snapshot_archive::JsonSnapshotArchive;
use crate::infrastructure::snapshot_store::JsonSnapshotStore;
use crate::presentation::cli::{PollArgs, QueryArgs};
use std::path::PathBuf;
use std::sync::Arc;

pub fn build_provider(
    kind: ProviderKind,
    config: &AppConfig,
) -> anyhow::Result<Arc<dyn VesselProvider>> {
    let provider: Arc<dyn VesselProvider> = match kind {
        ProviderKind::Digitraffic => Arc::new(DigitrafficProvider::new(&config.digitraffic)?),
        ProviderKind::MyShipTracking => {
            if config.myshiptracking.api_key.trim().is_empty() {
                anyhow::bail!(
                    "myshiptracking.api_key must be set (e.g. AIS__MYSHIPTRACKING__API_KEY)"
                );
            }
            Arc::new(MyShipTrackingProvider::new(&config.myshiptracking)?)
        }
    };
    Ok(provider)
}

pub async fn run_poll(config: &AppConfig, args: &PollArgs) -> anyhow::Result<RunSummary> {
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.storage.output_dir));

    let kind = args.provider.map(ProviderKind::from).unwrap_or(config.provider.kind);
    let provider = build_provider(kind, config)?;
    let store = Arc::new(JsonSnapshotStore::open(output_dir)?);
    let scheduler = SnapshotScheduler::new(
        provider,
        store,
        config.zone,
        PollSchedule::from_secs(args.interval, args.duration),
    );

    Ok(scheduler.run().await?)
}

pub fn default_output_path(prefix: &str, date: &str) -> PathBuf {
    PathBuf::from(format!("{}_{}.json", prefix, date))
}

pub fn run_query(config: &AppConfig, args: &QueryArgs) -> anyhow::Result<QueryOutcome> {
    let date = args.date.format("%Y-%m-%d").to_string();
    let dir = args
        .dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.query.snapshot_dir));
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&config.query.output_prefix, &date));

    let query = OfflineQuery::new(Arc::new(JsonSnapshotArchive::new(dir)?));
    let outcome = query.run(&date, &config.query_zone());

    if query.export(&outcome.records, &output)?.is_none() {
        tracing::info!("No matching records for {}, nothing written", date);
    }

    Ok(outcome)
}
