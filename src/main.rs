// Main entry point - Dependency injection and command dispatch
use ais_snapshot::infrastructure::config::load_app_config;
use ais_snapshot::presentation::cli::{Cli, Command};
use ais_snapshot::presentation::commands::{run_poll, run_query};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration once; components receive their slice of it
    let config = load_app_config(&cli.config)?;

    match &cli.command {
        Command::Poll(args) => {
            run_poll(&config, args).await?;
        }
        Command::Query(args) => {
            run_query(&config, args)?;
        }
    }

    Ok(())
}
