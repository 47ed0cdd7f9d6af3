// Command-line surface
use crate::infrastructure::config::{ProviderKind, DEFAULT_CONFIG_PATH};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ais-snapshot")]
#[command(
    version,
    about = "Scheduled AIS snapshot recorder and offline geofence query",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (extension optional)
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(short, long, global = true, default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Poll the configured provider and write one snapshot per tick
    Poll(PollArgs),

    /// Extract stored vessels for one day inside the query zone
    Query(QueryArgs),
}

#[derive(Args, Debug)]
pub struct PollArgs {
    /// Seconds between polls
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: u64,

    /// Total recording duration in seconds
    #[arg(long, default_value_t = 600)]
    pub duration: u64,

    /// Snapshot directory, overrides storage.output_dir
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Provider, overrides provider.kind
    #[arg(long, value_enum)]
    pub provider: Option<ProviderArg>,
}

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// UTC day to extract, YYYY-MM-DD
    #[arg(long, value_parser = parse_date)]
    pub date: NaiveDate,

    /// Snapshot directory, overrides query.snapshot_dir
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Output file, defaults to <query.output_prefix>_<date>.json
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderArg {
    Digitraffic,
    Myshiptracking,
}

impl From<ProviderArg> for ProviderKind {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Digitraffic => ProviderKind::Digitraffic,
            ProviderArg::Myshiptracking => ProviderKind::MyShipTracking,
        }
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}
