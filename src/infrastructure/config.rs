// Configuration - layered defaults, optional file and AIS__ environment overrides
use crate::domain::geofence::BoundingBox;
use config::{builder::DefaultState, ConfigBuilder, Environment};
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "config/ais";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub zone: BoundingBox,
    pub provider: ProviderSettings,
    pub digitraffic: DigitrafficSettings,
    pub myshiptracking: MyShipTrackingSettings,
    pub storage: StorageSettings,
    pub query: QuerySettings,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Digitraffic,
    MyShipTracking,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProviderSettings {
    pub kind: ProviderKind,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DigitrafficSettings {
    pub locations_url: String,
    pub vessels_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MyShipTrackingSettings {
    pub zone_url: String,
    pub api_key: String,
    pub response: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    pub output_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct QuerySettings {
    pub snapshot_dir: String,
    pub output_prefix: String,
    /// Narrower box for the offline query; falls back to `zone`
    pub zone: Option<BoundingBox>,
}

impl AppConfig {
    pub fn query_zone(&self) -> BoundingBox {
        self.query.zone.unwrap_or(self.zone)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.digitraffic.timeout_secs == 0 || self.myshiptracking.timeout_secs == 0 {
            anyhow::bail!("provider timeout_secs must be at least 1");
        }
        Ok(())
    }
}

/// Built-in defaults: Helsinki West Harbour box and the public Digitraffic feed.
fn with_defaults(
    builder: ConfigBuilder<DefaultState>,
) -> anyhow::Result<ConfigBuilder<DefaultState>> {
    Ok(builder
        .set_default("zone.min_lat", 60.10)?
        .set_default("zone.max_lat", 60.30)?
        .set_default("zone.min_lon", 24.70)?
        .set_default("zone.max_lon", 25.30)?
        .set_default("provider.kind", "digitraffic")?
        .set_default(
            "digitraffic.locations_url",
            "https://meri.digitraffic.fi/api/ais/v1/locations",
        )?
        .set_default("digitraffic.vessels_url", "https://meri.digitraffic.fi/api/ais/v1/vessels")?
        .set_default("digitraffic.timeout_secs", 10_i64)?
        .set_default(
            "myshiptracking.zone_url",
            "https://api.myshiptracking.com/v2/vessels-in-zone",
        )?
        .set_default("myshiptracking.api_key", "")?
        .set_default("myshiptracking.response", "simple")?
        .set_default("myshiptracking.timeout_secs", 15_i64)?
        .set_default("storage.output_dir", "ais_data")?
        .set_default("query.snapshot_dir", "ais_data")?
        .set_default("query.output_prefix", "west_terminal")?)
}

fn finish(builder: ConfigBuilder<DefaultState>) -> anyhow::Result<AppConfig> {
    let settings = builder.build()?;
    let config: AppConfig = settings.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

/// Defaults, then the optional config file, then `AIS__*` environment variables.
pub fn load_app_config(path: &str) -> anyhow::Result<AppConfig> {
    let builder = with_defaults(config::Config::builder())?
        .add_source(config::File::with_name(path).required(false))
        .add_source(Environment::with_prefix("AIS").separator("__").try_parsing(true));

    finish(builder)
}

#[cfg(test)]
pub(crate) fn load_from_toml(toml: &str) -> anyhow::Result<AppConfig> {
    let builder = with_defaults(config::Config::builder())?
        .add_source(config::File::from_str(toml, config::FileFormat::Toml));
    finish(builder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = load_from_toml("").unwrap();

        assert_eq!(config.provider.kind, ProviderKind::Digitraffic);
        assert_eq!(config.zone, BoundingBox::new(60.10, 60.30, 24.70, 25.30).unwrap());
        assert_eq!(config.query_zone(), config.zone);
        assert_eq!(config.storage.output_dir, "ais_data");
        assert_eq!(config.query.output_prefix, "west_terminal");
        assert_eq!(config.digitraffic.timeout_secs, 10);
        assert_eq!(config.myshiptracking.timeout_secs, 15);
        assert_eq!(config.myshiptracking.response, "simple");
    }

    #[test]
    fn test_file_overrides_defaults() {
        let config = load_from_toml(
            r#"
            [zone]
            min_lat = 33.90
            max_lat = 34.00
            min_lon = 130.85
            max_lon = 131.05

            [provider]
            kind = "myshiptracking"

            [myshiptracking]
            api_key = "abc123"

            [storage]
            output_dir = "ais_data_kanmon"

            [query.zone]
            min_lat = 33.94
            max_lat = 33.96
            min_lon = 130.90
            max_lon = 130.95
            "#,
        )
        .unwrap();

        assert_eq!(config.provider.kind, ProviderKind::MyShipTracking);
        assert_eq!(config.myshiptracking.api_key, "abc123");
        assert_eq!(config.storage.output_dir, "ais_data_kanmon");
        assert!(config.zone.contains(33.95, 130.9));
        assert!(!config.query_zone().contains(33.91, 130.9));
        assert!(config.query_zone().contains(33.95, 130.92));
    }

    #[test]
    fn test_rejects_inverted_zone() {
        let result = load_from_toml(
            r#"
            [zone]
            min_lat = 60.30
            max_lat = 60.10
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let result = load_from_toml(
            r#"
            [digitraffic]
            timeout_secs = 0
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_unknown_provider() {
        let result = load_from_toml(
            r#"
            [provider]
            kind = "marinetraffic"
            "#,
        );
        assert!(result.is_err());
    }
}
