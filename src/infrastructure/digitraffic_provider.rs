// Digitraffic provider - two-endpoint feed joined on mmsi
use crate::application::errors::MalformedRecord;
use crate::application::vessel_provider::VesselProvider;
use crate::domain::geofence::{coerce_coordinate, BoundingBox};
use crate::domain::vessel::{NavigationStatus, VesselRecord};
use crate::infrastructure::config::DigitrafficSettings;
use crate::infrastructure::lenient;
use crate::infrastructure::provider_error::{build_http_client, get_json, ProviderError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct LocationsResponse {
    #[serde(default)]
    features: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct LocationFeature {
    #[serde(default, deserialize_with = "lenient::optional_mmsi")]
    mmsi: Option<u64>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    geometry: Geometry,
    #[serde(default, deserialize_with = "lenient::or_default")]
    properties: LocationProperties,
}

#[derive(Debug, Default, Deserialize)]
struct Geometry {
    #[serde(default)]
    coordinates: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct LocationProperties {
    #[serde(default, deserialize_with = "lenient::optional_mmsi")]
    mmsi: Option<u64>,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    sog: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    cog: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    heading: Option<f64>,
    #[serde(rename = "navStat", default, deserialize_with = "lenient::optional_nav_status")]
    nav_stat: Option<NavigationStatus>,
}

#[derive(Debug, Deserialize)]
struct VesselMetadata {
    mmsi: u64,
    name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DigitrafficProvider {
    client: Client,
    locations_url: String,
    vessels_url: String,
}

impl DigitrafficProvider {
    pub fn new(settings: &DigitrafficSettings) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_http_client(Duration::from_secs(settings.timeout_secs))?,
            locations_url: settings.locations_url.clone(),
            vessels_url: settings.vessels_url.clone(),
        })
    }

    async fn fetch_locations(&self) -> Result<Vec<Value>, ProviderError> {
        let response: LocationsResponse =
            get_json(self.client.get(&self.locations_url), "locations").await?;
        Ok(response.features)
    }

    async fn fetch_vessel_names(&self) -> Result<HashMap<u64, String>, ProviderError> {
        let vessels: Vec<Value> = get_json(self.client.get(&self.vessels_url), "vessels").await?;
        Ok(index_vessel_names(vessels))
    }
}

#[async_trait]
impl VesselProvider for DigitrafficProvider {
    fn name(&self) -> &str {
        "digitraffic"
    }

    async fn fetch_in_zone(&self, zone: &BoundingBox) -> Vec<VesselRecord> {
        let features = match self.fetch_locations().await {
            Ok(features) => features,
            Err(e) => {
                tracing::warn!("Error fetching locations: {}", e);
                return Vec::new();
            }
        };

        // Names are optional; positions still go out as "Unknown"
        let names = match self.fetch_vessel_names().await {
            Ok(names) => names,
            Err(e) => {
                tracing::warn!("Error fetching vessels: {}", e);
                HashMap::new()
            }
        };

        normalize_locations(features, &names, zone)
    }
}

/// mmsi -> name, skipping metadata entries that do not parse.
fn index_vessel_names(vessels: Vec<Value>) -> HashMap<u64, String> {
    vessels
        .into_iter()
        .filter_map(|v| serde_json::from_value::<VesselMetadata>(v).ok())
        .filter_map(|m| m.name.map(|name| (m.mmsi, name)))
        .collect()
}

fn normalize_locations(
    features: Vec<Value>,
    names: &HashMap<u64, String>,
    zone: &BoundingBox,
) -> Vec<VesselRecord> {
    let mut records = Vec::with_capacity(features.len());
    for feature in features {
        match normalize_feature(feature, names) {
            Ok(record) if zone.contains(record.lat, record.lon) => records.push(record),
            Ok(_) => {}
            Err(e) => tracing::debug!("Dropping location: {}", e),
        }
    }
    records
}

fn normalize_feature(
    feature: Value,
    names: &HashMap<u64, String>,
) -> Result<VesselRecord, MalformedRecord> {
    let feature: LocationFeature =
        serde_json::from_value(feature).map_err(|e| MalformedRecord::new(e.to_string()))?;

    let (lon, lat) = match feature.geometry.coordinates.as_slice() {
        [lon, lat] => (coordinate(lon)?, coordinate(lat)?),
        _ => return Err(MalformedRecord::new("coordinates are not a [lon, lat] pair")),
    };

    let props = feature.properties;
    let mmsi = feature
        .mmsi
        .or(props.mmsi)
        .ok_or_else(|| MalformedRecord::new("location without mmsi"))?;

    Ok(VesselRecord::new(mmsi, names.get(&mmsi).cloned(), lat, lon)
        .with_motion(props.sog, props.cog, props.heading)
        .with_navigation_status(props.nav_stat))
}

fn coordinate(value: &Value) -> Result<f64, MalformedRecord> {
    coerce_coordinate(Some(value)).map_err(|e| MalformedRecord::new(e.to_string()))
}
