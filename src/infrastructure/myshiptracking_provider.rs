// MyShipTracking provider - single keyed zone query
use crate::application::errors::MalformedRecord;
use crate::application::vessel_provider::VesselProvider;
use crate::domain::geofence::{coerce_coordinate, BoundingBox};
use crate::domain::vessel::{NavigationStatus, VesselRecord};
use crate::infrastructure::config::MyShipTrackingSettings;
use crate::infrastructure::lenient;
use crate::infrastructure::provider_error::{build_http_client, get_json, ProviderError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Deserialize)]
struct ZoneResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    data: Vec<Value>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ZoneVessel {
    #[serde(default, deserialize_with = "lenient::optional_mmsi")]
    mmsi: Option<u64>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    vessel_name: Option<String>,
    lat: Option<Value>,
    lng: Option<Value>,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    speed: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    course: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    heading: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional_nav_status")]
    nav_status: Option<NavigationStatus>,
}

#[derive(Debug, Clone)]
pub struct MyShipTrackingProvider {
    client: Client,
    zone_url: String,
    api_key: String,
    response_mode: String,
}

impl MyShipTrackingProvider {
    pub fn new(settings: &MyShipTrackingSettings) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_http_client(Duration::from_secs(settings.timeout_secs))?,
            zone_url: settings.zone_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            response_mode: settings.response.clone(),
        })
    }

    fn build_zone_url(&self, zone: &BoundingBox) -> String {
        format!(
            "{}?min_lat={}&max_lat={}&min_lng={}&max_lng={}&response={}",
            self.zone_url,
            zone.min_lat(),
            zone.max_lat(),
            zone.min_lon(),
            zone.max_lon(),
            urlencoding::encode(&self.response_mode)
        )
    }

    async fn fetch_zone(&self, zone: &BoundingBox) -> Result<Vec<Value>, ProviderError> {
        let url = self.build_zone_url(zone);
        tracing::debug!("Fetching: {}", url);

        let request = self.client.get(&url).header(API_KEY_HEADER, &self.api_key);
        let response: ZoneResponse = get_json(request, "vessels-in-zone").await?;

        if response.status != "success" {
            return Err(ProviderError::Api {
                message: response
                    .message
                    .unwrap_or_else(|| format!("status {:?}", response.status)),
            });
        }

        Ok(response.data)
    }
}

#[async_trait]
impl VesselProvider for MyShipTrackingProvider {
    fn name(&self) -> &str {
        "myshiptracking"
    }

    async fn fetch_in_zone(&self, zone: &BoundingBox) -> Vec<VesselRecord> {
        match self.fetch_zone(zone).await {
            Ok(data) => normalize_zone_vessels(data, zone),
            Err(ProviderError::Api { message }) => {
                tracing::warn!("API error: {}", message);
                Vec::new()
            }
            Err(e) => {
                tracing::warn!("Network error: {}", e);
                Vec::new()
            }
        }
    }
}

/// The provider filters by box server-side; the box is re-checked so every
/// provider hands back the same guarantee.
fn normalize_zone_vessels(data: Vec<Value>, zone: &BoundingBox) -> Vec<VesselRecord> {
    data.into_iter()
        .filter_map(|v| match normalize_vessel(v) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::debug!("Dropping vessel: {}", e);
                None
            }
        })
        .filter(|record| zone.contains(record.lat, record.lon))
        .collect()
}

fn normalize_vessel(value: Value) -> Result<VesselRecord, MalformedRecord> {
    let vessel: ZoneVessel =
        serde_json::from_value(value).map_err(|e| MalformedRecord::new(e.to_string()))?;

    let mmsi = vessel
        .mmsi
        .ok_or_else(|| MalformedRecord::new("vessel without usable mmsi"))?;
    let lat = coerce_coordinate(vessel.lat.as_ref())
        .map_err(|e| MalformedRecord::new(format!("{} lat: {}", mmsi, e)))?;
    let lon = coerce_coordinate(vessel.lng.as_ref())
        .map_err(|e| MalformedRecord::new(format!("{} lng: {}", mmsi, e)))?;

    Ok(VesselRecord::new(mmsi, vessel.vessel_name, lat, lon)
        .with_motion(vessel.speed, vessel.course, vessel.heading)
        .with_navigation_status(vessel.nav_status))
}
