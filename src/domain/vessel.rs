// Vessel domain model - canonical record shared by every provider
use serde::{Deserialize, Serialize};

pub const UNKNOWN_VESSEL_NAME: &str = "Unknown";

/// Navigational status as reported by the provider.
///
/// Digitraffic sends the numeric AIS code, MyShipTracking a label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NavigationStatus {
    Code(i64),
    Label(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VesselRecord {
    pub mmsi: u64,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(rename = "sog")]
    pub speed_over_ground: Option<f64>,
    #[serde(rename = "cog")]
    pub course_over_ground: Option<f64>,
    pub heading: Option<f64>,
    #[serde(rename = "nav_stat")]
    pub navigation_status: Option<NavigationStatus>,
}

impl VesselRecord {
    /// A position-only record; the name falls back to "Unknown".
    pub fn new(mmsi: u64, name: Option<String>, lat: f64, lon: f64) -> Self {
        Self {
            mmsi,
            name: name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_VESSEL_NAME.to_string()),
            lat,
            lon,
            speed_over_ground: None,
            course_over_ground: None,
            heading: None,
            navigation_status: None,
        }
    }

    pub fn with_motion(
        mut self,
        speed_over_ground: Option<f64>,
        course_over_ground: Option<f64>,
        heading: Option<f64>,
    ) -> Self {
        self.speed_over_ground = speed_over_ground;
        self.course_over_ground = course_over_ground;
        self.heading = heading;
        self
    }

    pub fn with_navigation_status(mut self, status: Option<NavigationStatus>) -> Self {
        self.navigation_status = status;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_name_defaults_to_unknown() {
        assert_eq!(VesselRecord::new(1, None, 0.0, 0.0).name, "Unknown");
        assert_eq!(VesselRecord::new(1, Some("  ".into()), 0.0, 0.0).name, "Unknown");
        assert_eq!(VesselRecord::new(1, Some("FINLANDIA".into()), 0.0, 0.0).name, "FINLANDIA");
    }

    #[test]
    fn test_serialized_field_names() {
        let record = VesselRecord::new(230123000, Some("MEGASTAR".into()), 60.15, 24.95)
            .with_motion(Some(12.3), Some(181.0), None)
            .with_navigation_status(Some(NavigationStatus::Code(0)));

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "mmsi": 230123000,
                "name": "MEGASTAR",
                "lat": 60.15,
                "lon": 24.95,
                "sog": 12.3,
                "cog": 181.0,
                "heading": null,
                "nav_stat": 0
            })
        );
    }

    #[test]
    fn test_navigation_status_accepts_code_or_label() {
        let code: NavigationStatus = serde_json::from_value(json!(5)).unwrap();
        assert_eq!(code, NavigationStatus::Code(5));

        let label: NavigationStatus = serde_json::from_value(json!("Moored")).unwrap();
        assert_eq!(label, NavigationStatus::Label("Moored".into()));
    }
}
