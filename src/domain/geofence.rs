// Geofence domain model - closed latitude/longitude rectangle
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum GeofenceError {
    #[error("bounding box values must be finite")]
    NotFinite,
    #[error("min_lat {min} is greater than max_lat {max}")]
    LatitudeInverted { min: f64, max: f64 },
    #[error("min_lon {min} is greater than max_lon {max}")]
    LongitudeInverted { min: f64, max: f64 },
}

/// Closed rectangular region in degrees. Edges are inside.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "RawBoundingBox")]
pub struct BoundingBox {
    min_lat: f64,
    max_lat: f64,
    min_lon: f64,
    max_lon: f64,
}

#[derive(Deserialize)]
struct RawBoundingBox {
    min_lat: f64,
    max_lat: f64,
    min_lon: f64,
    max_lon: f64,
}

impl TryFrom<RawBoundingBox> for BoundingBox {
    type Error = GeofenceError;

    fn try_from(raw: RawBoundingBox) -> Result<Self, Self::Error> {
        Self::new(raw.min_lat, raw.max_lat, raw.min_lon, raw.max_lon)
    }
}

impl BoundingBox {
    pub fn new(
        min_lat: f64,
        max_lat: f64,
        min_lon: f64,
        max_lon: f64,
    ) -> Result<Self, GeofenceError> {
        if ![min_lat, max_lat, min_lon, max_lon].iter().all(|v| v.is_finite()) {
            return Err(GeofenceError::NotFinite);
        }
        if min_lat > max_lat {
            return Err(GeofenceError::LatitudeInverted { min: min_lat, max: max_lat });
        }
        if min_lon > max_lon {
            return Err(GeofenceError::LongitudeInverted { min: min_lon, max: max_lon });
        }

        Ok(Self {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        })
    }

    pub fn min_lat(&self) -> f64 {
        self.min_lat
    }

    pub fn max_lat(&self) -> f64 {
        self.max_lat
    }

    pub fn min_lon(&self) -> f64 {
        self.min_lon
    }

    pub fn max_lon(&self) -> f64 {
        self.max_lon
    }

    /// NaN never compares inside, so invalid coordinates fall out here.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        self.min_lat <= lat && lat <= self.max_lat && self.min_lon <= lon && lon <= self.max_lon
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum CoordinateError {
    #[error("coordinate is missing")]
    Missing,
    #[error("coordinate is not numeric: {0}")]
    NotNumeric(String),
    #[error("coordinate is not finite")]
    NotFinite,
}

/// Coerce a stored JSON value into a coordinate.
///
/// Accepts JSON numbers and numeric strings, rejects everything else.
pub fn coerce_coordinate(value: Option<&Value>) -> Result<f64, CoordinateError> {
    let parsed = match value {
        None | Some(Value::Null) => return Err(CoordinateError::Missing),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| CoordinateError::NotNumeric(n.to_string()))?,
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| CoordinateError::NotNumeric(s.clone()))?,
        Some(other) => return Err(CoordinateError::NotNumeric(other.to_string())),
    };

    if parsed.is_finite() {
        Ok(parsed)
    } else {
        Err(CoordinateError::NotFinite)
    }
}
