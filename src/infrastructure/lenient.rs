// Lenient field readers - provider payload fields that degrade to None
//
// Used with `#[serde(default, deserialize_with = "...")]` on optional provider
// fields. A value of the wrong type reads as absent instead of failing the
// whole record.
use crate::domain::vessel::NavigationStatus;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub fn optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from))
}

pub fn optional_mmsi<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(mmsi_from))
}

pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

pub fn optional_nav_status<'de, D>(deserializer: D) -> Result<Option<NavigationStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(nav_status_from))
}

/// Nested object that falls back to its default when it has the wrong shape.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

fn number_from(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn mmsi_from(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn nav_status_from(value: &Value) -> Option<NavigationStatus> {
    match value {
        Value::Number(n) => match n.as_i64() {
            Some(code) => Some(NavigationStatus::Code(code)),
            None => n
                .as_f64()
                .filter(|f| f.fract() == 0.0)
                .map(|f| NavigationStatus::Code(f as i64)),
        },
        Value::String(s) if !s.trim().is_empty() => Some(NavigationStatus::Label(s.clone())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize)]
    struct Motion {
        #[serde(default, deserialize_with = "optional_number")]
        speed: Option<f64>,
        #[serde(default, deserialize_with = "optional_mmsi")]
        mmsi: Option<u64>,
        #[serde(default, deserialize_with = "optional_text")]
        name: Option<String>,
        #[serde(default, deserialize_with = "optional_nav_status")]
        status: Option<NavigationStatus>,
    }

    fn read(value: Value) -> Motion {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_numbers_and_numeric_strings() {
        assert_eq!(read(json!({"speed": 8.4})).speed, Some(8.4));
        assert_eq!(read(json!({"speed": " 8.4 "})).speed, Some(8.4));
        assert_eq!(read(json!({"speed": "fast"})).speed, None);
        assert_eq!(read(json!({"speed": [1]})).speed, None);
        assert_eq!(read(json!({"speed": "NaN"})).speed, None);
        assert_eq!(read(json!({"speed": null})).speed, None);
        assert_eq!(read(json!({})).speed, None);
    }

    #[test]
    fn test_mmsi_forms() {
        assert_eq!(read(json!({"mmsi": 431000001})).mmsi, Some(431000001));
        assert_eq!(read(json!({"mmsi": "431000002"})).mmsi, Some(431000002));
        assert_eq!(read(json!({"mmsi": -5})).mmsi, None);
        assert_eq!(read(json!({"mmsi": 1.5})).mmsi, None);
    }

    #[test]
    fn test_text_ignores_non_strings() {
        assert_eq!(read(json!({"name": "VIKING"})).name.as_deref(), Some("VIKING"));
        assert_eq!(read(json!({"name": 42})).name, None);
    }

    #[test]
    fn test_nav_status_forms() {
        assert_eq!(read(json!({"status": 5})).status, Some(NavigationStatus::Code(5)));
        assert_eq!(read(json!({"status": 5.0})).status, Some(NavigationStatus::Code(5)));
        assert_eq!(read(json!({"status": 5.5})).status, None);
        assert_eq!(
            read(json!({"status": "Moored"})).status,
            Some(NavigationStatus::Label("Moored".into()))
        );
        assert_eq!(read(json!({"status": ""})).status, None);
        assert_eq!(read(json!({"status": true})).status, None);
    }

    #[derive(Debug, Default, Deserialize)]
    struct Outer {
        #[serde(default, deserialize_with = "or_default")]
        inner: Motion,
    }

    #[test]
    fn test_or_default_on_wrong_shape() {
        let outer: Outer = serde_json::from_value(json!({"inner": "oops"})).unwrap();
        assert_eq!(outer.inner.speed, None);

        let outer: Outer = serde_json::from_value(json!({"inner": {"speed": 3}})).unwrap();
        assert_eq!(outer.inner.speed, Some(3.0));
    }
}
