use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::WeatherError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Formatted current conditions for one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReading {
    pub city: String,
    pub temperature: Option<f64>,
    pub temperature_unit: String,
    pub description: String,
    pub weather_code: Option<i64>,
    pub wind_speed: Option<f64>,
    pub wind_speed_unit: String,
    pub timestamp: DateTime<Utc>,
}

/// Weather provider body that has passed the shape check: it holds a
/// `current` object. Units are optional.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherPayload {
    pub current: Map<String, Value>,
    pub current_units: Map<String, Value>,
}

impl WeatherPayload {
    pub fn from_json(body: Value) -> Result<Self, WeatherError> {
        let Value::Object(mut root) = body else {
            return Err(invalid_format());
        };

        let current = match root.remove("current") {
            Some(Value::Object(current)) => current,
            _ => return Err(invalid_format()),
        };

        let current_units = match root.remove("current_units") {
            Some(Value::Object(units)) => units,
            _ => Map::new(),
        };

        Ok(Self {
            current,
            current_units,
        })
    }
}

fn invalid_format() -> WeatherError {
    WeatherError::data_format("Received invalid weather data format from the API")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn payload_requires_current_object() {
        let err = WeatherPayload::from_json(json!({ "some_other_data": true })).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DataFormat);
        assert_eq!(err.message, "Received invalid weather data format from the API");

        assert!(WeatherPayload::from_json(json!({ "current": 12 })).is_err());
        assert!(WeatherPayload::from_json(json!([1, 2, 3])).is_err());
    }

    #[test]
    fn payload_units_are_optional() {
        let payload = WeatherPayload::from_json(json!({ "current": {} })).unwrap();
        assert!(payload.current.is_empty());
        assert!(payload.current_units.is_empty());
    }

    #[test]
    fn reading_serializes_camel_case() {
        let reading = WeatherReading {
            city: "london".into(),
            temperature: Some(22.5),
            temperature_unit: "°C".into(),
            description: "Mainly clear".into(),
            weather_code: Some(1),
            wind_speed: None,
            wind_speed_unit: "km/h".into(),
            timestamp: Utc::now(),
        };
        let json = serde_json::to_value(&reading).unwrap();
        assert_eq!(json["temperatureUnit"], "°C");
        assert_eq!(json["weatherCode"], 1);
        assert_eq!(json["windSpeed"], Value::Null);
        assert!(json["timestamp"].as_str().is_some());
    }
}
