use chrono::Utc;
use serde_json::{Map, Value};

use crate::{
    codes::{describe, UnknownCodeStyle},
    model::{WeatherPayload, WeatherReading},
};

const TEMPERATURE: &str = "temperature_2m";
const WEATHER_CODE: &str = "weather_code";
const WIND_SPEED: &str = "wind_speed_10m";

const DEFAULT_TEMPERATURE_UNIT: &str = "°C";
const DEFAULT_WIND_SPEED_UNIT: &str = "km/h";

/// Build a reading from a shape-checked payload. Fields that are missing or of
/// the wrong type become `None`, units fall back to metric defaults.
pub fn format_reading(
    payload: &WeatherPayload,
    city: &str,
    style: UnknownCodeStyle,
) -> WeatherReading {
    let current = &payload.current;
    let weather_code = current.get(WEATHER_CODE).and_then(Value::as_i64);

    WeatherReading {
        city: city.to_string(),
        temperature: current.get(TEMPERATURE).and_then(Value::as_f64),
        temperature_unit: unit(&payload.current_units, TEMPERATURE, DEFAULT_TEMPERATURE_UNIT),
        description: describe(weather_code, style),
        weather_code,
        wind_speed: current.get(WIND_SPEED).and_then(Value::as_f64),
        wind_speed_unit: unit(&payload.current_units, WIND_SPEED, DEFAULT_WIND_SPEED_UNIT),
        timestamp: Utc::now(),
    }
}

fn unit(units: &Map<String, Value>, field: &str, fallback: &str) -> String {
    units.get(field).and_then(Value::as_str).unwrap_or(fallback).to_string()
}
