//! WMO weather interpretation codes as used by Open-Meteo.
//! See: https://open-meteo.com/en/docs#weathervariables

use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt};

/// How [`describe`] renders a code missing from the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnknownCodeStyle {
    /// `Unknown`
    #[default]
    Plain,
    /// `Unknown (code: N)`
    WithCode,
}

impl UnknownCodeStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnknownCodeStyle::Plain => "plain",
            UnknownCodeStyle::WithCode => "with-code",
        }
    }

    pub const fn all() -> &'static [UnknownCodeStyle] {
        &[UnknownCodeStyle::Plain, UnknownCodeStyle::WithCode]
    }
}

impl fmt::Display for UnknownCodeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for UnknownCodeStyle {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "plain" => Ok(UnknownCodeStyle::Plain),
            "with-code" => Ok(UnknownCodeStyle::WithCode),
            _ => Err(anyhow::anyhow!(
                "Unknown code style '{value}'. Supported styles: plain, with-code."
            )),
        }
    }
}

fn lookup(code: i64) -> Option<&'static str> {
    let text = match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        56 => "Light freezing drizzle",
        57 => "Dense freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 => "Light freezing rain",
        67 => "Heavy freezing rain",
        71 => "Slight snow fall",
        73 => "Moderate snow fall",
        75 => "Heavy snow fall",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => return None,
    };
    Some(text)
}

/// Human-readable description for a condition code. Never fails.
pub fn describe(code: Option<i64>, style: UnknownCodeStyle) -> String {
    match (code.and_then(lookup), code, style) {
        (Some(text), _, _) => text.to_string(),
        (None, Some(code), UnknownCodeStyle::WithCode) => format!("Unknown (code: {code})"),
        (None, _, _) => "Unknown".to_string(),
    }
}
