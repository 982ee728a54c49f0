use serde::Serialize;
use std::fmt;

/// Closed set of failure categories a lookup can end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    Validation,
    Network,
    Api,
    NotFound,
    DataFormat,
    Timeout,
    Unexpected,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Network => "network",
            ErrorKind::Api => "api",
            ErrorKind::NotFound => "notFound",
            ErrorKind::DataFormat => "dataFormat",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Unexpected => "unexpected",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed failure returned by every fallible operation in this crate.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct WeatherError {
    pub message: String,
    pub status_code: Option<u16>,
    pub kind: ErrorKind,
}

impl WeatherError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: None,
            kind,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Network, message)
    }

    pub fn api(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code: Some(status_code),
            ..Self::new(ErrorKind::Api, message)
        }
    }

    pub fn not_found(location: &str) -> Self {
        Self::new(ErrorKind::NotFound, format!("City \"{location}\" not found"))
    }

    pub fn data_format(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DataFormat, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Timeout, message)
    }

    pub fn unexpected() -> Self {
        Self::new(ErrorKind::Unexpected, "An unexpected error occurred while fetching weather data")
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}
