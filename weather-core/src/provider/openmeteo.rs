use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::Deserialize;
use std::time::Duration;

use crate::{
    error::WeatherError,
    fetch::{FetchError, FetchedResponse, fetch_json},
    model::{Coordinate, WeatherPayload},
};

use super::WeatherProvider;

pub const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

const CURRENT_FIELDS: &str = "temperature_2m,weather_code,wind_speed_10m";

#[derive(Debug, Clone, Copy)]
enum Service {
    Geocoding,
    Weather,
}

impl Service {
    fn label(&self) -> &'static str {
        match self {
            Service::Geocoding => "geocoding",
            Service::Weather => "weather",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            Service::Geocoding => "Geocoding",
            Service::Weather => "Weather",
        }
    }
}

/// Open-Meteo geocoding and forecast APIs. Neither needs an API key.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    http: Client,
    geocoding_url: String,
    forecast_url: String,
    timeout: Duration,
}

impl OpenMeteoProvider {
    pub fn new(
        geocoding_url: impl Into<String>,
        forecast_url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            http: Client::new(),
            geocoding_url: geocoding_url.into(),
            forecast_url: forecast_url.into(),
            timeout,
        }
    }

    fn endpoint(&self, service: Service) -> Result<Url, WeatherError> {
        let raw = match service {
            Service::Geocoding => &self.geocoding_url,
            Service::Weather => &self.forecast_url,
        };

        Url::parse(raw).map_err(|e| {
            tracing::error!(
                service = service.label(),
                url = %raw,
                error = %e,
                "Invalid endpoint URL"
            );
            WeatherError::unexpected()
        })
    }

    async fn send(
        &self,
        service: Service,
        request: RequestBuilder,
    ) -> Result<FetchedResponse, WeatherError> {
        tracing::debug!(service = service.label(), "Sending request");

        let fetched = fetch_json(request, self.timeout).await.map_err(|e| {
            tracing::debug!(service = service.label(), error = %e, "Request failed");
            classify_fetch_error(service, e)
        })?;

        if !fetched.status.is_success() {
            tracing::debug!(
                service = service.label(),
                status = %fetched.status,
                body = %truncate_body(&fetched.body),
                "Non-success response"
            );
            return Err(api_error(service, &fetched));
        }

        Ok(fetched)
    }
}

#[derive(Debug, Deserialize)]
struct GeoResponse {
    #[serde(default)]
    results: Vec<GeoResult>,
}

#[derive(Debug, Deserialize)]
struct GeoResult {
    #[serde(default)]
    name: Option<String>,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    reason: Option<String>,
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    async fn geocode(&self, location: &str) -> Result<Option<Coordinate>, WeatherError> {
        let request = self.http.get(self.endpoint(Service::Geocoding)?).query(&[
            ("name", location),
            ("count", "1"),
            ("language", "en"),
            ("format", "json"),
        ]);

        let fetched = self.send(Service::Geocoding, request).await?;

        let parsed: GeoResponse = serde_json::from_str(&fetched.body).map_err(|_| {
            WeatherError::data_format("Received invalid geocoding data format from the API")
        })?;

        let Some(first) = parsed.results.into_iter().next() else {
            return Ok(None);
        };

        tracing::debug!(
            query = location,
            matched = first.name.as_deref().unwrap_or("?"),
            latitude = first.latitude,
            longitude = first.longitude,
            "Geocoded location"
        );

        Ok(Some(Coordinate {
            latitude: first.latitude,
            longitude: first.longitude,
        }))
    }

    async fn current_conditions(
        &self,
        coordinate: Coordinate,
    ) -> Result<WeatherPayload, WeatherError> {
        let request = self.http.get(self.endpoint(Service::Weather)?).query(&[
            ("latitude", coordinate.latitude.to_string()),
            ("longitude", coordinate.longitude.to_string()),
            ("current", CURRENT_FIELDS.to_string()),
            ("timezone", "auto".to_string()),
        ]);

        let fetched = self.send(Service::Weather, request).await?;

        let body: serde_json::Value = serde_json::from_str(&fetched.body).map_err(|_| {
            WeatherError::data_format("Received invalid weather data format from the API")
        })?;

        WeatherPayload::from_json(body)
    }
}

impl Default for OpenMeteoProvider {
    fn default() -> Self {
        Self::new(GEOCODING_URL, FORECAST_URL, crate::fetch::DEFAULT_TIMEOUT)
    }
}

fn classify_fetch_error(service: Service, err: FetchError) -> WeatherError {
    match err {
        FetchError::Timeout(after) => WeatherError::timeout(format!(
            "Request to {} service timed out after {}ms",
            service.label(),
            after.as_millis()
        )),
        FetchError::Transport(_) => {
            WeatherError::network(format!("Failed to connect to {} service", service.label()))
        }
    }
}

fn api_error(service: Service, fetched: &FetchedResponse) -> WeatherError {
    let reason = serde_json::from_str::<ApiErrorBody>(&fetched.body)
        .ok()
        .and_then(|body| body.reason)
        .filter(|reason| !reason.trim().is_empty())
        .unwrap_or_else(|| {
            fetched
                .status
                .canonical_reason()
                .unwrap_or("Unknown status")
                .to_string()
        });

    WeatherError::api(
        fetched.status.as_u16(),
        format!("{} error: {reason}", service.title()),
    )
}

fn truncate_body(body: &str) -> &str {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
