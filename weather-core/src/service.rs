use futures::FutureExt;
use std::{panic::AssertUnwindSafe, time::Duration};

use crate::{
    cache::{self, WeatherCache},
    codes::UnknownCodeStyle,
    error::WeatherError,
    fetch,
    format::format_reading,
    model::WeatherReading,
    provider::{OpenMeteoProvider, WeatherProvider, openmeteo},
    rate_limit::{self, RateLimiter},
    validate::{ValidationPolicy, validate_location},
};

/// Tunables for a [`WeatherService`].
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceOptions {
    pub geocoding_url: String,
    pub forecast_url: String,
    pub timeout: Duration,
    pub cache_ttl: Duration,
    pub min_request_interval: Duration,
    pub validation: ValidationPolicy,
    pub unknown_code_style: UnknownCodeStyle,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            geocoding_url: openmeteo::GEOCODING_URL.to_string(),
            forecast_url: openmeteo::FORECAST_URL.to_string(),
            timeout: fetch::DEFAULT_TIMEOUT,
            cache_ttl: cache::DEFAULT_TTL,
            min_request_interval: rate_limit::DEFAULT_MIN_INTERVAL,
            validation: ValidationPolicy::default(),
            unknown_code_style: UnknownCodeStyle::default(),
        }
    }
}

/// Current-conditions lookups with caching and global request spacing.
///
/// Each instance owns its cache and limiter, so independent services never
/// share state.
#[derive(Debug)]
pub struct WeatherService<P = OpenMeteoProvider> {
    provider: P,
    cache: WeatherCache,
    limiter: RateLimiter,
    validation: ValidationPolicy,
    unknown_code_style: UnknownCodeStyle,
}

impl WeatherService<OpenMeteoProvider> {
    /// Service backed by Open-Meteo using the endpoints and timeout in `options`.
    pub fn open_meteo(options: ServiceOptions) -> Self {
        let provider = OpenMeteoProvider::new(
            options.geocoding_url.clone(),
            options.forecast_url.clone(),
            options.timeout,
        );
        Self::new(provider, options)
    }
}

impl<P: WeatherProvider> WeatherService<P> {
    pub fn new(provider: P, options: ServiceOptions) -> Self {
        Self {
            provider,
            cache: WeatherCache::new(options.cache_ttl),
            limiter: RateLimiter::new(options.min_request_interval),
            validation: options.validation,
            unknown_code_style: options.unknown_code_style,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn cache(&self) -> &WeatherCache {
        &self.cache
    }

    /// Look up current conditions for `location`.
    ///
    /// Always resolves to a reading or a typed error; a panic inside the
    /// provider is reported as [`ErrorKind::Unexpected`](crate::ErrorKind::Unexpected).
    #[tracing::instrument(skip(self))]
    pub async fn lookup(&self, location: &str) -> Result<WeatherReading, WeatherError> {
        let result = AssertUnwindSafe(self.run_lookup(location))
            .catch_unwind()
            .await
            .unwrap_or_else(|_| {
                tracing::error!("Lookup panicked");
                Err(WeatherError::unexpected())
            });

        if let Err(err) = &result {
            tracing::warn!(kind = %err.kind, error = %err, "Lookup failed");
        }

        result
    }

    async fn run_lookup(&self, raw: &str) -> Result<WeatherReading, WeatherError> {
        let location = validate_location(raw, self.validation)?;

        if let Some(cached) = self.cache.get(&location) {
            tracing::debug!(location = %location, "Cache hit");
            return Ok(cached);
        }
        tracing::debug!(location = %location, "Cache miss");

        self.limiter.await_slot().await;

        let coordinate = self
            .provider
            .geocode(&location)
            .await?
            .ok_or_else(|| WeatherError::not_found(&location))?;

        let payload = self.provider.current_conditions(coordinate).await?;
        let reading = format_reading(&payload, &location, self.unknown_code_style);

        self.cache.put(&location, reading.clone());

        Ok(reading)
    }
}
