use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::WeatherError,
    model::{Coordinate, WeatherPayload},
};

pub mod openmeteo;

pub use openmeteo::OpenMeteoProvider;

/// The two upstream calls a lookup is built from.
///
/// Implementations classify transport, timeout and HTTP status failures into
/// [`WeatherError`]s. Deciding what an empty geocoding result means is left to
/// the caller.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Resolve a validated place name to its best match, if any.
    async fn geocode(&self, location: &str) -> Result<Option<Coordinate>, WeatherError>;

    /// Fetch current temperature, condition code and wind speed.
    async fn current_conditions(
        &self,
        coordinate: Coordinate,
    ) -> Result<WeatherPayload, WeatherError>;
}
