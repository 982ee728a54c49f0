//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Input validation for location queries
//! - A time-boxed cache and a global request spacer
//! - The Open-Meteo provider (geocoding + current conditions)
//! - `WeatherService`, which chains the above into `lookup` and `compare_all`
//! - Configuration handling
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod cache;
pub mod codes;
pub mod compare;
pub mod config;
pub mod display;
pub mod error;
pub mod fetch;
pub mod format;
pub mod model;
pub mod provider;
pub mod rate_limit;
pub mod service;
pub mod validate;

pub use codes::{UnknownCodeStyle, describe};
pub use compare::Comparison;
pub use config::Config;
pub use error::{ErrorKind, WeatherError};
pub use model::{Coordinate, WeatherPayload, WeatherReading};
pub use provider::{OpenMeteoProvider, WeatherProvider};
pub use service::{ServiceOptions, WeatherService};
pub use validate::{ValidationPolicy, validate_location};
