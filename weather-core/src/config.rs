use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

use crate::{
    cache,
    codes::UnknownCodeStyle,
    fetch,
    provider::openmeteo,
    rate_limit,
    service::ServiceOptions,
    validate::ValidationPolicy,
};

/// Top-level configuration stored on disk. Every field may be omitted.
///
/// Example TOML:
/// timeout_ms = 5000
/// allow_digits = true
/// unknown_code_style = "with-code"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub geocoding_url: String,
    pub forecast_url: String,
    pub timeout_ms: u64,
    pub cache_ttl_secs: u64,
    pub min_request_interval_ms: u64,
    /// Accept ASCII digits in location queries.
    pub allow_digits: bool,
    pub unknown_code_style: UnknownCodeStyle,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            geocoding_url: openmeteo::GEOCODING_URL.to_string(),
            forecast_url: openmeteo::FORECAST_URL.to_string(),
            timeout_ms: fetch::DEFAULT_TIMEOUT.as_millis() as u64,
            cache_ttl_secs: cache::DEFAULT_TTL.as_secs(),
            min_request_interval_ms: rate_limit::DEFAULT_MIN_INTERVAL.as_millis() as u64,
            allow_digits: false,
            unknown_code_style: UnknownCodeStyle::default(),
        }
    }
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, use defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;
        if cfg.timeout_ms == 0 {
            return Err(anyhow!("timeout_ms must be greater than zero"));
        }
        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn service_options(&self) -> ServiceOptions {
        ServiceOptions {
            geocoding_url: self.geocoding_url.clone(),
            forecast_url: self.forecast_url.clone(),
            timeout: Duration::from_millis(self.timeout_ms),
            cache_ttl: Duration::from_secs(self.cache_ttl_secs),
            min_request_interval: Duration::from_millis(self.min_request_interval_ms),
            validation: ValidationPolicy { allow_digits: self.allow_digits },
            unknown_code_style: self.unknown_code_style,
        }
    }
}
