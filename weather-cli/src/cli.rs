use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Confirm, CustomType, Select};
use weather_core::{Config, UnknownCodeStyle, WeatherService};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather for one or more cities")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Edit lookup settings interactively.
    Configure,

    /// Show current weather for a city.
    Show {
        /// City or place name.
        city: String,

        /// Print the reading as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Compare current weather across several cities.
    Compare {
        /// City or place names; blank entries are skipped.
        #[arg(required = true)]
        cities: Vec<String>,

        /// Print readings and errors as JSON.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, json } => {
                let service = service_from_config()?;
                let reading = service.lookup(&city).await?;

                if json {
                    println!("{}", serde_json::to_string_pretty(&reading)?);
                } else {
                    println!("{}", render::card(&reading));
                }
                Ok(())
            }
            Command::Compare { cities, json } => {
                let service = service_from_config()?;
                let comparison = service.compare_all(cities.as_slice()).await;
                tracing::info!(
                    requested = cities.len(),
                    succeeded = comparison.results.len(),
                    failed = comparison.errors.len(),
                    "{}",
                    render::summary(&comparison)
                );

                if json {
                    println!("{}", render::comparison_json(&comparison)?);
                } else {
                    println!("{}", render::comparison(&cities, &comparison));
                }
                Ok(())
            }
        }
    }
}

fn service_from_config() -> anyhow::Result<WeatherService> {
    let config = Config::load()?;
    Ok(WeatherService::open_meteo(config.service_options()))
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    config.allow_digits = Confirm::new("Allow digits in city names?")
        .with_default(config.allow_digits)
        .prompt()
        .context("Failed to read digits setting")?;

    let styles = UnknownCodeStyle::all().to_vec();
    let current = styles.iter().position(|s| *s == config.unknown_code_style).unwrap_or(0);
    config.unknown_code_style = Select::new("Description for unknown weather codes:", styles)
        .with_starting_cursor(current)
        .prompt()
        .context("Failed to read unknown-code style")?;

    config.timeout_ms = CustomType::<u64>::new("Request timeout (ms):")
        .with_default(config.timeout_ms)
        .with_validator(|ms: &u64| {
            Ok(if *ms == 0 {
                inquire::validator::Validation::Invalid("Timeout must be greater than zero".into())
            } else {
                inquire::validator::Validation::Valid
            })
        })
        .prompt()
        .context("Failed to read timeout")?;

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}
