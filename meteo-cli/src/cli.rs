use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{CustomType, Select, Text};
use meteo_core::{
    Config, Coordinates, PositionSourceKind, WeatherReport, WeatherService,
    provider::provider_from_config,
};
use tracing::debug;

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "meteo", version, about = "Current weather and 5-day forecast")]
pub struct Cli {
    /// More log output (-v, -vv). `RUST_LOG` overrides this.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the API key and the geolocation source.
    Configure,

    /// Show weather for a city.
    Show {
        /// City name, optionally with a country code ("Paris,FR").
        city: String,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show weather at the current position.
    Here {
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, json } => {
                let config = Config::load()?;
                let service = WeatherService::new(provider_from_config(&config)?);

                let report = service.search_city(&city).await?;
                print_report(&report, json)
            }
            Command::Here { json } => {
                let config = Config::load()?;
                let service = WeatherService::new(provider_from_config(&config)?);
                let geolocator = config.geolocator()?;
                debug!(source = %config.geolocation.source, "geolocation source");

                let report = service.lookup_here(&geolocator).await?;
                print_report(&report, json)
            }
        }
    }
}

fn print_report(report: &WeatherReport, json: bool) -> anyhow::Result<()> {
    if json {
        let text =
            serde_json::to_string_pretty(report).context("Failed to serialize weather report")?;
        println!("{text}");
    } else {
        print!("{}", render::report(report, chrono::Local::now()));
    }
    Ok(())
}

/// Interactive configuration, saved to the config file.
fn configure() -> anyhow::Result<()> {
    let mut config = Config::load_file()?;

    let mut prompt = Text::new("OpenWeather API key:");
    if let Some(current) = config.api_key() {
        prompt = prompt.with_default(current);
    }
    let api_key = prompt.prompt().context("API key prompt aborted")?;
    config.set_api_key(api_key.trim().to_string());

    let source = Select::new(
        "Where should `meteo here` get your position from?",
        PositionSourceKind::all().to_vec(),
    )
    .prompt()
    .context("Geolocation prompt aborted")?;

    match source {
        PositionSourceKind::Fixed => {
            let latitude = CustomType::<f64>::new("Latitude:")
                .with_error_message("Please type a number, e.g. 48.85")
                .prompt()
                .context("Latitude prompt aborted")?;
            let longitude = CustomType::<f64>::new("Longitude:")
                .with_error_message("Please type a number, e.g. 2.35")
                .prompt()
                .context("Longitude prompt aborted")?;
            config.set_fixed_position(Coordinates { latitude, longitude });
        }
        other => config.geolocation.source = other,
    }

    config.save()?;
    println!("Configuration saved to {}", Config::config_file_path()?.display());
    Ok(())
}
