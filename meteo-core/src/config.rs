use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::{
    geolocation::{FixedSource, Geolocator, IpApiSource},
    model::Coordinates,
    provider::openweather::DEFAULT_API_URL,
};

pub const API_KEY_ENV: &str = "METEO_API_KEY";
pub const API_URL_ENV: &str = "METEO_API_URL";

/// Where `meteo here` gets its position from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionSourceKind {
    /// Approximate position from the public IP address.
    #[default]
    Ip,
    /// The `latitude`/`longitude` stored in the config.
    Fixed,
    /// No geolocation at all.
    Disabled,
}

impl PositionSourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PositionSourceKind::Ip => "ip",
            PositionSourceKind::Fixed => "fixed",
            PositionSourceKind::Disabled => "disabled",
        }
    }

    pub const fn all() -> &'static [PositionSourceKind] {
        &[PositionSourceKind::Ip, PositionSourceKind::Fixed, PositionSourceKind::Disabled]
    }
}

impl std::fmt::Display for PositionSourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Geolocation settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeolocationConfig {
    #[serde(default)]
    pub source: PositionSourceKind,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
///
/// [geolocation]
/// source = "fixed"
/// latitude = 48.85
/// longitude = 2.35
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// OpenWeather base URL; defaults to the public 2.5 API.
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    #[serde(default)]
    pub geolocation: GeolocationConfig,
}

impl Config {
    /// Load config from disk (or defaults if it doesn't exist yet), then
    /// apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut cfg = Self::load_file()?;
        cfg.apply_overrides(|name| std::env::var(name).ok());
        Ok(cfg)
    }

    /// Load config from disk only, or return an empty default if it doesn't exist yet.
    pub fn load_file() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Override file values with non-empty `METEO_API_KEY` / `METEO_API_URL`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |name| lookup(name).filter(|v: &String| !v.trim().is_empty());

        if let Some(key) = non_empty(API_KEY_ENV) {
            self.api_key = Some(key);
        }
        if let Some(url) = non_empty(API_URL_ENV) {
            self.api_url = Some(url);
        }
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
        let dirs = ProjectDirs::from("dev", "meteo", "meteo")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    /// Returns the API key, if present and non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    /// Store a fixed position and switch geolocation to it.
    pub fn set_fixed_position(&mut self, position: Coordinates) {
        self.geolocation = GeolocationConfig {
            source: PositionSourceKind::Fixed,
            latitude: Some(position.latitude),
            longitude: Some(position.longitude),
        };
    }

    /// Build the geolocator the config describes.
    pub fn geolocator(&self) -> Result<Geolocator> {
        let geo = &self.geolocation;
        match geo.source {
            PositionSourceKind::Ip => Ok(Geolocator::new(Box::new(IpApiSource::new()))),
            PositionSourceKind::Disabled => Ok(Geolocator::unsupported()),
            PositionSourceKind::Fixed => match (geo.latitude, geo.longitude) {
                (Some(latitude), Some(longitude)) => Ok(Geolocator::new(Box::new(
                    FixedSource::new(Coordinates { latitude, longitude }),
                ))),
                _ => Err(anyhow!(
                    "Geolocation source is 'fixed' but latitude/longitude are missing.\n\
                     Hint: run `meteo configure` and enter your position."
                )),
            },
        }
    }
}
