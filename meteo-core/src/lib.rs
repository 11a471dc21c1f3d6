//! Core library for the `meteo` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client and the provider abstraction over it
//! - Mapping of raw payloads to display models (current weather, daily forecast)
//! - Geolocation over pluggable position sources
//!
//! It is used by `meteo-cli`, but can also be reused by other front-ends.

pub mod config;
pub mod error;
pub mod forecast;
pub mod geolocation;
pub mod icon;
pub mod mapper;
pub mod model;
pub mod provider;
pub mod service;

pub use config::{Config, GeolocationConfig, PositionSourceKind};
pub use error::{ApiError, GeolocationError, LookupError};
pub use geolocation::{Geolocator, PositionOptions, PositionSource};
pub use icon::{WeatherIcon, resolve_icon};
pub use model::{
    Coordinates, DayForecast, LocationQuery, RawForecastSample, RawWeatherSample, WeatherDisplay,
    WeatherReport,
};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider};
pub use service::WeatherService;
