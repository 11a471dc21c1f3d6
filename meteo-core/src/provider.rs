use crate::{
    Config,
    error::ApiError,
    model::{LocationQuery, RawForecastSample, RawWeatherSample},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Source of raw weather payloads.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions (`/weather`).
    async fn fetch_weather(&self, query: &LocationQuery) -> Result<RawWeatherSample, ApiError>;

    /// 5-day / 3-hour samples (`/forecast`), in the order the API sent them.
    async fn fetch_forecast(
        &self,
        query: &LocationQuery,
    ) -> Result<Vec<RawForecastSample>, ApiError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<OpenWeatherProvider> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured.\n\
                 Hint: run `meteo configure` or set METEO_API_KEY."
        )
    })?;

    Ok(OpenWeatherProvider::new(config.api_url(), api_key))
}
