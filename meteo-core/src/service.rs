//! Lookup sequencing: location → current weather ∥ forecast.

use tracing::{info, warn};

use crate::{
    error::{ApiError, GeolocationError, LookupError},
    forecast::aggregate,
    geolocation::Geolocator,
    mapper::map_current,
    model::{DayForecast, LocationQuery, WeatherDisplay, WeatherReport},
    provider::WeatherProvider,
};

#[derive(Debug, Clone)]
pub struct WeatherService<P> {
    provider: P,
}

impl<P: WeatherProvider> WeatherService<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    #[cfg(test)]
    pub(crate) fn provider(&self) -> &P {
        &self.provider
    }

    /// Current weather for `query`, mapped for display.
    pub async fn current(&self, query: &LocationQuery) -> Result<WeatherDisplay, ApiError> {
        let raw = self.provider.fetch_weather(query).await?;
        Ok(map_current(&raw, query.is_current_location()))
    }

    /// Daily forecast for `query`.
    pub async fn forecast(&self, query: &LocationQuery) -> Result<Vec<DayForecast>, ApiError> {
        let samples = self.provider.fetch_forecast(query).await?;
        Ok(aggregate(&samples))
    }

    /// Weather and forecast requested concurrently. Only the weather request
    /// can fail the lookup; a failed forecast leaves the forecast empty.
    pub async fn lookup(&self, query: &LocationQuery) -> Result<WeatherReport, ApiError> {
        let (current, forecast) = tokio::join!(self.current(query), self.forecast(query));

        Ok(WeatherReport {
            current: current?,
            forecast: tolerate_forecast_failure(forecast),
        })
    }

    /// Lookup by city name as typed by the user. The forecast is requested
    /// for the city the API resolved ("name,country").
    pub async fn search_city(&self, city: &str) -> Result<WeatherReport, LookupError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(LookupError::EmptyCity);
        }

        let current = self
            .current(&LocationQuery::city(city))
            .await
            .map_err(LookupError::Search)?;
        info!(name = %current.name, country = %current.country, "city resolved");

        let resolved = LocationQuery::city(format!("{},{}", current.name, current.country));
        let forecast = tolerate_forecast_failure(self.forecast(&resolved).await);

        Ok(WeatherReport { current, forecast })
    }

    /// Lookup at the position reported by `geolocator`.
    pub async fn lookup_here(&self, geolocator: &Geolocator) -> Result<WeatherReport, LookupError> {
        if !geolocator.is_supported() {
            return Err(GeolocationError::Unsupported.into());
        }

        let position = geolocator.get_current_position().await?;
        info!(latitude = position.latitude, longitude = position.longitude, "position resolved");

        self.lookup(&LocationQuery::Coordinates(position))
            .await
            .map_err(LookupError::Weather)
    }
}

/// The forecast is secondary: its failure is logged and shows as no days.
fn tolerate_forecast_failure(forecast: Result<Vec<DayForecast>, ApiError>) -> Vec<DayForecast> {
    forecast.unwrap_or_else(|err| {
        warn!(error = %err, "failed to load forecast");
        Vec::new()
    })
}
