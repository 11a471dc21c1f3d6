use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::{
    error::ApiError,
    model::{LocationQuery, RawForecastResponse, RawForecastSample, RawWeatherSample},
};

use super::WeatherProvider;

pub const DEFAULT_API_URL: &str = "https://api.openweathermap.org/data/2.5";

const UNITS: &str = "metric";
const LANG: &str = "fr";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    base_url: String,
    api_key: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full query string for `query`: location half plus the fixed key,
    /// units and locale.
    fn params(&self, query: &LocationQuery) -> Vec<(&'static str, String)> {
        let mut params = query.query_params();
        params.extend([
            ("appid", self.api_key.clone()),
            ("units", UNITS.to_string()),
            ("lang", LANG.to_string()),
        ]);
        params
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &LocationQuery,
    ) -> Result<T, ApiError> {
        let url = format!("{}/{endpoint}", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&self.params(query))
            .send()
            .await
            .map_err(|err| {
                debug!(%err, %url, "OpenWeather request failed before any response");
                ApiError::NoConnection
            })?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            debug!(%status, body = %truncate_body(&body), "OpenWeather request rejected");
            return Err(ApiError::from_status(status.as_u16()));
        }

        serde_json::from_str(&body).map_err(|err| {
            debug!(%err, body = %truncate_body(&body), "unexpected OpenWeather payload");
            ApiError::InvalidResponse(err.to_string())
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(level = "debug", skip(self, query), fields(query = %query))]
    async fn fetch_weather(&self, query: &LocationQuery) -> Result<RawWeatherSample, ApiError> {
        self.get("weather", query).await
    }

    #[instrument(level = "debug", skip(self, query), fields(query = %query))]
    async fn fetch_forecast(
        &self,
        query: &LocationQuery,
    ) -> Result<Vec<RawForecastSample>, ApiError> {
        let parsed: RawForecastResponse = self.get("forecast", query).await?;
        debug!(samples = parsed.list.len(), "forecast received");
        Ok(parsed.list)
    }
}

fn truncate_body(body: &str) -> &str {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
