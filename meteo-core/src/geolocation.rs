//! One-shot position queries.
//!
//! A [`Geolocator`] wraps an optional platform [`PositionSource`]. Without a
//! source geolocation is unsupported and no query is ever attempted.

use std::{fmt::Debug, sync::Mutex, time::Duration};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tokio::time::Instant;
use tracing::{debug, instrument};

use crate::{error::GeolocationError, model::Coordinates};

pub const IP_API_URL: &str = "http://ip-api.com/json";

/// Accuracy and freshness policy of a position query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    pub enable_high_accuracy: bool,
    pub timeout: Duration,
    /// Oldest previously obtained position still accepted.
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            timeout: Duration::from_secs(10),
            maximum_age: Duration::from_secs(5 * 60),
        }
    }
}

/// Failure codes reported by a position source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionErrorCode {
    PermissionDenied,
    PositionUnavailable,
    Timeout,
    Other(u16),
}

impl From<PositionErrorCode> for GeolocationError {
    fn from(code: PositionErrorCode) -> Self {
        match code {
            PositionErrorCode::PermissionDenied => GeolocationError::PermissionDenied,
            PositionErrorCode::PositionUnavailable => GeolocationError::PositionUnavailable,
            PositionErrorCode::Timeout => GeolocationError::Timeout,
            PositionErrorCode::Other(_) => GeolocationError::Unknown,
        }
    }
}

/// Something that can tell where the machine is.
#[async_trait]
pub trait PositionSource: Send + Sync + Debug {
    async fn current_position(
        &self,
        options: &PositionOptions,
    ) -> Result<Coordinates, PositionErrorCode>;
}

#[derive(Debug)]
pub struct Geolocator {
    source: Option<Box<dyn PositionSource>>,
    options: PositionOptions,
    last: Mutex<Option<(Instant, Coordinates)>>,
}

impl Geolocator {
    pub fn new(source: Box<dyn PositionSource>) -> Self {
        Self {
            source: Some(source),
            options: PositionOptions::default(),
            last: Mutex::new(None),
        }
    }

    /// A geolocator on a platform without any position source.
    pub fn unsupported() -> Self {
        Self {
            source: None,
            options: PositionOptions::default(),
            last: Mutex::new(None),
        }
    }

    pub fn is_supported(&self) -> bool {
        self.source.is_some()
    }

    /// Resolves the current position once. A position obtained less than
    /// `maximum_age` ago is returned as is.
    #[instrument(level = "debug", skip(self))]
    pub async fn get_current_position(&self) -> Result<Coordinates, GeolocationError> {
        let source = self.source.as_ref().ok_or(GeolocationError::Unsupported)?;

        if let Some(cached) = self.cached() {
            debug!(?cached, "using cached position");
            return Ok(cached);
        }

        let position =
            match tokio::time::timeout(self.options.timeout, source.current_position(&self.options))
                .await
            {
                Ok(result) => result?,
                Err(_) => return Err(GeolocationError::Timeout),
            };

        if let Ok(mut last) = self.last.lock() {
            *last = Some((Instant::now(), position));
        }
        debug!(?position, "position resolved");
        Ok(position)
    }

    fn cached(&self) -> Option<Coordinates> {
        let last = self.last.lock().ok()?;
        let (at, position) = (*last)?;
        (at.elapsed() <= self.options.maximum_age).then_some(position)
    }
}

/// A position fixed by the user.
#[derive(Debug, Clone, Copy)]
pub struct FixedSource {
    position: Coordinates,
}

impl FixedSource {
    pub fn new(position: Coordinates) -> Self {
        Self { position }
    }
}

#[async_trait]
impl PositionSource for FixedSource {
    async fn current_position(
        &self,
        _options: &PositionOptions,
    ) -> Result<Coordinates, PositionErrorCode> {
        Ok(self.position)
    }
}

/// Approximate position from the public IP address (ip-api.com).
#[derive(Debug, Clone)]
pub struct IpApiSource {
    url: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

impl IpApiSource {
    pub fn new() -> Self {
        Self::with_url(IP_API_URL)
    }

    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            http: Client::new(),
        }
    }
}

impl Default for IpApiSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PositionSource for IpApiSource {
    async fn current_position(
        &self,
        options: &PositionOptions,
    ) -> Result<Coordinates, PositionErrorCode> {
        // IP lookups only know one accuracy level.
        debug!(high_accuracy = options.enable_high_accuracy, url = %self.url, "querying ip-api");

        let res = self
            .http
            .get(&self.url)
            .query(&[("fields", "status,message,lat,lon")])
            .send()
            .await
            .map_err(|err| {
                debug!(%err, "ip-api unreachable");
                PositionErrorCode::PositionUnavailable
            })?;

        match res.status() {
            StatusCode::FORBIDDEN => return Err(PositionErrorCode::PermissionDenied),
            status if !status.is_success() => return Err(PositionErrorCode::Other(status.as_u16())),
            _ => {}
        }

        let body: IpApiResponse = res
            .json()
            .await
            .map_err(|_| PositionErrorCode::PositionUnavailable)?;

        match (body.status.as_str(), body.lat, body.lon) {
            ("success", Some(latitude), Some(longitude)) => Ok(Coordinates { latitude, longitude }),
            _ => {
                debug!(message = ?body.message, "ip-api could not locate this address");
                Err(PositionErrorCode::PositionUnavailable)
            }
        }
    }
}
