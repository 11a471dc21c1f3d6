use serde::{Deserialize, Serialize};

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// What a lookup is about: a city name or a position.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    City(String),
    Coordinates(Coordinates),
}

impl LocationQuery {
    pub fn city(name: impl Into<String>) -> Self {
        LocationQuery::City(name.into())
    }

    pub fn coordinates(latitude: f64, longitude: f64) -> Self {
        LocationQuery::Coordinates(Coordinates { latitude, longitude })
    }

    /// Results of a coordinate query describe "where I am".
    pub fn is_current_location(&self) -> bool {
        matches!(self, LocationQuery::Coordinates(_))
    }

    /// Location half of the query string (`q` or `lat`/`lon`).
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        match self {
            LocationQuery::City(city) => vec![("q", city.clone())],
            LocationQuery::Coordinates(c) => vec![
                ("lat", c.latitude.to_string()),
                ("lon", c.longitude.to_string()),
            ],
        }
    }
}

impl std::fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationQuery::City(city) => f.write_str(city),
            LocationQuery::Coordinates(c) => write!(f, "{},{}", c.latitude, c.longitude),
        }
    }
}

/// One entry of the `weather[]` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCondition {
    /// Condition group, e.g. "Clouds".
    pub main: String,
    #[serde(default)]
    pub description: String,
    /// Icon token, e.g. "04d".
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMain {
    pub temp: f64,
    #[serde(default)]
    pub temp_min: f64,
    #[serde(default)]
    pub temp_max: f64,
    pub humidity: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawWind {
    pub speed: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSys {
    #[serde(default)]
    pub country: String,
}

/// Body of `GET /weather`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawWeatherSample {
    #[serde(default)]
    pub name: String,
    pub dt: i64,
    pub main: RawMain,
    pub weather: Vec<RawCondition>,
    pub wind: RawWind,
    #[serde(default)]
    pub sys: RawSys,
}

/// One 3-hourly entry of `GET /forecast`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawForecastSample {
    /// Unix seconds.
    pub dt: i64,
    pub main: RawMain,
    pub weather: Vec<RawCondition>,
    pub wind: RawWind,
    /// Probability of precipitation, 0..=1.
    #[serde(default)]
    pub pop: f64,
}

/// Body of `GET /forecast`; only `list` is used.
#[derive(Debug, Clone, Deserialize)]
pub struct RawForecastResponse {
    pub list: Vec<RawForecastSample>,
}

/// Current weather, ready to render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherDisplay {
    pub name: String,
    pub temperature: i32,
    pub description: String,
    pub humidity: u8,
    pub wind_speed: f64,
    pub icon: String,
    pub icon_class: String,
    pub country: String,
    pub is_current_location: bool,
}

/// Summary of one forecast day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayForecast {
    /// `YYYY-MM-DD`
    pub date: String,
    pub day_name: String,
    pub temperature: i32,
    pub temp_min: i32,
    pub temp_max: i32,
    pub description: String,
    pub icon: String,
    pub icon_class: String,
    pub humidity: u8,
    pub wind_speed: f64,
    /// Percent.
    pub precipitation: i32,
}

/// Everything one lookup produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub current: WeatherDisplay,
    pub forecast: Vec<DayForecast>,
}
