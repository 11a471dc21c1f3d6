use crate::{
    icon::resolve_icon,
    model::{RawCondition, RawWeatherSample, WeatherDisplay},
};

/// Rounds half-way values towards positive infinity (18.5 -> 19, -2.5 -> -2).
pub fn round_half_up(value: f64) -> i32 {
    let floor = value.floor();
    (if value - floor >= 0.5 { floor + 1.0 } else { floor }) as i32
}

/// Description, icon token and icon class of the first reported condition.
/// A payload without conditions gets empty strings and the fallback icon.
pub(crate) fn condition_fields(weather: &[RawCondition]) -> (String, String, String) {
    match weather.first() {
        Some(c) => (
            c.description.clone(),
            c.icon.clone(),
            resolve_icon(&c.main, &c.icon).as_str().to_string(),
        ),
        None => (
            String::new(),
            String::new(),
            resolve_icon("", "").as_str().to_string(),
        ),
    }
}

/// Builds the current-weather display record.
pub fn map_current(raw: &RawWeatherSample, is_current_location: bool) -> WeatherDisplay {
    let (description, icon, icon_class) = condition_fields(&raw.weather);

    WeatherDisplay {
        name: raw.name.clone(),
        temperature: round_half_up(raw.main.temp),
        description,
        humidity: raw.main.humidity,
        wind_speed: raw.wind.speed,
        icon,
        icon_class,
        country: raw.sys.country.clone(),
        is_current_location,
    }
}
