//! Icon resolution from OpenWeather condition groups.

/// Font Awesome class for a weather condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherIcon {
    Sun,
    Moon,
    Cloud,
    CloudSun,
    CloudRain,
    Bolt,
    Snowflake,
    Smog,
    Wind,
}

impl WeatherIcon {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherIcon::Sun => "fas fa-sun",
            WeatherIcon::Moon => "fas fa-moon",
            WeatherIcon::Cloud => "fas fa-cloud",
            WeatherIcon::CloudSun => "fas fa-cloud-sun",
            WeatherIcon::CloudRain => "fas fa-cloud-rain",
            WeatherIcon::Bolt => "fas fa-bolt",
            WeatherIcon::Snowflake => "fas fa-snowflake",
            WeatherIcon::Smog => "fas fa-smog",
            WeatherIcon::Wind => "fas fa-wind",
        }
    }

    #[cfg(test)]
    pub(crate) const fn all() -> &'static [WeatherIcon] {
        &[
            WeatherIcon::Sun,
            WeatherIcon::Moon,
            WeatherIcon::Cloud,
            WeatherIcon::CloudSun,
            WeatherIcon::CloudRain,
            WeatherIcon::Bolt,
            WeatherIcon::Snowflake,
            WeatherIcon::Smog,
            WeatherIcon::Wind,
        ]
    }
}

impl std::fmt::Display for WeatherIcon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves the icon for a condition group (`weather[].main`) and icon token
/// (`weather[].icon`, e.g. "04d"). Unknown groups fall back to sun/moon.
pub fn resolve_icon(group: &str, icon_token: &str) -> WeatherIcon {
    let is_day = icon_token.contains('d');
    let sun_or_moon = if is_day { WeatherIcon::Sun } else { WeatherIcon::Moon };

    match group.to_lowercase().as_str() {
        "clear" => sun_or_moon,
        // 04x is "broken/overcast clouds"
        "clouds" if icon_token.contains("04") => WeatherIcon::Cloud,
        "clouds" => WeatherIcon::CloudSun,
        "rain" | "drizzle" => WeatherIcon::CloudRain,
        "thunderstorm" => WeatherIcon::Bolt,
        "snow" => WeatherIcon::Snowflake,
        "mist" | "fog" | "haze" => WeatherIcon::Smog,
        "dust" | "sand" => WeatherIcon::Wind,
        _ => sun_or_moon,
    }
}
