//! Plain-text rendering of a weather report.

use std::fmt::Write;

use chrono::{DateTime, TimeZone};
use meteo_core::{DayForecast, WeatherDisplay, WeatherReport};

pub fn report<Tz: TimeZone>(report: &WeatherReport, now: DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let mut out = current(&report.current, now);
    if !report.forecast.is_empty() {
        out.push('\n');
        out.push_str(&forecast(&report.forecast));
    }
    out
}

fn current<Tz: TimeZone>(weather: &WeatherDisplay, now: DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let mut out = String::new();
    let marker = if weather.is_current_location { " (position actuelle)" } else { "" };

    let _ = writeln!(out, "{}, {}{}", weather.name, weather.country, marker);
    let _ = writeln!(
        out,
        "  {}°C  {}  [{}]",
        weather.temperature, weather.description, weather.icon_class
    );
    let _ = writeln!(
        out,
        "  Humidité {}%  Vent {} m/s",
        weather.humidity, weather.wind_speed
    );
    let _ = writeln!(out, "  Mis à jour à {}", now.format("%H:%M:%S"));
    out
}

fn forecast(days: &[DayForecast]) -> String {
    let mut out = String::from("Prévisions\n");
    for day in days {
        let _ = writeln!(
            out,
            "  {:<9} {}  {:>3}°C ({:>3}/{:>3})  {:>3}% pluie  {}",
            day.day_name, day.date, day.temperature, day.temp_min, day.temp_max,
            day.precipitation, day.description
        );
    }
    out
}
