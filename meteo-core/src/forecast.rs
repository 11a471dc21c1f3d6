//! Reduces the 3-hourly `/forecast` samples to one summary per day.

use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone, Timelike, Weekday};
use tracing::debug;

use crate::{
    mapper::{condition_fields, round_half_up},
    model::{DayForecast, RawForecastSample},
};

/// Number of days shown after today.
pub const MAX_DAYS: usize = 5;

/// Hours (inclusive) in which a sample counts as "midday".
const MIDDAY_HOURS: std::ops::RangeInclusive<u32> = 11..=13;

/// Aggregates samples in the local time zone, skipping today.
pub fn aggregate(samples: &[RawForecastSample]) -> Vec<DayForecast> {
    let today = Local::now().date_naive();
    aggregate_at(samples, today, &Local)
}

/// Aggregates samples into at most [`MAX_DAYS`] day summaries, dates taken
/// in `tz`. The group for `today` is dropped; groups come out in ascending
/// date order.
pub fn aggregate_at<Tz: TimeZone>(
    samples: &[RawForecastSample],
    today: NaiveDate,
    tz: &Tz,
) -> Vec<DayForecast> {
    let mut dated: Vec<(DateTime<Tz>, &RawForecastSample)> = samples
        .iter()
        .filter_map(|s| match DateTime::from_timestamp(s.dt, 0) {
            Some(utc) => Some((utc.with_timezone(tz), s)),
            None => {
                debug!(dt = s.dt, "skipping forecast sample with out-of-range timestamp");
                None
            }
        })
        .collect();
    // Group boundaries assume chronological order.
    dated.sort_by_key(|(_, s)| s.dt);

    let mut groups: Vec<(NaiveDate, Vec<(u32, &RawForecastSample)>)> = Vec::new();
    for (local, sample) in dated {
        let date = local.date_naive();
        if date == today {
            continue;
        }
        let entry = (local.hour(), sample);
        match groups.last_mut() {
            Some((last, items)) if *last == date => items.push(entry),
            _ => groups.push((date, vec![entry])),
        }
    }

    groups
        .iter()
        .take(MAX_DAYS)
        .enumerate()
        .filter_map(|(index, (date, items))| summarize(index, *date, items))
        .collect()
}

/// The first sample in the midday window, or the earliest of the day.
fn representative<'a>(items: &[(u32, &'a RawForecastSample)]) -> Option<&'a RawForecastSample> {
    items
        .iter()
        .find(|(hour, _)| MIDDAY_HOURS.contains(hour))
        .or_else(|| items.first())
        .map(|(_, sample)| *sample)
}

fn summarize(
    index: usize,
    date: NaiveDate,
    items: &[(u32, &RawForecastSample)],
) -> Option<DayForecast> {
    let rep = representative(items)?;

    let temp_min = items
        .iter()
        .map(|(_, s)| s.main.temp_min)
        .fold(f64::INFINITY, f64::min);
    let temp_max = items
        .iter()
        .map(|(_, s)| s.main.temp_max)
        .fold(f64::NEG_INFINITY, f64::max);

    let (description, icon, icon_class) = condition_fields(&rep.weather);

    Some(DayForecast {
        date: date.format("%Y-%m-%d").to_string(),
        day_name: day_label(index, date).to_string(),
        temperature: round_half_up(rep.main.temp),
        temp_min: round_half_up(temp_min),
        temp_max: round_half_up(temp_max),
        description,
        icon,
        icon_class,
        humidity: rep.main.humidity,
        wind_speed: rep.wind.speed,
        precipitation: round_half_up(rep.pop * 100.0),
    })
}

/// "Demain" for the first day shown, the weekday name otherwise.
fn day_label(index: usize, date: NaiveDate) -> &'static str {
    if index == 0 {
        return "Demain";
    }
    match date.weekday() {
        Weekday::Mon => "Lundi",
        Weekday::Tue => "Mardi",
        Weekday::Wed => "Mercredi",
        Weekday::Thu => "Jeudi",
        Weekday::Fri => "Vendredi",
        Weekday::Sat => "Samedi",
        Weekday::Sun => "Dimanche",
    }
}
