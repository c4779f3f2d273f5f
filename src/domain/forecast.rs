// Forecast domain model - 3-hourly samples and daily aggregation
use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use super::weather::DailyForecastEntry;

pub const FORECAST_DAYS: usize = 5;

/// One 3-hourly forecast entry as reported by the provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastSample {
    #[serde(rename = "dt")]
    pub timestamp: i64,
    #[serde(rename = "temp")]
    pub temperature: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressure: Option<u32>,
    pub humidity: u8,
    pub description: String,
    pub clouds: u8,
    pub wind_speed: f64,
    pub wind_deg: u16,
    /// Probability of precipitation, 0.0 to 1.0.
    pub pop: f64,
    pub rain_3h: f64,
}

/// Groups samples into calendar days in the city's local time and
/// summarizes each day. Days come out in ascending order and at most
/// `max_days` are returned.
///
/// Each day's description is taken from its earliest sample.
pub fn aggregate_daily(
    samples: &[ForecastSample],
    utc_offset_secs: i32,
    max_days: usize,
) -> Vec<DailyForecastEntry> {
    let offset = FixedOffset::east_opt(utc_offset_secs).unwrap_or_else(|| Utc.fix());

    let mut ordered: Vec<&ForecastSample> = samples.iter().collect();
    ordered.sort_by_key(|s| s.timestamp);

    let mut buckets: BTreeMap<NaiveDate, Vec<&ForecastSample>> = BTreeMap::new();
    for sample in ordered {
        let Some(utc) = DateTime::from_timestamp(sample.timestamp, 0) else {
            tracing::debug!("Skipping forecast sample with invalid timestamp {}", sample.timestamp);
            continue;
        };
        let date = utc.with_timezone(&offset).date_naive();
        buckets.entry(date).or_default().push(sample);
    }

    buckets
        .into_iter()
        .take(max_days)
        .map(|(date, day)| summarize_day(date, &day))
        .collect()
}

fn summarize_day(date: NaiveDate, day: &[&ForecastSample]) -> DailyForecastEntry {
    let count = day.len() as f64;
    let temps = day.iter().map(|s| s.temperature);

    let temp_min = temps.clone().fold(f64::INFINITY, f64::min);
    let temp_max = temps.clone().fold(f64::NEG_INFINITY, f64::max);
    let temp_avg = temps.sum::<f64>() / count;
    let humidity = day.iter().map(|s| s.humidity as f64).sum::<f64>() / count;
    let wind_speed = day.iter().map(|s| s.wind_speed).sum::<f64>() / count;
    let pop = day.iter().map(|s| s.pop).fold(0.0, f64::max);

    DailyForecastEntry {
        date: date.format("%Y-%m-%d").to_string(),
        day_name: date.format("%A").to_string(),
        temp_min,
        temp_max,
        temp_avg: round1(temp_avg),
        description: day[0].description.clone(),
        humidity: humidity.round() as u8,
        wind_speed: round1(wind_speed),
        pop: (pop * 100.0).round().clamp(0.0, 100.0) as u8,
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
