// Weather domain models - Response value objects served to the dashboard
use serde::Serialize;

use super::forecast::ForecastSample;

/// Current conditions for a city, flattened from the provider's response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentConditions {
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressure: Option<u32>,
    pub wind_speed: f64,
    pub wind_deg: u16,
    pub description: String,
    pub sunrise: i64,
    pub sunset: i64,
}

/// One calendar day of aggregated forecast data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyForecastEntry {
    pub date: String,
    pub day_name: String,
    pub temp_min: f64,
    pub temp_max: f64,
    pub temp_avg: f64,
    pub description: String,
    pub humidity: u8,
    pub wind_speed: f64,
    /// Highest precipitation probability of the day, in percent.
    pub pop: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyForecast {
    pub forecast: Vec<DailyForecastEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyPoint {
    pub timestamp: i64,
    pub temperature: f64,
    pub humidity: u8,
    pub wind_speed: f64,
}

impl From<&ForecastSample> for HourlyPoint {
    fn from(sample: &ForecastSample) -> Self {
        Self {
            timestamp: sample.timestamp,
            temperature: sample.temperature,
            humidity: sample.humidity,
            wind_speed: sample.wind_speed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyChart {
    pub points: Vec<HourlyPoint>,
}

/// Unaggregated 3-hourly forecast for a city.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailedForecast {
    pub city: String,
    pub country: String,
    /// Offset from UTC in seconds.
    pub timezone: i32,
    pub forecast: Vec<ForecastSample>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Pollutant concentrations in μg/m3.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollutantConcentrations {
    pub co: f64,
    pub no2: f64,
    pub o3: f64,
    pub pm2_5: f64,
    pub pm10: f64,
    pub so2: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirQualitySample {
    pub aqi: u8,
    pub aqi_label: String,
    pub components: PollutantConcentrations,
}

impl AirQualitySample {
    pub fn new(aqi: u8, components: PollutantConcentrations) -> Self {
        Self {
            aqi,
            aqi_label: Self::label(aqi).to_string(),
            components,
        }
    }

    fn label(aqi: u8) -> &'static str {
        match aqi {
            1 => "Good",
            2 => "Fair",
            3 => "Moderate",
            4 => "Poor",
            5 => "Very Poor",
            _ => "Unknown",
        }
    }
}
