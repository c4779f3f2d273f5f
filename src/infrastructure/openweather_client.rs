// OpenWeather adapter - Typed upstream schemas and the provider implementation
use crate::application::error::GatewayError;
use crate::application::weather_provider::WeatherProvider;
use crate::domain::city::CityQuery;
use crate::domain::forecast::ForecastSample;
use crate::domain::weather::{
    AirQualitySample, Coordinates, CurrentConditions, DetailedForecast, PollutantConcentrations,
};
use crate::infrastructure::config::{ApiKey, OpenWeatherSettings};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

const CURRENT_PATH: &str = "/data/2.5/weather";
const FORECAST_PATH: &str = "/data/2.5/forecast";
const GEOCODE_PATH: &str = "/geo/1.0/direct";
const AIR_POLLUTION_PATH: &str = "/data/2.5/air_pollution";

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    base_url: String,
    units: String,
    api_key: ApiKey,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(settings: &OpenWeatherSettings, api_key: ApiKey) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to build OpenWeather HTTP client")?;

        Ok(Self::with_http(settings, api_key, http))
    }

    pub fn with_http(settings: &OpenWeatherSettings, api_key: ApiKey, http: Client) -> Self {
        Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            units: settings.units.clone(),
            api_key,
            http,
        }
    }

    /// GET `path` and decode the body as `T`. A 404 becomes
    /// `UpstreamNotFound`; every other failure is `UpstreamUnavailable`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        what: &str,
    ) -> Result<T, GatewayError> {
        let url = format!("{}{}", self.base_url, path);

        let res = self
            .http
            .get(&url)
            .query(query)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| {
                GatewayError::UpstreamUnavailable(format!(
                    "Failed to send request to OpenWeather ({what}): {e}"
                ))
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            GatewayError::UpstreamUnavailable(format!(
                "Failed to read OpenWeather {what} response body: {e}"
            ))
        })?;

        if status == StatusCode::NOT_FOUND {
            tracing::debug!("OpenWeather {} returned 404: {}", what, truncate_body(&body));
            return Err(GatewayError::UpstreamNotFound);
        }

        if !status.is_success() {
            return Err(GatewayError::UpstreamUnavailable(format!(
                "OpenWeather {what} request failed with status {status}: {}",
                truncate_body(&body),
            )));
        }

        serde_json::from_str(&body).map_err(|e| {
            GatewayError::UpstreamUnavailable(format!("Failed to parse OpenWeather {what} JSON: {e}"))
        })
    }

    fn city_query<'a>(&'a self, city: &'a CityQuery) -> [(&'a str, &'a str); 2] {
        [("q", city.as_str()), ("units", self.units.as_str())]
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    #[serde(default)]
    pressure: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    #[serde(default)]
    pressure: Option<u32>,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
    #[serde(default)]
    deg: u16,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    sys: OwSys,
}

#[derive(Debug, Default, Deserialize)]
struct OwClouds {
    all: u8,
}

#[derive(Debug, Default, Deserialize)]
struct OwRain {
    #[serde(rename = "3h", default)]
    three_hours: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwForecastMain,
    weather: Vec<OwWeather>,
    #[serde(default)]
    clouds: OwClouds,
    wind: OwWind,
    #[serde(default)]
    pop: f64,
    #[serde(default)]
    rain: OwRain,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    name: String,
    #[serde(default)]
    country: String,
    #[serde(default)]
    timezone: i32,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    city: OwCity,
    list: Vec<OwForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct OwGeocodeEntry {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwAqi {
    aqi: u8,
}

#[derive(Debug, Deserialize)]
struct OwComponents {
    co: f64,
    no2: f64,
    o3: f64,
    pm2_5: f64,
    pm10: f64,
    so2: f64,
}

#[derive(Debug, Deserialize)]
struct OwPollutionEntry {
    main: OwAqi,
    components: OwComponents,
}

#[derive(Debug, Deserialize)]
struct OwPollutionResponse {
    list: Vec<OwPollutionEntry>,
}

fn first_description(weather: Vec<OwWeather>, what: &str) -> Result<String, GatewayError> {
    weather
        .into_iter()
        .next()
        .map(|w| w.description)
        .ok_or_else(|| {
            GatewayError::UpstreamUnavailable(format!(
                "OpenWeather {what} response contained no weather description"
            ))
        })
}

impl OwForecastEntry {
    fn into_sample(self) -> Result<ForecastSample, GatewayError> {
        Ok(ForecastSample {
            timestamp: self.dt,
            temperature: self.main.temp,
            feels_like: self.main.feels_like,
            temp_min: self.main.temp_min,
            temp_max: self.main.temp_max,
            pressure: self.main.pressure,
            humidity: self.main.humidity,
            description: first_description(self.weather, "forecast")?,
            clouds: self.clouds.all,
            wind_speed: self.wind.speed,
            wind_deg: self.wind.deg,
            pop: self.pop,
            rain_3h: self.rain.three_hours,
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current(&self, city: &CityQuery) -> Result<CurrentConditions, GatewayError> {
        let parsed: OwCurrentResponse = self
            .get_json(CURRENT_PATH, &self.city_query(city), "current weather")
            .await?;

        Ok(CurrentConditions {
            temperature: parsed.main.temp,
            feels_like: parsed.main.feels_like,
            humidity: parsed.main.humidity,
            pressure: parsed.main.pressure,
            wind_speed: parsed.wind.speed,
            wind_deg: parsed.wind.deg,
            description: first_description(parsed.weather, "current weather")?,
            sunrise: parsed.sys.sunrise,
            sunset: parsed.sys.sunset,
        })
    }

    async fn forecast(&self, city: &CityQuery) -> Result<DetailedForecast, GatewayError> {
        let parsed: OwForecastResponse = self
            .get_json(FORECAST_PATH, &self.city_query(city), "forecast")
            .await?;

        let forecast = parsed
            .list
            .into_iter()
            .map(OwForecastEntry::into_sample)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DetailedForecast {
            city: parsed.city.name,
            country: parsed.city.country,
            timezone: parsed.city.timezone,
            forecast,
        })
    }

    async fn geocode(&self, city: &CityQuery) -> Result<Option<Coordinates>, GatewayError> {
        let parsed: Vec<OwGeocodeEntry> = self
            .get_json(GEOCODE_PATH, &[("q", city.as_str()), ("limit", "1")], "geocoding")
            .await?;

        Ok(parsed.into_iter().next().map(|entry| Coordinates {
            lat: entry.lat,
            lon: entry.lon,
        }))
    }

    async fn air_pollution(&self, at: Coordinates) -> Result<AirQualitySample, GatewayError> {
        let lat = at.lat.to_string();
        let lon = at.lon.to_string();
        let parsed: OwPollutionResponse = self
            .get_json(AIR_POLLUTION_PATH, &[("lat", lat.as_str()), ("lon", lon.as_str())], "air pollution")
            .await?;

        let entry = parsed.list.into_iter().next().ok_or_else(|| {
            GatewayError::UpstreamUnavailable(
                "OpenWeather air pollution response contained no data".to_string(),
            )
        })?;

        let c = entry.components;
        Ok(AirQualitySample::new(
            entry.main.aqi,
            PollutantConcentrations {
                co: c.co,
                no2: c.no2,
                o3: c.o3,
                pm2_5: c.pm2_5,
                pm10: c.pm10,
                so2: c.so2,
            },
        ))
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
