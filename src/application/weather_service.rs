// Weather service - Use cases behind each gateway endpoint
use crate::application::error::GatewayError;
use crate::application::weather_provider::WeatherProvider;
use crate::domain::city::CityQuery;
use crate::domain::forecast::{aggregate_daily, FORECAST_DAYS};
use crate::domain::weather::{
    AirQualitySample, CurrentConditions, DailyForecast, DetailedForecast, HourlyChart, HourlyPoint,
};
use std::sync::Arc;

/// Provider steps are 3 hours wide.
const HOURS_PER_POINT: u32 = 3;

#[derive(Clone)]
pub struct WeatherService {
    provider: Arc<dyn WeatherProvider>,
}

impl WeatherService {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    pub async fn get_current(&self, city: &str) -> Result<CurrentConditions, GatewayError> {
        let city = parse_city(city)?;
        self.provider.current(&city).await
    }

    pub async fn get_daily_forecast(&self, city: &str) -> Result<DailyForecast, GatewayError> {
        let city = parse_city(city)?;
        let report = self.provider.forecast(&city).await?;

        let forecast = aggregate_daily(&report.forecast, report.timezone, FORECAST_DAYS);
        if forecast.is_empty() {
            return Err(GatewayError::AggregationEmpty);
        }

        Ok(DailyForecast { forecast })
    }

    /// Chart points at the provider's native granularity. `hours` limits
    /// the window to the first `hours / 3` points.
    pub async fn get_hourly_chart(
        &self,
        city: &str,
        hours: Option<u32>,
    ) -> Result<HourlyChart, GatewayError> {
        let city = parse_city(city)?;
        let report = self.provider.forecast(&city).await?;

        let limit = hours
            .map(|h| (h / HOURS_PER_POINT) as usize)
            .unwrap_or(report.forecast.len());

        let points = report
            .forecast
            .iter()
            .take(limit)
            .map(HourlyPoint::from)
            .collect();

        Ok(HourlyChart { points })
    }

    pub async fn get_detailed_forecast(&self, city: &str) -> Result<DetailedForecast, GatewayError> {
        let city = parse_city(city)?;
        self.provider.forecast(&city).await
    }

    /// Geocodes the city, then reads pollution at its coordinates.
    pub async fn get_air_quality(&self, city: &str) -> Result<AirQualitySample, GatewayError> {
        let city = parse_city(city)?;

        let coordinates = self
            .provider
            .geocode(&city)
            .await?
            .ok_or(GatewayError::GeocodeNotFound)?;

        tracing::debug!(
            "Geocoded {} to ({}, {})",
            city,
            coordinates.lat,
            coordinates.lon
        );

        // Only geocoding decides whether a city exists.
        self.provider
            .air_pollution(coordinates)
            .await
            .map_err(|e| match e {
                GatewayError::UpstreamNotFound => GatewayError::UpstreamUnavailable(format!(
                    "air pollution reading missing for {city} at ({}, {})",
                    coordinates.lat, coordinates.lon
                )),
                other => other,
            })
    }
}

fn parse_city(raw: &str) -> Result<CityQuery, GatewayError> {
    CityQuery::parse(raw).ok_or(GatewayError::InvalidInput("city name"))
}
