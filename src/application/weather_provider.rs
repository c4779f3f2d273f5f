// Provider trait for upstream weather data access
use crate::application::error::GatewayError;
use crate::domain::city::CityQuery;
use crate::domain::weather::{AirQualitySample, Coordinates, CurrentConditions, DetailedForecast};
use async_trait::async_trait;

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Current conditions by city name
    async fn current(&self, city: &CityQuery) -> Result<CurrentConditions, GatewayError>;

    /// 5-day forecast in 3-hour steps, in provider order
    async fn forecast(&self, city: &CityQuery) -> Result<DetailedForecast, GatewayError>;

    /// Resolve a city name to coordinates; `None` when nothing matches
    async fn geocode(&self, city: &CityQuery) -> Result<Option<Coordinates>, GatewayError>;

    /// Current air pollution reading at the given coordinates
    async fn air_pollution(&self, at: Coordinates) -> Result<AirQualitySample, GatewayError>;
}
