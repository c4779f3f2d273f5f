// HTTP request handlers
use crate::application::error::GatewayError;
use crate::domain::weather::{
    AirQualitySample, CurrentConditions, DailyForecast, DetailedForecast, HourlyChart,
};
use crate::infrastructure::http_response::error_response;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::Response,
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct ChartQuery {
    pub hours: Option<u32>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub time: String,
    pub version: &'static str,
}

/// Service index listing the available endpoints
pub async fn index() -> Json<Value> {
    Json(json!({
        "message": "Weather Gateway",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "current_weather": "/weather/current/{city}",
            "detailed_forecast": "/weather/forecast/{city}",
            "daily_forecast": "/weather/daily/{city}",
            "hourly_chart_data": "/weather/hourly-chart/{city}",
            "air_quality": "/weather/air-quality/{city}",
            "health": "/health"
        }
    }))
}

/// Health check endpoint, never touches the provider
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        time: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn current_weather(
    Path(city): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<CurrentConditions>, GatewayError> {
    state.weather_service.get_current(&city).await.map(Json)
}

pub async fn detailed_forecast(
    Path(city): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<DetailedForecast>, GatewayError> {
    state.weather_service.get_detailed_forecast(&city).await.map(Json)
}

pub async fn daily_forecast(
    Path(city): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<DailyForecast>, GatewayError> {
    state.weather_service.get_daily_forecast(&city).await.map(Json)
}

/// Chart data, optionally limited with `?hours=N`
pub async fn hourly_chart(
    Path(city): Path<String>,
    query: Result<Query<ChartQuery>, QueryRejection>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<HourlyChart>, GatewayError> {
    let Query(query) = query.map_err(|_| GatewayError::InvalidInput("hours parameter"))?;

    state
        .weather_service
        .get_hourly_chart(&city, query.hours)
        .await
        .map(Json)
}

pub async fn air_quality(
    Path(city): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<AirQualitySample>, GatewayError> {
    state.weather_service.get_air_quality(&city).await.map(Json)
}

pub async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "not found")
}
