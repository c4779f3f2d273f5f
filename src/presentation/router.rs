// Router assembly
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    air_quality, current_weather, daily_forecast, detailed_forecast, health_check, hourly_chart,
    index, not_found,
};
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    // Dashboard front end is served from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/weather/current/:city", get(current_weather))
        .route("/weather/forecast/:city", get(detailed_forecast))
        .route("/weather/daily/:city", get(daily_forecast))
        .route("/weather/hourly-chart/:city", get(hourly_chart))
        .route("/weather/air-quality/:city", get(air_quality))
        .fallback(not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
