// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

#[cfg(test)]
mod test_support;

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::application::weather_service::WeatherService;
use crate::infrastructure::config::load_gateway_config;
use crate::infrastructure::openweather_client::OpenWeatherClient;
use crate::presentation::app_state::AppState;
use crate::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration; a missing API key stops startup here
    let config = load_gateway_config()?;
    tracing::debug!("Loaded configuration: {:?}", config);

    // Create provider (infrastructure layer)
    let provider = Arc::new(OpenWeatherClient::new(
        &config.settings.openweather,
        config.api_key.clone(),
    )?);

    // Create services (application layer)
    let weather_service = WeatherService::new(provider);

    // Create application state
    let state = Arc::new(AppState { weather_service });

    // Build router (presentation layer)
    let router = build_router(state);

    // Start server
    let addr = format!("{}:{}", config.settings.server.host, config.settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        "Starting weather-gateway on {} (units: {})",
        listener.local_addr()?,
        config.settings.openweather.units
    );

    axum::serve(listener, router).await?;

    Ok(())
}
