// Application layer - Use cases and the upstream provider port
pub mod error;
pub mod weather_provider;
pub mod weather_service;
