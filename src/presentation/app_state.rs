// Application state for HTTP handlers
use crate::application::weather_service::WeatherService;

#[derive(Clone)]
pub struct AppState {
    pub weather_service: WeatherService,
}
