// Gateway configuration - Layered settings and the provider credential
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

pub const API_KEY_VAR: &str = "OPENWEATHER_API_KEY";

const SUPPORTED_UNITS: [&str; 3] = ["standard", "metric", "imperial"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("OPENWEATHER_API_KEY is not set or empty")]
    MissingApiKey,

    #[error("unsupported unit system '{0}', expected one of standard, metric, imperial")]
    InvalidUnits(String),

    #[error(transparent)]
    Load(#[from] config::ConfigError),
}

#[derive(Debug, Deserialize, Clone)]
pub struct GatewaySettings {
    pub server: ServerSettings,
    pub openweather: OpenWeatherSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OpenWeatherSettings {
    pub base_url: String,
    pub units: String,
    pub timeout_secs: u64,
}

/// OpenWeather credential. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Result<Self, ConfigError> {
        let value = value.into().trim().to_string();
        if value.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Everything the gateway needs at startup, injected into the provider.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub settings: GatewaySettings,
    pub api_key: ApiKey,
}

/// Load settings from defaults, `config/gateway.*` and `GATEWAY__*`
/// environment variables, then read the API key from `OPENWEATHER_API_KEY`.
pub fn load_gateway_config() -> Result<GatewayConfig, ConfigError> {
    let settings = load_settings(None)?;
    let api_key = std::env::var(API_KEY_VAR)
        .map_err(|_| ConfigError::MissingApiKey)
        .and_then(ApiKey::new)?;

    Ok(GatewayConfig { settings, api_key })
}

/// `env` replaces the process environment when given.
fn load_settings(env: Option<config::Map<String, String>>) -> Result<GatewaySettings, ConfigError> {
    let settings = config::Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8080_i64)?
        .set_default("openweather.base_url", "https://api.openweathermap.org")?
        .set_default("openweather.units", "metric")?
        .set_default("openweather.timeout_secs", 10_i64)?
        .add_source(config::File::with_name("config/gateway").required(false))
        .add_source(
            config::Environment::with_prefix("GATEWAY")
                .separator("__")
                .try_parsing(true)
                .source(env),
        )
        .build()?;

    let mut settings: GatewaySettings = settings.try_deserialize()?;
    settings.openweather.base_url = settings.openweather.base_url.trim_end_matches('/').to_string();

    if !SUPPORTED_UNITS.contains(&settings.openweather.units.as_str()) {
        return Err(ConfigError::InvalidUnits(settings.openweather.units));
    }

    Ok(settings)
}
