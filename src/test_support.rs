// Shared test helpers - Fake provider, upstream fixtures and in-process servers
use crate::application::error::GatewayError;
use crate::application::weather_provider::WeatherProvider;
use crate::application::weather_service::WeatherService;
use crate::domain::city::CityQuery;
use crate::domain::forecast::ForecastSample;
use crate::domain::weather::{
    AirQualitySample, Coordinates, CurrentConditions, DetailedForecast, PollutantConcentrations,
};
use crate::infrastructure::config::{ApiKey, OpenWeatherSettings};
use crate::infrastructure::openweather_client::OpenWeatherClient;
use crate::presentation::app_state::AppState;
use crate::presentation::router::build_router;
use async_trait::async_trait;
use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::IntoResponse,
    Router,
};
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

// 2023-11-14T00:00:00Z
const FORECAST_START: i64 = 1699920000;
const THREE_HOURS: i64 = 3 * 3600;

pub const CURRENT_LONDON: &str = r#"{"main":{"temp":15.2,"feels_like":14.8,"humidity":72},"weather":[{"description":"light rain"}],"wind":{"speed":3.1,"deg":210},"sys":{"sunrise":1700000000,"sunset":1700040000}}"#;

pub const GEOCODE_LONDON: &str =
    r#"[{"name":"London","lat":51.5073,"lon":-0.1276,"country":"GB","state":"England"}]"#;

pub const POLLUTION_LONDON: &str = r#"{"coord":{"lon":-0.1276,"lat":51.5073},"list":[{"main":{"aqi":2},"components":{"co":201.94,"no":0.02,"no2":0.77,"o3":68.66,"so2":0.64,"pm2_5":0.5,"pm10":0.54,"nh3":0.12},"dt":1700000000}]}"#;

/// Upstream forecast body with `n` 3-hourly entries from 2023-11-14 00:00 UTC.
/// Odd entries carry rain.
pub fn forecast_json(n: i64) -> String {
    let list: Vec<_> = (0..n)
        .map(|i| {
            let temp = 10.0 + (i % 8) as f64;
            let mut entry = json!({
                "dt": FORECAST_START + i * THREE_HOURS,
                "main": {
                    "temp": temp,
                    "feels_like": temp - 1.0,
                    "temp_min": temp,
                    "temp_max": temp,
                    "pressure": 1012,
                    "humidity": 70
                },
                "weather": [{ "id": 800, "main": "Clear", "description": "clear sky", "icon": "01d" }],
                "clouds": { "all": 20 },
                "wind": { "speed": 3.5, "deg": 200 },
                "pop": 0
            });
            if i % 2 == 1 {
                entry["pop"] = json!(0.4);
                entry["rain"] = json!({ "3h": 0.25 });
            }
            entry
        })
        .collect();

    json!({
        "cod": "200",
        "cnt": n,
        "list": list,
        "city": { "name": "London", "country": "GB", "timezone": 0 }
    })
    .to_string()
}

pub fn sample_current() -> CurrentConditions {
    CurrentConditions {
        temperature: 15.2,
        feels_like: 14.8,
        humidity: 72,
        pressure: None,
        wind_speed: 3.1,
        wind_deg: 210,
        description: "light rain".to_string(),
        sunrise: 1700000000,
        sunset: 1700040000,
    }
}

pub fn forecast_report(n: i64) -> DetailedForecast {
    let forecast = (0..n)
        .map(|i| ForecastSample {
            timestamp: FORECAST_START + i * THREE_HOURS,
            temperature: 10.0 + (i % 8) as f64,
            feels_like: 9.0,
            temp_min: 10.0,
            temp_max: 17.0,
            pressure: Some(1012),
            humidity: 70,
            description: "clear sky".to_string(),
            clouds: 20,
            wind_speed: 3.5,
            wind_deg: 200,
            pop: 0.0,
            rain_3h: 0.0,
        })
        .collect();

    DetailedForecast {
        city: "London".to_string(),
        country: "GB".to_string(),
        timezone: 0,
        forecast,
    }
}

pub fn sample_air_quality() -> AirQualitySample {
    AirQualitySample::new(
        2,
        PollutantConcentrations {
            co: 201.94,
            no2: 0.77,
            o3: 68.66,
            pm2_5: 0.5,
            pm10: 0.54,
            so2: 0.64,
        },
    )
}

/// In-memory provider. `None` responses mean the provider answered 404.
#[derive(Default)]
pub struct FakeProvider {
    pub current: Option<CurrentConditions>,
    pub forecast: Option<DetailedForecast>,
    pub coordinates: Option<Coordinates>,
    pub air: Option<AirQualitySample>,
    pub unavailable: bool,
    pub calls: Mutex<Vec<String>>,
}

impl FakeProvider {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<(), GatewayError> {
        self.calls.lock().unwrap().push(call);
        if self.unavailable {
            return Err(GatewayError::UpstreamUnavailable("fake outage".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl WeatherProvider for FakeProvider {
    async fn current(&self, city: &CityQuery) -> Result<CurrentConditions, GatewayError> {
        self.record(format!("current:{city}"))?;
        self.current.clone().ok_or(GatewayError::UpstreamNotFound)
    }

    async fn forecast(&self, city: &CityQuery) -> Result<DetailedForecast, GatewayError> {
        self.record(format!("forecast:{city}"))?;
        self.forecast.clone().ok_or(GatewayError::UpstreamNotFound)
    }

    async fn geocode(&self, city: &CityQuery) -> Result<Option<Coordinates>, GatewayError> {
        self.record(format!("geocode:{city}"))?;
        Ok(self.coordinates)
    }

    async fn air_pollution(&self, at: Coordinates) -> Result<AirQualitySample, GatewayError> {
        self.record(format!("air_pollution:{},{}", at.lat, at.lon))?;
        self.air.clone().ok_or(GatewayError::UpstreamNotFound)
    }
}

/// Canned OpenWeather replies, one per upstream endpoint.
#[derive(Clone)]
pub struct UpstreamFixture {
    pub current: (StatusCode, String),
    pub forecast: (StatusCode, String),
    pub geocode: (StatusCode, String),
    pub pollution: (StatusCode, String),
}

impl Default for UpstreamFixture {
    fn default() -> Self {
        Self {
            current: (StatusCode::OK, CURRENT_LONDON.to_string()),
            forecast: (StatusCode::OK, forecast_json(40)),
            geocode: (StatusCode::OK, GEOCODE_LONDON.to_string()),
            pollution: (StatusCode::OK, POLLUTION_LONDON.to_string()),
        }
    }
}

impl UpstreamFixture {
    /// Every endpoint answers with the same status and body.
    pub fn all(status: StatusCode, body: &str) -> Self {
        let reply = (status, body.to_string());
        Self {
            current: reply.clone(),
            forecast: reply.clone(),
            geocode: reply.clone(),
            pollution: reply,
        }
    }
}

struct UpstreamState {
    fixture: UpstreamFixture,
    calls: Arc<Mutex<Vec<String>>>,
}

/// Stand-in for the OpenWeather API on an ephemeral local port.
pub struct MockUpstream {
    pub base_url: String,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockUpstream {
    /// Request targets (path and query) in arrival order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

async fn serve_fixture(State(upstream): State<Arc<UpstreamState>>, uri: Uri) -> impl IntoResponse {
    upstream.calls.lock().unwrap().push(uri.to_string());

    let fixture = &upstream.fixture;
    let (status, body) = match uri.path() {
        "/data/2.5/weather" => fixture.current.clone(),
        "/data/2.5/forecast" => fixture.forecast.clone(),
        "/geo/1.0/direct" => fixture.geocode.clone(),
        "/data/2.5/air_pollution" => fixture.pollution.clone(),
        _ => (StatusCode::NOT_FOUND, r#"{"cod":"404"}"#.to_string()),
    };

    (status, [(header::CONTENT_TYPE, "application/json")], body)
}

async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

pub async fn spawn_upstream(fixture: UpstreamFixture) -> MockUpstream {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let state = Arc::new(UpstreamState {
        fixture,
        calls: calls.clone(),
    });

    let router = Router::new().fallback(serve_fixture).with_state(state);
    let base_url = serve(router).await;

    MockUpstream { base_url, calls }
}

/// Real OpenWeather client pointed at `base_url`, bypassing any proxy.
pub fn test_client(base_url: &str) -> OpenWeatherClient {
    let settings = OpenWeatherSettings {
        base_url: base_url.to_string(),
        units: "metric".to_string(),
        timeout_secs: 5,
    };
    let http = reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(settings.timeout_secs))
        .build()
        .unwrap();

    OpenWeatherClient::with_http(&settings, ApiKey::new("test-key").unwrap(), http)
}

pub struct TestGateway {
    pub base_url: String,
    pub upstream: MockUpstream,
}

impl TestGateway {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Full gateway router backed by a mock upstream, both on local ports.
pub async fn spawn_gateway(fixture: UpstreamFixture) -> TestGateway {
    let upstream = spawn_upstream(fixture).await;
    let provider = Arc::new(test_client(&upstream.base_url));
    let state = Arc::new(AppState {
        weather_service: WeatherService::new(provider),
    });

    let base_url = serve(build_router(state)).await;
    TestGateway { base_url, upstream }
}
