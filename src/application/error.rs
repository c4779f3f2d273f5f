// Gateway error taxonomy shared by the service and the provider adapter
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// Rejected before any upstream call, e.g. `InvalidInput("city name")`.
    #[error("invalid {0}")]
    InvalidInput(&'static str),

    /// The provider reported the city does not exist.
    #[error("city not found")]
    UpstreamNotFound,

    /// Geocoding returned no coordinates for the city.
    #[error("no coordinates found for city")]
    GeocodeNotFound,

    #[error("provider returned no forecast entries")]
    AggregationEmpty,

    /// Transport failure, timeout, non-2xx status or malformed body.
    /// The detail is for logs only.
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),
}
