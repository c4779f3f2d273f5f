// HTTP response utilities for JSON error bodies
use crate::application::error::GatewayError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Build a `{"error": message}` response with the given status
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorBody { error: message.into() })).into_response()
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            GatewayError::UpstreamNotFound | GatewayError::GeocodeNotFound => StatusCode::NOT_FOUND,
            GatewayError::AggregationEmpty | GatewayError::UpstreamUnavailable(_) => {
                StatusCode::BAD_GATEWAY
            }
        }
    }

    /// Message shown to clients. Upstream details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            GatewayError::InvalidInput(_) => self.to_string(),
            GatewayError::UpstreamNotFound | GatewayError::GeocodeNotFound => {
                "city not found".to_string()
            }
            GatewayError::AggregationEmpty => "no forecast data available".to_string(),
            GatewayError::UpstreamUnavailable(_) => "upstream unavailable".to_string(),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        match &self {
            GatewayError::UpstreamUnavailable(detail) => tracing::warn!("{}", detail),
            GatewayError::AggregationEmpty => tracing::warn!("{}", self),
            _ => tracing::debug!("Request rejected: {}", self),
        }

        error_response(self.status_code(), self.public_message())
    }
}
