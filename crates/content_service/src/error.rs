//! Service error types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::github::HostingError;

/// Error type for API operations.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The hosting API failed or answered with something unusable.
    #[error("Bad gateway: {message}")]
    BadGateway { message: String, details: String },
}

impl ServiceError {
    /// Map a hosting failure. Upstream text is only exposed in debug mode.
    pub fn upstream(err: &HostingError, debug: bool) -> Self {
        ServiceError::BadGateway {
            message: "Failed to fetch repository contents".to_string(),
            details: if debug { err.to_string() } else { err.summary() },
        }
    }
}

/// Error response body.
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    details: String,
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, error_message, details) = match self {
            ServiceError::BadGateway { message, details } => (StatusCode::BAD_GATEWAY, message, details),
        };

        let body = Json(ErrorResponse {
            error: error_message,
            details,
        });

        (status, body).into_response()
    }
}
