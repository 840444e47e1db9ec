//! # Server Error Types
//!
//! HTTP mapping for failures crossing the feed and viewer boundaries.

use airwatch_engine::EngineError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors surfaced by HTTP handlers.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl ServerError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Engine(EngineError::Rejected(_)) => StatusCode::BAD_REQUEST,
            Self::Engine(EngineError::Stopped) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Get a stable machine-readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Engine(EngineError::Rejected(_)) => "REJECTED_REPORT",
            Self::Engine(EngineError::Stopped) => "ENGINE_STOPPED",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = serde_json::json!({
            "error": {
                "message": self.to_string(),
                "code": self.error_code(),
            }
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Result type alias for handler operations
pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use airwatch_domain::DomainError;

    #[test]
    fn rejected_report_maps_to_bad_request() {
        let err = ServerError::Engine(EngineError::Rejected(DomainError::EmptyCallsign));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "REJECTED_REPORT");
    }

    #[test]
    fn stopped_engine_maps_to_service_unavailable() {
        let err = ServerError::Engine(EngineError::Stopped);
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
