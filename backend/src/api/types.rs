//! Response types shared by the HTTP handlers.
//!
//! View payloads are the [`ViewOutput`](crate::views::ViewOutput) shapes
//! serialized as-is; only errors and the health check are defined here.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::ServerError;

/// Health check payload.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub views: usize,
}

/// Create an error response body
pub fn error_response(error: &str) -> Value {
    json!({ "error": error })
}

impl ServerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Dataset(_) | ServerError::Engine(_) | ServerError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(error_response(&self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    #[test]
    fn test_error_body_shape() {
        assert_eq!(error_response("boom"), json!({"error": "boom"}));
    }

    #[test]
    fn test_engine_failure_is_500() {
        let err: ServerError = EngineError::missing_column("games", "Platform").into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_bad_request_is_400() {
        let err = ServerError::BadRequest("unknown view".into());
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
