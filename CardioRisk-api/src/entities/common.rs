use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error response format for API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error type/code - machine-readable identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Optional additional details about the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// Create a validation error response
    pub fn validation_error(message: &str, details: Option<serde_json::Value>) -> Self {
        Self {
            error: "validation_error".to_string(),
            message: message.to_string(),
            details,
        }
    }

    /// Create a bad request error response
    pub fn bad_request(message: &str) -> Self {
        Self {
            error: "bad_request".to_string(),
            message: message.to_string(),
            details: None,
        }
    }

    /// Create a retry-later response for prediction service failures
    ///
    /// Never pass upstream detail here; it belongs in the logs.
    pub fn upstream_unavailable(message: &str) -> Self {
        Self {
            error: "upstream_unavailable".to_string(),
            message: message.to_string(),
            details: None,
        }
    }

    /// Create an internal error response
    pub fn internal_error() -> Self {
        Self {
            error: "internal_error".to_string(),
            message: "An unexpected error occurred".to_string(),
            details: None,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.error.as_str() {
            "validation_error" => StatusCode::BAD_REQUEST,
            "bad_request" => StatusCode::BAD_REQUEST,
            "upstream_unavailable" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ErrorResponse::validation_error("x", None).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorResponse::bad_request("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorResponse::upstream_unavailable("x").status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(ErrorResponse::internal_error().status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_details_omitted_when_absent() {
        let value = serde_json::to_value(ErrorResponse::bad_request("Body must be a JSON object")).unwrap();
        assert_eq!(value["error"], "bad_request");
        assert!(value.get("details").is_none());
    }
}
