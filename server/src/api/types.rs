//! Shared API types
//!
//! Error responses share one JSON shape across endpoints:
//! `{"error": "<kind>", "code": "<CODE>", "message": "<text>"}`.

use axum::Json;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::data::filters::{FilterDecodeError, FilterError, MAX_FILTER_JSON_SIZE};

/// Standard API error response
#[derive(Debug)]
pub enum ApiError {
    BadRequest { code: String, message: String },
    NotFound { code: String, message: String },
    PayloadTooLarge { code: String, message: String },
}

impl ApiError {
    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_found(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NotFound {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn payload_too_large(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PayloadTooLarge {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<FilterError> for ApiError {
    fn from(e: FilterError) -> Self {
        tracing::debug!(error = %e, "Filter rejected");
        Self::bad_request(e.code(), e.to_string())
    }
}

impl From<FilterDecodeError> for ApiError {
    fn from(e: FilterDecodeError) -> Self {
        tracing::debug!(error = %e, "Filter request rejected");
        match e {
            FilterDecodeError::TooLarge { .. } => Self::payload_too_large(e.code(), e.to_string()),
            _ => Self::bad_request(e.code(), e.to_string()),
        }
    }
}

/// Body buffering failures, e.g. the router-wide body limit being exceeded
impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return FilterDecodeError::TooLarge {
                limit: MAX_FILTER_JSON_SIZE,
            }
            .into();
        }
        tracing::debug!(error = %rejection.body_text(), "Request body rejected");
        Self::bad_request("INVALID_REQUEST_BODY", rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, code, message) = match self {
            Self::BadRequest { code, message } => {
                (StatusCode::BAD_REQUEST, "bad_request", code, message)
            }
            Self::NotFound { code, message } => (StatusCode::NOT_FOUND, "not_found", code, message),
            Self::PayloadTooLarge { code, message } => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "payload_too_large",
                code,
                message,
            ),
        };
        (
            status,
            Json(serde_json::json!({
                "error": error_type,
                "code": code,
                "message": message
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filters::{Arity, FilterOp, ValueShape};

    #[test]
    fn test_filter_error_maps_to_bad_request() {
        let err: ApiError = FilterError::unsupported("PO").into();
        match err {
            ApiError::BadRequest { code, message } => {
                assert_eq!(code, "UNSUPPORTED_OPERATION");
                assert_eq!(message, "unsupported operation: PO");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_arity_error_code() {
        let err: ApiError = FilterError::ArityMismatch {
            key: "host".to_string(),
            op: FilterOp::In,
            expected: Arity::List,
            found: ValueShape::Single,
        }
        .into();
        assert!(matches!(err, ApiError::BadRequest { ref code, .. } if code == "ARITY_MISMATCH"));
    }

    #[test]
    fn test_too_large_maps_to_413() {
        let err: ApiError = FilterDecodeError::TooLarge { limit: 10 }.into();
        assert_eq!(err.into_response().status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::bad_request("X", "x").into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::not_found("X", "x").into_response().status(),
            StatusCode::NOT_FOUND
        );
    }
}
