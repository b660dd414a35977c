//! HTTP error types for the `cmsite` server.
//!
//! JSON endpoints return these. Every variant produces a body with a
//! machine-readable `error` field and a human-readable `message`. HTML
//! pages render their own failure view instead.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use cmsite_core::ContentError;

/// Application-level error returned from JSON handlers.
#[derive(Debug)]
pub enum AppError {
    /// Requested resource not found.
    NotFound(String),
    /// Client sent invalid input.
    BadRequest(String),
    /// Internal server error.
    Internal(String),
    /// The content API failed or returned unusable content.
    Upstream {
        kind: &'static str,
        message: String,
    },
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg),
            Self::Upstream { kind, message } => (StatusCode::BAD_GATEWAY, kind, message),
        };

        let body = ErrorBody {
            error: error_type,
            message,
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<ContentError> for AppError {
    fn from(err: ContentError) -> Self {
        Self::Upstream {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}
