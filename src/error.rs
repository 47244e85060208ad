//! Unified error types for the loan API.

use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Unified error type for the loan API.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Failure of a single database liveness probe.
///
/// The `Display` output is reported to HTTP callers unchanged.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// The probe query failed.
    #[error("{0}")]
    Query(#[from] sqlx::Error),

    /// The probe did not finish in time.
    #[error("database probe timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// A probe failure with a plain message, used by test doubles.
    #[error("{0}")]
    Other(String),
}

/// Errors that end a request before or instead of a handler.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request body could not be read as a JSON object.
    #[error("{0}")]
    MalformedBody(String),

    /// No route matches the request path.
    #[error("Cannot {method} {path}")]
    NotFound {
        /// Request method.
        method: String,
        /// Request path.
        path: String,
    },
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, AppError>;
