//! HTTP API handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{Map, Value};
use tracing::debug;

use crate::db::{check_health, DatabaseProbe};
use crate::error::ApiError;
use crate::loans::{self, LoanDetail, LoanStats, LoanSummary};

use super::extract::JsonObject;

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database liveness probe.
    pub probe: Arc<dyn DatabaseProbe>,
}

impl AppState {
    /// Create new app state.
    pub fn new(probe: Arc<dyn DatabaseProbe>) -> Self {
        Self { probe }
    }

    /// Create app state from a concrete probe.
    pub fn with_probe<P>(probe: P) -> Self
    where
        P: DatabaseProbe + 'static,
    {
        Self::new(Arc::new(probe))
    }
}

/// Health check handler - returns 200 if the database answers, 503 otherwise.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let report = check_health(state.probe.as_ref()).await;
    debug!(status = %report.status, database = %report.database, "Health checked");
    (report.http_status(), Json(report))
}

/// List handler - always the same two loans.
pub async fn list_loans() -> Json<Vec<LoanSummary>> {
    Json(loans::mock_loans())
}

/// Single loan handler - echoes the path ID, never 404s.
pub async fn get_loan(Path(id): Path<String>) -> Json<LoanDetail> {
    debug!(id = %id, "Loan lookup");
    Json(loans::mock_loan(&id))
}

/// Create handler - echoes the body with the assigned ID. Nothing is stored.
pub async fn create_loan(JsonObject(body): JsonObject) -> (StatusCode, Json<Map<String, Value>>) {
    debug!(fields = body.len(), "Loan create");
    (StatusCode::CREATED, Json(loans::create_loan(body)))
}

/// Stats handler - fixed totals.
pub async fn stats() -> Json<LoanStats> {
    Json(loans::mock_stats())
}

/// Fallback for unmatched paths.
pub async fn not_found(method: Method, uri: Uri) -> ApiError {
    ApiError::NotFound {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
}
