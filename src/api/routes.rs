//! HTTP API route definitions.

use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use super::handlers::{create_loan, get_loan, health, list_loans, not_found, stats, AppState};
use super::middleware::track_requests;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoint
        .route("/health", get(health))
        // Loan endpoints
        .route("/api/loans", get(list_loans).post(create_loan))
        .route("/api/loans/", get(list_loans))
        .route("/api/loans/:id", get(get_loan))
        .route("/api/stats", get(stats))
        .fallback(not_found)
        .layer(middleware::from_fn(track_requests))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
