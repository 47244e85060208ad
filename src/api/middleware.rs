//! Request accounting middleware.

use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;

use crate::metrics;

/// Route label used when no route matched.
pub const UNMATCHED_ROUTE: &str = "unmatched";

/// Record latency and status for every request, labelled by route template.
pub async fn track_requests(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string());

    let response = next.run(request).await;
    let status = response.status().as_u16();

    metrics::record_http_request(start, &route, status);
    debug!(
        method = %method,
        route = %route,
        status,
        duration_ms = start.elapsed().as_millis() as u64,
        "Request served"
    );

    response
}
