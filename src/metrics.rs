//! Prometheus metrics for request and database probe monitoring.
//!
//! This module provides metrics for:
//! - HTTP request counts and latency per route
//! - Database probe outcomes and latency

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use tracing::debug;

// === Metric Name Constants ===

/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";
/// HTTP requests counter metric name.
pub const METRIC_HTTP_REQUESTS: &str = "http_requests_total";
/// Database probe latency metric name.
pub const METRIC_DB_PROBE_LATENCY: &str = "db_probe_latency_ms";
/// Database probes counter metric name.
pub const METRIC_DB_PROBES: &str = "db_probe_total";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );
    describe_histogram!(
        METRIC_DB_PROBE_LATENCY,
        "Database liveness probe latency in milliseconds"
    );

    describe_counter!(METRIC_HTTP_REQUESTS, "Total number of HTTP requests served");
    describe_counter!(
        METRIC_DB_PROBES,
        "Total number of database probes by outcome"
    );

    debug!("Metrics initialized");
}

/// Install the Prometheus exporter listening on `0.0.0.0:port`.
///
/// Must be called inside a Tokio runtime.
pub fn install_exporter(port: u16) -> Result<(), BuildError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    PrometheusBuilder::new().with_http_listener(addr).install()
}

/// Record a served HTTP request.
pub fn record_http_request(start: Instant, route: &str, status: u16) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_HTTP_REQUEST_LATENCY, "route" => route.to_string()).record(latency_ms);
    counter!(
        METRIC_HTTP_REQUESTS,
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Increment the probe counter for the given outcome.
pub fn inc_db_probes(healthy: bool) {
    let outcome = if healthy { "success" } else { "failure" };
    counter!(METRIC_DB_PROBES, "outcome" => outcome).increment(1);
}

/// RAII guard for timing operations.
/// Automatically records latency when dropped.
pub struct LatencyTimer {
    start: Instant,
    metric_name: &'static str,
}

impl LatencyTimer {
    /// Create a new latency timer for the given metric.
    pub fn new(metric_name: &'static str) -> Self {
        Self {
            start: Instant::now(),
            metric_name,
        }
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        let latency_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        histogram!(self.metric_name).record(latency_ms);
    }
}

/// Create a latency timer for a database probe.
pub fn timer_db_probe() -> LatencyTimer {
    LatencyTimer::new(METRIC_DB_PROBE_LATENCY)
}
