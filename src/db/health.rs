//! Health report built from a single database probe.

use axum::http::StatusCode;
use serde::Serialize;
use strum::Display;
use tracing::{error, info, warn};

use crate::metrics;

use super::probe::DatabaseProbe;

/// Overall service health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum HealthStatus {
    /// Database answered the probe.
    Healthy,
    /// Database did not answer the probe.
    Unhealthy,
}

/// Database connectivity as seen by the last probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DatabaseStatus {
    /// Probe succeeded.
    Connected,
    /// Probe failed.
    Disconnected,
}

/// Body of the `/health` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    /// Overall status.
    pub status: HealthStatus,
    /// Database status.
    pub database: DatabaseStatus,
    /// Probe failure message, present only when unhealthy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthReport {
    /// Report for a successful probe.
    pub fn healthy() -> Self {
        Self {
            status: HealthStatus::Healthy,
            database: DatabaseStatus::Connected,
            error: None,
        }
    }

    /// Report for a failed probe, carrying the failure message as-is.
    pub fn unhealthy(error: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            database: DatabaseStatus::Disconnected,
            error: Some(error.into()),
        }
    }

    /// Check if healthy.
    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }

    /// HTTP status for this report: 200 or 503.
    pub fn http_status(&self) -> StatusCode {
        if self.is_healthy() {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// Probe the database once and turn the outcome into a report.
///
/// Recomputed on every call. Nothing is cached.
pub async fn check_health(probe: &dyn DatabaseProbe) -> HealthReport {
    let _timer = metrics::timer_db_probe();

    let report = match probe.ping().await {
        Ok(()) => HealthReport::healthy(),
        Err(e) => {
            warn!(error = %e, "Database probe failed");
            HealthReport::unhealthy(e.to_string())
        }
    };

    metrics::inc_db_probes(report.is_healthy());
    report
}

/// Startup connectivity check. Failure is logged, never fatal.
pub async fn verify_connection(probe: &dyn DatabaseProbe) -> bool {
    match probe.ping().await {
        Ok(()) => {
            info!("Database connection pool created successfully");
            true
        }
        Err(e) => {
            error!("Error creating connection pool: {}", e);
            false
        }
    }
}
