//! Database liveness probe.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::PgPool;
use tracing::{debug, instrument};

use crate::config::Config;
use crate::error::ProbeError;

use super::pool::build_pool;

/// Query used as the liveness round trip.
pub const PROBE_QUERY: &str = "SELECT 1";

/// Anything that can answer "is the database reachable right now".
#[async_trait]
pub trait DatabaseProbe: Send + Sync {
    /// Run one round trip. No retries, no caching.
    async fn ping(&self) -> Result<(), ProbeError>;
}

/// Probe backed by a Postgres pool.
#[derive(Debug, Clone)]
pub struct PgProbe {
    /// Shared pool handle.
    pool: PgPool,
    /// Upper bound on one probe.
    timeout: Duration,
}

impl PgProbe {
    /// Wrap an existing pool.
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    /// Build the pool and probe from config.
    pub fn from_config(config: &Config) -> Self {
        Self::new(build_pool(config), config.probe_timeout())
    }

    /// Underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Probe timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl DatabaseProbe for PgProbe {
    #[instrument(skip(self), fields(timeout = ?self.timeout))]
    async fn ping(&self) -> Result<(), ProbeError> {
        let query = sqlx::query(PROBE_QUERY).execute(&self.pool);

        match tokio::time::timeout(self.timeout, query).await {
            Ok(Ok(_)) => {
                debug!("Database probe succeeded");
                Ok(())
            }
            // The pool's acquire deadline equals the probe bound, so either
            // may expire first on a hung server.
            Ok(Err(sqlx::Error::PoolTimedOut)) | Err(_) => Err(ProbeError::Timeout(self.timeout)),
            Ok(Err(e)) => Err(ProbeError::Query(e)),
        }
    }
}
