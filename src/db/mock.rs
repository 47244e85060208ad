//! Mock database probe for unit testing.
//!
//! This module provides a probe that can be used in tests without a running
//! Postgres server.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::ProbeError;

use super::probe::DatabaseProbe;

/// Mock probe with a switchable outcome.
///
/// Clones share state, so a test can keep one handle and flip the outcome
/// after handing the other to the router.
#[derive(Debug, Clone)]
pub struct MockProbe {
    /// Whether pings succeed.
    healthy: Arc<AtomicBool>,
    /// Message carried by a failed ping.
    error_message: String,
    /// Simulated round-trip latency.
    latency: Duration,
    /// Number of pings so far.
    calls: Arc<AtomicUsize>,
}

impl MockProbe {
    /// Create a probe whose pings succeed.
    pub fn healthy() -> Self {
        Self {
            healthy: Arc::new(AtomicBool::new(true)),
            error_message: "mock probe failure".to_string(),
            latency: Duration::ZERO,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a probe whose pings fail with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        let probe = Self {
            error_message: message.into(),
            ..Self::healthy()
        };
        probe.set_healthy(false);
        probe
    }

    /// Add simulated latency to every ping.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Switch the outcome of future pings.
    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::SeqCst);
    }

    /// Number of pings so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockProbe {
    fn default() -> Self {
        Self::healthy()
    }
}

#[async_trait]
impl DatabaseProbe for MockProbe {
    async fn ping(&self) -> Result<(), ProbeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        if self.healthy.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(ProbeError::Other(self.error_message.clone()))
        }
    }
}
