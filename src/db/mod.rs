//! Database module.
//!
//! The service talks to Postgres for exactly one reason: answering the health
//! check. This module handles:
//! - Pool construction from [`Config`](crate::Config)
//! - The [`DatabaseProbe`] seam and its Postgres implementation
//! - Mapping a probe outcome to a [`HealthReport`]
//! - Mock probe for testing

pub mod health;
pub mod mock;
pub mod pool;
pub mod probe;

pub use health::{check_health, verify_connection, DatabaseStatus, HealthReport, HealthStatus};
pub use mock::MockProbe;
pub use pool::{build_pool, connect_options};
pub use probe::{DatabaseProbe, PgProbe};
