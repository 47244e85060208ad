//! Mock loan-management HTTP API.
//!
//! Five fixed routes: four serve hardcoded loan data and one checks that
//! Postgres answers a `SELECT 1`. Nothing is persisted.
//!
//! ```text
//! GET  /health          200 {status, database} | 503 {status, database, error}
//! GET  /api/loans       200 [{id, amount}, {id, amount}]
//! GET  /api/loans/:id   200 {id, amount, applicant}
//! POST /api/loans       201 {...body, id: 3}
//! GET  /api/stats       200 {total_loans, total_value}
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`loans`]: Mock loan catalog
//! - [`db`]: Postgres pool and liveness probe
//! - [`api`]: HTTP router and handlers
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod loans;
pub mod metrics;
pub mod utils;

pub use config::Config;
pub use error::{AppError, Result};
