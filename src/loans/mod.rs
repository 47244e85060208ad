//! Loan module.
//!
//! This module handles:
//! - Loan payload types
//! - The fixed mock catalog served by the API

pub mod catalog;
pub mod types;

pub use catalog::{create_loan, mock_loan, mock_loans, mock_stats};
pub use types::{LoanDetail, LoanStats, LoanSummary};
