//! Loan payload types.

use serde::{Deserialize, Serialize};

/// Loan as listed by `GET /api/loans`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanSummary {
    /// Loan ID.
    pub id: u64,
    /// Principal amount.
    pub amount: u64,
}

/// Loan as returned by `GET /api/loans/:id`.
///
/// The ID is whatever the caller put in the path. It is never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanDetail {
    /// Loan ID, echoed from the request path.
    pub id: String,
    /// Principal amount.
    pub amount: u64,
    /// Applicant name.
    pub applicant: String,
}

/// Portfolio totals returned by `GET /api/stats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanStats {
    /// Number of loans.
    pub total_loans: u64,
    /// Sum of loan amounts.
    pub total_value: u64,
}
