//! Fixed mock catalog.
//!
//! Every function builds a fresh value. Nothing is stored, so a created loan
//! never shows up in the list or the stats.

use serde_json::{Map, Value};

use super::types::{LoanDetail, LoanStats, LoanSummary};

/// ID assigned to every created loan.
pub const CREATED_LOAN_ID: u64 = 3;

/// Amount reported for any single loan lookup.
pub const DETAIL_AMOUNT: u64 = 1000;

/// Applicant reported for any single loan lookup.
pub const MOCK_APPLICANT: &str = "Mock User";

/// The two loans served by the list endpoint.
pub fn mock_loans() -> Vec<LoanSummary> {
    vec![
        LoanSummary { id: 1, amount: 1000 },
        LoanSummary { id: 2, amount: 2000 },
    ]
}

/// A loan for any requested ID. No existence check is made.
pub fn mock_loan(id: &str) -> LoanDetail {
    LoanDetail {
        id: id.to_string(),
        amount: DETAIL_AMOUNT,
        applicant: MOCK_APPLICANT.to_string(),
    }
}

/// Fixed portfolio totals, not derived from [`mock_loans`].
pub fn mock_stats() -> LoanStats {
    LoanStats {
        total_loans: 2,
        total_value: 3000,
    }
}

/// Echo a loan request back with its `id` set to [`CREATED_LOAN_ID`].
///
/// All other fields pass through untouched, including ones we know nothing
/// about. A caller-supplied `id` is replaced.
pub fn create_loan(mut body: Map<String, Value>) -> Map<String, Value> {
    body.insert("id".to_string(), Value::from(CREATED_LOAN_ID));
    body
}
