//! Error types for workflow operations.

use crate::ApprovalLevel;

/// Errors raised by ledger and state-machine operations.
///
/// Every variant is a pure validation failure detected before any
/// mutation; a failed operation leaves the assessment untouched.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("decision submitted for {submitted}, but the workflow is awaiting {expected_name}",
        expected_name = .expected.map(|l| l.name()).unwrap_or("no further decisions"))]
    InvalidLevel {
        submitted: ApprovalLevel,
        /// The level currently awaiting decision; `None` when the
        /// workflow is terminal or suspended.
        expected: Option<ApprovalLevel>,
    },

    #[error("malformed approval ledger: {0}")]
    MalformedLedger(String),

    #[error("validation failed: {0}")]
    Validation(String),
}

/// Result type alias for workflow operations.
pub type WorkflowResult<T> = Result<T, WorkflowError>;
