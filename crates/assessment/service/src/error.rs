use assessment_store::StoreError;
use assessment_types::{AssessmentId, WorkflowError};
use thiserror::Error;

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced by the assessment service.
///
/// Workflow and validation failures happen before any write; store
/// conflicts mean a concurrent writer won and the caller should reload
/// and re-derive before retrying — the service never auto-retries.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("assessment not found: {0}")]
    NotFound(AssessmentId),

    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Scorer(#[from] ScorerError),
}

/// Failure reported by the advisory scoring collaborator.
#[derive(Debug, Error)]
#[error("scoring failed: {0}")]
pub struct ScorerError(pub String);
