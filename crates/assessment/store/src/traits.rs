use crate::StoreResult;
use assessment_types::{
    ApprovalLedger, AssessmentContent, AssessmentId, AssessmentStatus, RiskAdvisory,
    RiskAssessment,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Partial update to a persisted assessment.
///
/// Absent fields are left untouched. The store stamps `last_modified`
/// when the patch is applied; callers never set it directly.
#[derive(Debug, Clone, Default)]
pub struct AssessmentPatch {
    pub status: Option<AssessmentStatus>,
    pub ledger: Option<ApprovalLedger>,
    pub content: Option<AssessmentContent>,
    pub advisory: Option<RiskAdvisory>,
}

impl AssessmentPatch {
    /// Patch carrying a workflow transition: new status and ledger.
    pub fn workflow(status: AssessmentStatus, ledger: ApprovalLedger) -> Self {
        Self {
            status: Some(status),
            ledger: Some(ledger),
            ..Default::default()
        }
    }
}

/// Storage interface for assessment records.
#[async_trait]
pub trait AssessmentStore: Send + Sync {
    /// Insert a new assessment. Fails with `Conflict` if the id already
    /// exists.
    async fn create(&self, assessment: RiskAssessment) -> StoreResult<()>;

    /// Get one assessment by id.
    async fn get(&self, id: &AssessmentId) -> StoreResult<Option<RiskAssessment>>;

    /// List all assessments, newest-first by submission time.
    async fn list(&self) -> StoreResult<Vec<RiskAssessment>>;

    /// Apply a partial update, compare-and-swap keyed on the record's
    /// `last_modified` stamp.
    ///
    /// Fails with `Conflict` when `expected_last_modified` does not
    /// match the persisted stamp (a concurrent writer won the race) and
    /// `NotFound` when the id does not resolve. On success the record
    /// carries a fresh `last_modified` and the updated copy is
    /// returned.
    async fn update(
        &self,
        id: &AssessmentId,
        expected_last_modified: DateTime<Utc>,
        patch: AssessmentPatch,
    ) -> StoreResult<RiskAssessment>;
}
