//! The assessment service: persistence sequencing for every mutation
//! path of the approval workflow.

use crate::{RiskScorer, ServiceError, ServiceResult};
use assessment_engine::{apply_edit, decide, submit_draft, EditOutcome};
use assessment_store::{AssessmentPatch, AssessmentStore};
use assessment_types::{
    Actor, ApprovalLevel, AssessmentContent, AssessmentId, ComplianceFlags, Decision,
    RiskAssessment, WorkflowError,
};

/// Orchestrates the approval workflow over a persistence backend.
pub struct AssessmentService<S: AssessmentStore> {
    store: S,
}

impl<S: AssessmentStore> AssessmentService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Access to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    // ── Creation & drafts ────────────────────────────────────────────

    /// Create a new assessment.
    ///
    /// Assigns the immutable reference number and persists the record
    /// with an all-pending ledger, in `Draft` or directly at the first
    /// pending level.
    pub async fn create(
        &self,
        content: AssessmentContent,
        submitter: &Actor,
        as_draft: bool,
    ) -> ServiceResult<RiskAssessment> {
        let assessment = RiskAssessment::new(content, submitter.clone(), as_draft);
        self.store.create(assessment.clone()).await?;
        tracing::info!(
            id = %assessment.id,
            reference = %assessment.reference_number,
            status = %assessment.status,
            "assessment created"
        );
        Ok(assessment)
    }

    /// Submit a draft into the workflow. Only the original submitter or
    /// an admin may submit.
    pub async fn submit_draft(&self, id: &AssessmentId, actor: &Actor) -> ServiceResult<RiskAssessment> {
        let current = self.load(id).await?;
        if actor.id != current.submitted_by.id && !actor.is_admin() {
            return Err(WorkflowError::Validation(format!(
                "only the submitter or an admin may submit assessment {id}"
            ))
            .into());
        }

        let next = submit_draft(&current)?;
        let saved = self
            .save_workflow(&current, next)
            .await?;
        tracing::info!(id = %id, status = %saved.status, "draft submitted into workflow");
        Ok(saved)
    }

    // ── Decisions ────────────────────────────────────────────────────

    /// Record an approval decision for a level.
    ///
    /// Loads the current record, lets the engine validate against the
    /// freshly read ledger, and writes status plus ledger back under
    /// compare-and-swap. A conflict means another writer got there
    /// first; the caller should reload and re-derive before retrying.
    pub async fn submit_decision(
        &self,
        id: &AssessmentId,
        level: ApprovalLevel,
        decision: Decision,
        notes: impl Into<String>,
        flags: Option<ComplianceFlags>,
        actor: &Actor,
    ) -> ServiceResult<RiskAssessment> {
        let current = self.load(id).await?;
        let next = decide(&current, level, decision, actor, notes, flags)?;
        let saved = self.save_workflow(&current, next).await?;
        tracing::info!(
            id = %id,
            level = %level,
            decision = ?decision,
            status = %saved.status,
            "decision recorded"
        );
        Ok(saved)
    }

    // ── Edits ────────────────────────────────────────────────────────

    /// Apply a content edit, restarting the workflow when the reset
    /// policy requires it. The outcome reports whether the workflow was
    /// restarted so the caller can notify the editor.
    pub async fn edit(
        &self,
        id: &AssessmentId,
        revised: AssessmentContent,
        editor: &Actor,
    ) -> ServiceResult<EditOutcome> {
        let current = self.load(id).await?;
        let outcome = apply_edit(&current, revised, editor);

        let patch = if outcome.workflow_reset {
            AssessmentPatch {
                content: Some(outcome.assessment.content.clone()),
                status: Some(outcome.assessment.status),
                ledger: Some(outcome.assessment.ledger.clone()),
                ..Default::default()
            }
        } else {
            AssessmentPatch {
                content: Some(outcome.assessment.content.clone()),
                ..Default::default()
            }
        };

        let saved = self
            .store
            .update(id, current.last_modified, patch)
            .await
            .inspect_err(|err| tracing::warn!(id = %id, %err, "edit write failed"))?;

        if outcome.workflow_reset {
            tracing::info!(
                id = %id,
                changed = ?outcome.changed_fields,
                "substantive edit in flight: workflow restarted at level one"
            );
        }

        Ok(EditOutcome {
            assessment: saved,
            workflow_reset: outcome.workflow_reset,
            changed_fields: outcome.changed_fields,
        })
    }

    // ── Advisory scoring ─────────────────────────────────────────────

    /// Run the advisory scorer and store its annotations. Advisory
    /// only: the workflow state machine never reads these fields.
    pub async fn annotate_with_score(
        &self,
        id: &AssessmentId,
        scorer: &dyn RiskScorer,
    ) -> ServiceResult<RiskAssessment> {
        let current = self.load(id).await?;
        let advisory = scorer.score(&current.content).await?;
        let saved = self
            .store
            .update(
                id,
                current.last_modified,
                AssessmentPatch {
                    advisory: Some(advisory),
                    ..Default::default()
                },
            )
            .await?;
        tracing::info!(id = %id, "advisory score recorded");
        Ok(saved)
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Get one assessment.
    pub async fn get(&self, id: &AssessmentId) -> ServiceResult<RiskAssessment> {
        self.load(id).await
    }

    /// List all assessments, newest-first.
    pub async fn list(&self) -> ServiceResult<Vec<RiskAssessment>> {
        Ok(self.store.list().await?)
    }

    // ── Internal ─────────────────────────────────────────────────────

    async fn load(&self, id: &AssessmentId) -> ServiceResult<RiskAssessment> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(id.clone()))
    }

    /// Persist a workflow transition (status + ledger) computed from
    /// `current`, compare-and-swap on `current`'s stamp.
    async fn save_workflow(
        &self,
        current: &RiskAssessment,
        next: RiskAssessment,
    ) -> ServiceResult<RiskAssessment> {
        self.store
            .update(
                &current.id,
                current.last_modified,
                AssessmentPatch::workflow(next.status, next.ledger),
            )
            .await
            .inspect_err(|err| tracing::warn!(id = %current.id, %err, "workflow write failed"))
            .map_err(ServiceError::from)
    }
}
