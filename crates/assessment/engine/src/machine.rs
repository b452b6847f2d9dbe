//! Status derivation and the decision submission protocol.

use assessment_types::{
    Actor, ApprovalLedger, ApprovalLevel, AssessmentStatus, ComplianceFlags, Decision,
    RiskAssessment, WorkflowError, WorkflowResult,
};

/// Compute the overall status implied by a ledger.
///
/// Pure and deterministic: the same ledger always yields the same
/// status. Scans levels in canonical order — a rejection or an
/// information request short-circuits; otherwise the first undecided
/// level is the pending one; a fully approved ledger is `Approved`.
///
/// `Draft` is never derived. It is set explicitly at creation and
/// cleared explicitly on first submission.
pub fn derive_status(ledger: &ApprovalLedger) -> AssessmentStatus {
    for step in ledger.steps() {
        match step.decision() {
            Some(Decision::Rejected) => return AssessmentStatus::Rejected,
            Some(Decision::NeedsInformation) => return AssessmentStatus::NeedsInformation,
            None => return AssessmentStatus::pending(step.level),
            Some(Decision::Approved) => continue,
        }
    }
    AssessmentStatus::Approved
}

/// Submit a draft into the workflow.
///
/// The only legal transition out of `Draft`: status becomes the first
/// pending level. Fails when the assessment is not a draft.
pub fn submit_draft(assessment: &RiskAssessment) -> WorkflowResult<RiskAssessment> {
    if !assessment.is_draft() {
        return Err(WorkflowError::Validation(format!(
            "assessment {} is not a draft (status: {})",
            assessment.id, assessment.status
        )));
    }
    let mut next = assessment.clone();
    next.status = AssessmentStatus::pending(ApprovalLevel::first());
    Ok(next)
}

/// Record a decision on an assessment and recompute its status.
///
/// The ledger enforces the ordering rule (only the currently pending
/// level may be decided); this wrapper additionally refuses drafts,
/// which are not in the workflow at all. On success the returned
/// assessment carries the updated ledger and the freshly derived
/// status; on error nothing has changed.
pub fn decide(
    assessment: &RiskAssessment,
    level: ApprovalLevel,
    decision: Decision,
    actor: &Actor,
    notes: impl Into<String>,
    flags: Option<ComplianceFlags>,
) -> WorkflowResult<RiskAssessment> {
    // A draft is not in the workflow: no level is actionable yet.
    if assessment.is_draft() {
        return Err(WorkflowError::InvalidLevel {
            submitted: level,
            expected: None,
        });
    }

    let ledger = assessment
        .ledger
        .record_decision(level, decision, actor, notes, flags)?;

    let mut next = assessment.clone();
    next.status = derive_status(&ledger);
    next.ledger = ledger;
    Ok(next)
}
