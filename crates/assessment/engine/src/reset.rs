//! Edit-triggered workflow reset policy.
//!
//! Approvals are decisions against facts. When the facts change after
//! a level has already decided, those prior decisions are void and the
//! whole workflow must re-run. Edits made while the assessment is still
//! a draft or still awaiting its very first decision need no reset:
//! nothing decided yet depends on the old content.

use crate::diff::change_set;
use crate::machine::derive_status;
use assessment_types::{
    Actor, ApprovalLedger, ApprovalLevel, AssessmentContent, AssessmentStatus, RiskAssessment,
};

/// The result of applying an edit to an assessment.
#[derive(Debug, Clone)]
pub struct EditOutcome {
    /// The assessment with the revised content applied (and, when the
    /// reset fired, a rewound status and fresh ledger).
    pub assessment: RiskAssessment,
    /// Whether the workflow was restarted. Callers surface an explicit
    /// restart notice to the editor when set.
    pub workflow_reset: bool,
    /// The substantive fields that differed, for audit display.
    pub changed_fields: Vec<&'static str>,
}

/// Decide whether an edit must restart the workflow.
///
/// True iff all of:
/// 1. at least one substantive field (or the attachment set) differs;
/// 2. the workflow has progressed past the first pending level —
///    `Draft` and `Pending Crewing Standards and Oversight` are exempt
///    since a reset there would be a no-op (`NeedsInformation` counts
///    as in-flight and does trigger);
/// 3. the editor is the original submitter or holds admin privilege.
pub fn should_reset_workflow(
    original: &RiskAssessment,
    revised: &AssessmentContent,
    editor: &Actor,
) -> bool {
    let has_substantive_changes = !change_set(&original.content, revised).is_empty();

    let past_initial_stage = !matches!(
        original.status,
        AssessmentStatus::Draft | AssessmentStatus::PendingCrewingStandardsOversight
    );

    let editor_eligible = editor.id == original.submitted_by.id || editor.is_admin();

    has_substantive_changes && past_initial_stage && editor_eligible
}

/// Apply an edit, resetting the workflow when the policy requires it.
///
/// The derived patrol length is recomputed from the revised dates
/// either way. When the reset fires, status rewinds to the first
/// pending level and the ledger is replaced with a fresh all-pending
/// one; otherwise status and ledger are left exactly as they were.
pub fn apply_edit(
    original: &RiskAssessment,
    mut revised: AssessmentContent,
    editor: &Actor,
) -> EditOutcome {
    let changed_fields = change_set(&original.content, &revised);
    let reset = should_reset_workflow(original, &revised, editor);

    revised.recompute_patrol_length();

    let mut assessment = original.clone();
    assessment.content = revised;
    if reset {
        assessment.status = AssessmentStatus::pending(ApprovalLevel::first());
        assessment.ledger = ApprovalLedger::new();
        debug_assert_eq!(derive_status(&assessment.ledger), assessment.status);
    }

    EditOutcome {
        assessment,
        workflow_reset: reset,
        changed_fields,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::decide;
    use assessment_types::{ActorRole, Decision};
    use chrono::{TimeZone, Utc};

    fn submitter() -> Actor {
        Actor::new("u-sub", "First Mate", ActorRole::Submitter)
    }

    fn admin() -> Actor {
        Actor::new("u-adm", "Fleet Admin", ActorRole::Admin)
    }

    fn approver(name: &str) -> Actor {
        Actor::new(format!("u-{name}"), name, ActorRole::Approver)
    }

    fn content() -> AssessmentContent {
        AssessmentContent {
            vessel_name: Some("CCGS Vigilant".into()),
            personnel_shortages: Some("Second engineer unavailable".into()),
            patrol_start: Some(Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap()),
            patrol_end: Some(Utc.with_ymd_and_hms(2026, 3, 15, 0, 0, 0).unwrap()),
            ..Default::default()
        }
    }

    /// Assessment approved through the first two levels, awaiting the
    /// Director General.
    fn at_final_level() -> RiskAssessment {
        let assessment = RiskAssessment::new(content(), submitter(), false);
        let assessment = decide(
            &assessment,
            ApprovalLevel::CrewingStandardsOversight,
            Decision::Approved,
            &approver("cso"),
            "ok",
            None,
        )
        .unwrap();
        decide(
            &assessment,
            ApprovalLevel::SeniorDirector,
            Decision::Approved,
            &approver("sd"),
            "ok",
            None,
        )
        .unwrap()
    }

    #[test]
    fn substantive_edit_in_flight_resets_everything() {
        let original = at_final_level();
        assert_eq!(original.status, AssessmentStatus::PendingDirectorGeneral);

        let mut revised = original.content.clone();
        revised.personnel_shortages = Some("Cook also unavailable".into());

        let outcome = apply_edit(&original, revised, &submitter());
        assert!(outcome.workflow_reset);
        assert_eq!(outcome.changed_fields, vec!["personnel_shortages"]);
        assert_eq!(
            outcome.assessment.status,
            AssessmentStatus::PendingCrewingStandardsOversight
        );
        assert!(outcome.assessment.ledger.is_empty());
    }

    #[test]
    fn edit_at_first_pending_level_does_not_reset() {
        let original = RiskAssessment::new(content(), submitter(), false);
        let mut revised = original.content.clone();
        revised.personnel_shortages = Some("Cook also unavailable".into());

        let outcome = apply_edit(&original, revised.clone(), &submitter());
        assert!(!outcome.workflow_reset);
        assert_eq!(outcome.assessment.status, original.status);
        assert_eq!(outcome.assessment.content.personnel_shortages, revised.personnel_shortages);
    }

    #[test]
    fn draft_edit_does_not_reset() {
        let original = RiskAssessment::new(content(), submitter(), true);
        let mut revised = original.content.clone();
        revised.vessel_name = Some("CCGS Steadfast".into());
        let outcome = apply_edit(&original, revised, &submitter());
        assert!(!outcome.workflow_reset);
        assert!(outcome.assessment.is_draft());
    }

    #[test]
    fn cosmetic_edit_in_flight_does_not_reset() {
        let original = at_final_level();
        let mut revised = original.content.clone();
        // Derived field only; not a substantive change.
        revised.patrol_length_days = Some(99);
        let outcome = apply_edit(&original, revised, &submitter());
        assert!(!outcome.workflow_reset);
        assert_eq!(outcome.assessment.status, AssessmentStatus::PendingDirectorGeneral);
        assert!(!outcome.assessment.ledger.is_empty());
        // And the derived field was recomputed from the dates.
        assert_eq!(outcome.assessment.content.patrol_length_days, Some(14));
    }

    #[test]
    fn identical_resubmission_does_not_reset() {
        let original = at_final_level();
        let outcome = apply_edit(&original, original.content.clone(), &submitter());
        assert!(!outcome.workflow_reset);
        assert!(outcome.changed_fields.is_empty());
    }

    #[test]
    fn unrelated_editor_does_not_trigger_reset() {
        let original = at_final_level();
        let mut revised = original.content.clone();
        revised.personnel_shortages = Some("Cook also unavailable".into());
        assert!(!should_reset_workflow(
            &original,
            &revised,
            &approver("someone-else")
        ));
    }

    #[test]
    fn admin_edit_triggers_reset() {
        let original = at_final_level();
        let mut revised = original.content.clone();
        revised.proposed_deviations = Some("Reduced patrol radius".into());
        assert!(should_reset_workflow(&original, &revised, &admin()));
    }

    #[test]
    fn needs_information_counts_as_in_flight() {
        let assessment = RiskAssessment::new(content(), submitter(), false);
        let assessment = decide(
            &assessment,
            ApprovalLevel::CrewingStandardsOversight,
            Decision::NeedsInformation,
            &approver("cso"),
            "clarify manning plan",
            None,
        )
        .unwrap();
        assert_eq!(assessment.status, AssessmentStatus::NeedsInformation);

        let mut revised = assessment.content.clone();
        revised.personnel_shortages = Some("Clarified: relief arranged for week two".into());
        let outcome = apply_edit(&assessment, revised, &submitter());
        // Full reset back to level one, not a resume at the flagged level.
        assert!(outcome.workflow_reset);
        assert_eq!(
            outcome.assessment.status,
            AssessmentStatus::PendingCrewingStandardsOversight
        );
        assert!(outcome.assessment.ledger.is_empty());
    }

    #[test]
    fn attachment_change_alone_triggers_reset() {
        let original = at_final_level();
        let mut revised = original.content.clone();
        revised
            .attachments
            .push(assessment_types::AttachmentRef::new_upload("new-cert.pdf"));
        let outcome = apply_edit(&original, revised, &submitter());
        assert!(outcome.workflow_reset);
        assert_eq!(outcome.changed_fields, vec!["attachments"]);
    }

    #[test]
    fn patrol_length_recomputed_on_every_edit() {
        let original = at_final_level();
        let mut revised = original.content.clone();
        revised.patrol_end = Some(Utc.with_ymd_and_hms(2026, 3, 8, 0, 0, 0).unwrap());
        let outcome = apply_edit(&original, revised, &submitter());
        assert!(outcome.workflow_reset);
        assert_eq!(outcome.assessment.content.patrol_length_days, Some(7));
    }
}
