//! The approval ledger: one decision slot per level, always present.

use crate::{Actor, ApprovalLevel, Decision, WorkflowError, WorkflowResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Compliance Flags ─────────────────────────────────────────────────

/// Regulatory non-compliance categories recorded with the first-level
/// decision. Meaningless (and always all-false) on later levels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceFlags {
    /// Deviation from the Fleet Safety Manual.
    #[serde(rename = "isAgainstFSM", default)]
    pub against_fsm: bool,
    /// Deviation from the Minimum Personnel Requirements.
    #[serde(rename = "isAgainstMPR", default)]
    pub against_mpr: bool,
    /// Deviation from the vessel's crewing profile.
    #[serde(rename = "isAgainstCrewingProfile", default)]
    pub against_crewing_profile: bool,
}

impl ComplianceFlags {
    pub fn none() -> Self {
        Self::default()
    }

    /// Check if any non-compliance category is flagged.
    pub fn any(&self) -> bool {
        self.against_fsm || self.against_mpr || self.against_crewing_profile
    }
}

// ── Decision Record ──────────────────────────────────────────────────

/// A fully populated decision for one level. All audit fields are set
/// together when the decision is recorded; a step never holds a partial
/// record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub decision: Decision,
    /// Id of the deciding actor.
    pub user_id: String,
    /// Display name of the deciding actor.
    pub user_name: String,
    /// When the decision was recorded.
    pub decided_at: DateTime<Utc>,
    /// Mandatory decision notes.
    pub notes: String,
}

// ── Approval Step ────────────────────────────────────────────────────

/// The decision slot for one approval level: either pending (no
/// record) or fully decided.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalStep {
    pub level: ApprovalLevel,
    /// `None` while the level is pending.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<DecisionRecord>,
    /// Compliance flags; populated only on the first level.
    #[serde(default)]
    pub flags: ComplianceFlags,
}

impl ApprovalStep {
    /// An empty (pending) step for a level.
    pub fn pending(level: ApprovalLevel) -> Self {
        Self {
            level,
            record: None,
            flags: ComplianceFlags::none(),
        }
    }

    /// Check if a decision has been recorded for this level.
    pub fn is_decided(&self) -> bool {
        self.record.is_some()
    }

    /// The recorded decision, if any.
    pub fn decision(&self) -> Option<Decision> {
        self.record.as_ref().map(|r| r.decision)
    }
}

// ── Approval Ledger ──────────────────────────────────────────────────

/// The ordered, fixed-cardinality collection of approval steps.
///
/// Exactly one step per level, always in canonical order. The fixed
/// array makes a missing or duplicated level unrepresentable; the only
/// place the invariant can be violated is the storage boundary, which
/// must go through [`ApprovalLedger::from_steps`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ApprovalStep>", into = "Vec<ApprovalStep>")]
pub struct ApprovalLedger {
    steps: [ApprovalStep; ApprovalLevel::COUNT],
}

impl ApprovalLedger {
    /// A fresh ledger: one pending step per level in canonical order.
    /// Used at assessment creation and at every workflow reset.
    pub fn new() -> Self {
        Self {
            steps: ApprovalLevel::ALL.map(ApprovalStep::pending),
        }
    }

    /// Validate a persisted step list back into a ledger.
    ///
    /// Fails with [`WorkflowError::MalformedLedger`] unless the list
    /// holds exactly one step per level in canonical order. Defensive
    /// invariant check for the storage boundary, not a normal-path
    /// error.
    pub fn from_steps(steps: Vec<ApprovalStep>) -> WorkflowResult<Self> {
        let steps: [ApprovalStep; ApprovalLevel::COUNT] =
            steps.try_into().map_err(|v: Vec<ApprovalStep>| {
                WorkflowError::MalformedLedger(format!(
                    "expected {} steps, found {}",
                    ApprovalLevel::COUNT,
                    v.len()
                ))
            })?;
        for (step, expected) in steps.iter().zip(ApprovalLevel::ALL) {
            if step.level != expected {
                return Err(WorkflowError::MalformedLedger(format!(
                    "expected level '{}' at position {}, found '{}'",
                    expected,
                    expected.index(),
                    step.level
                )));
            }
        }
        Ok(Self { steps })
    }

    /// The step for a level. Infallible: every level always has exactly
    /// one step.
    pub fn step(&self, level: ApprovalLevel) -> &ApprovalStep {
        &self.steps[level.index()]
    }

    /// Mutable access for the engine's decision recording.
    pub(crate) fn step_mut(&mut self, level: ApprovalLevel) -> &mut ApprovalStep {
        &mut self.steps[level.index()]
    }

    /// Steps in canonical order.
    pub fn steps(&self) -> &[ApprovalStep] {
        &self.steps
    }

    /// Check if no decision has been recorded on any level.
    pub fn is_empty(&self) -> bool {
        self.steps.iter().all(|s| !s.is_decided())
    }

    /// Record a decision on the given level.
    ///
    /// Fails with [`WorkflowError::InvalidLevel`] unless `level` is the
    /// level currently awaiting decision (no out-of-order decisions, no
    /// re-deciding, no deciding once a level has rejected or asked for
    /// information). Fails with [`WorkflowError::Validation`] when the
    /// notes are empty. Compliance flags apply only to the first level;
    /// flags supplied for any later level are ignored.
    ///
    /// Pure with respect to `self`: returns the updated ledger and
    /// leaves persistence to the caller.
    pub fn record_decision(
        &self,
        level: ApprovalLevel,
        decision: Decision,
        actor: &Actor,
        notes: impl Into<String>,
        flags: Option<ComplianceFlags>,
    ) -> WorkflowResult<ApprovalLedger> {
        let expected = self.current_level();
        if expected != Some(level) {
            return Err(WorkflowError::InvalidLevel {
                submitted: level,
                expected,
            });
        }

        let notes = notes.into();
        if notes.trim().is_empty() {
            return Err(WorkflowError::Validation(
                "decision notes must not be empty".to_string(),
            ));
        }

        let mut next = self.clone();
        let step = next.step_mut(level);
        step.record = Some(DecisionRecord {
            decision,
            user_id: actor.id.clone(),
            user_name: actor.name.clone(),
            decided_at: Utc::now(),
            notes,
        });
        step.flags = if level.is_first() {
            flags.unwrap_or_default()
        } else {
            ComplianceFlags::none()
        };
        Ok(next)
    }

    /// The level currently awaiting a decision.
    ///
    /// `None` once any level has rejected or asked for information, or
    /// when every level has approved — in all three cases no further
    /// decision may be recorded.
    pub fn current_level(&self) -> Option<ApprovalLevel> {
        for step in &self.steps {
            match step.decision() {
                None => return Some(step.level),
                Some(Decision::Approved) => continue,
                Some(Decision::Rejected) | Some(Decision::NeedsInformation) => return None,
            }
        }
        None
    }
}

impl Default for ApprovalLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<Vec<ApprovalStep>> for ApprovalLedger {
    type Error = WorkflowError;

    fn try_from(steps: Vec<ApprovalStep>) -> Result<Self, Self::Error> {
        Self::from_steps(steps)
    }
}

impl From<ApprovalLedger> for Vec<ApprovalStep> {
    fn from(ledger: ApprovalLedger) -> Self {
        ledger.steps.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ActorRole;

    fn approver(name: &str) -> Actor {
        Actor::new(format!("u-{name}"), name, ActorRole::Approver)
    }

    #[test]
    fn fresh_ledger_is_all_pending_in_order() {
        let ledger = ApprovalLedger::new();
        assert!(ledger.is_empty());
        assert_eq!(ledger.steps().len(), 3);
        for (step, level) in ledger.steps().iter().zip(ApprovalLevel::ALL) {
            assert_eq!(step.level, level);
            assert!(!step.is_decided());
            assert!(!step.flags.any());
        }
        assert_eq!(
            ledger.current_level(),
            Some(ApprovalLevel::CrewingStandardsOversight)
        );
    }

    #[test]
    fn out_of_order_decision_rejected() {
        let ledger = ApprovalLedger::new();
        let err = ledger
            .record_decision(
                ApprovalLevel::DirectorGeneral,
                Decision::Approved,
                &approver("dg"),
                "fine by me",
                None,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::InvalidLevel {
                submitted: ApprovalLevel::DirectorGeneral,
                expected: Some(ApprovalLevel::CrewingStandardsOversight),
            }
        ));
    }

    #[test]
    fn re_deciding_a_level_rejected() {
        let ledger = ApprovalLedger::new()
            .record_decision(
                ApprovalLevel::CrewingStandardsOversight,
                Decision::Approved,
                &approver("cso"),
                "manning acceptable",
                None,
            )
            .unwrap();
        let err = ledger
            .record_decision(
                ApprovalLevel::CrewingStandardsOversight,
                Decision::Rejected,
                &approver("cso"),
                "changed my mind",
                None,
            )
            .unwrap_err();
        assert!(matches!(err, WorkflowError::InvalidLevel { .. }));
    }

    #[test]
    fn rejection_closes_the_ledger() {
        let ledger = ApprovalLedger::new()
            .record_decision(
                ApprovalLevel::CrewingStandardsOversight,
                Decision::Rejected,
                &approver("cso"),
                "below minimum manning",
                None,
            )
            .unwrap();
        assert_eq!(ledger.current_level(), None);
        let err = ledger
            .record_decision(
                ApprovalLevel::SeniorDirector,
                Decision::Approved,
                &approver("sd"),
                "approve anyway",
                None,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::InvalidLevel { expected: None, .. }
        ));
    }

    #[test]
    fn needs_information_suspends_the_ledger() {
        let ledger = ApprovalLedger::new()
            .record_decision(
                ApprovalLevel::CrewingStandardsOversight,
                Decision::NeedsInformation,
                &approver("cso"),
                "clarify watch schedule",
                None,
            )
            .unwrap();
        assert_eq!(ledger.current_level(), None);
    }

    #[test]
    fn empty_notes_rejected_before_mutation() {
        let ledger = ApprovalLedger::new();
        let err = ledger
            .record_decision(
                ApprovalLevel::CrewingStandardsOversight,
                Decision::Approved,
                &approver("cso"),
                "   ",
                None,
            )
            .unwrap_err();
        assert!(matches!(err, WorkflowError::Validation(_)));
        assert!(ledger.is_empty());
    }

    #[test]
    fn flags_recorded_on_first_level_only() {
        let flags = ComplianceFlags {
            against_fsm: true,
            ..ComplianceFlags::none()
        };
        let ledger = ApprovalLedger::new()
            .record_decision(
                ApprovalLevel::CrewingStandardsOversight,
                Decision::Approved,
                &approver("cso"),
                "flagged FSM deviation",
                Some(flags),
            )
            .unwrap();
        assert!(ledger.step(ApprovalLevel::CrewingStandardsOversight).flags.against_fsm);

        // Flags supplied while deciding level 2 have no effect.
        let ledger = ledger
            .record_decision(
                ApprovalLevel::SeniorDirector,
                Decision::Approved,
                &approver("sd"),
                "concur",
                Some(flags),
            )
            .unwrap();
        assert!(!ledger.step(ApprovalLevel::SeniorDirector).flags.any());
        // And the first level's flags survive.
        assert!(ledger.step(ApprovalLevel::CrewingStandardsOversight).flags.against_fsm);
    }

    #[test]
    fn decision_record_is_all_or_nothing() {
        let ledger = ApprovalLedger::new()
            .record_decision(
                ApprovalLevel::CrewingStandardsOversight,
                Decision::Approved,
                &approver("cso"),
                "ok",
                None,
            )
            .unwrap();
        let record = ledger
            .step(ApprovalLevel::CrewingStandardsOversight)
            .record
            .as_ref()
            .unwrap();
        assert_eq!(record.user_id, "u-cso");
        assert_eq!(record.user_name, "cso");
        assert_eq!(record.notes, "ok");
    }

    #[test]
    fn from_steps_rejects_wrong_length() {
        let steps = vec![ApprovalStep::pending(ApprovalLevel::CrewingStandardsOversight)];
        assert!(matches!(
            ApprovalLedger::from_steps(steps),
            Err(WorkflowError::MalformedLedger(_))
        ));
    }

    #[test]
    fn from_steps_rejects_wrong_order() {
        let steps = vec![
            ApprovalStep::pending(ApprovalLevel::SeniorDirector),
            ApprovalStep::pending(ApprovalLevel::CrewingStandardsOversight),
            ApprovalStep::pending(ApprovalLevel::DirectorGeneral),
        ];
        assert!(matches!(
            ApprovalLedger::from_steps(steps),
            Err(WorkflowError::MalformedLedger(_))
        ));
    }

    #[test]
    fn ledger_roundtrips_through_json() {
        let ledger = ApprovalLedger::new()
            .record_decision(
                ApprovalLevel::CrewingStandardsOversight,
                Decision::Approved,
                &approver("cso"),
                "manning acceptable",
                Some(ComplianceFlags {
                    against_mpr: true,
                    ..ComplianceFlags::none()
                }),
            )
            .unwrap();
        let json = serde_json::to_string(&ledger).unwrap();
        let back: ApprovalLedger = serde_json::from_str(&json).unwrap();
        assert_eq!(ledger, back);
        // Serialized as a plain step list with canonical level literals.
        assert!(json.contains("\"Crewing Standards and Oversight\""));
        assert!(json.contains("\"isAgainstMPR\":true"));
    }

    #[test]
    fn malformed_persisted_ledger_rejected_on_deserialize() {
        let json = r#"[{"level":"Senior Director","flags":{}}]"#;
        assert!(serde_json::from_str::<ApprovalLedger>(json).is_err());
    }
}
