//! Approval levels and the overall assessment status.

use serde::{Deserialize, Serialize};

// ── Approval Level ───────────────────────────────────────────────────

/// One of the three fixed, sequential approval levels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApprovalLevel {
    /// First level: Crewing Standards & Oversight review.
    #[serde(rename = "Crewing Standards and Oversight")]
    CrewingStandardsOversight,
    /// Second level: Senior Director review.
    #[serde(rename = "Senior Director")]
    SeniorDirector,
    /// Third and final level: Director General sign-off.
    #[serde(rename = "Director General")]
    DirectorGeneral,
}

impl ApprovalLevel {
    /// All levels in canonical decision order.
    pub const ALL: [ApprovalLevel; 3] = [
        ApprovalLevel::CrewingStandardsOversight,
        ApprovalLevel::SeniorDirector,
        ApprovalLevel::DirectorGeneral,
    ];

    /// Number of approval levels in the workflow.
    pub const COUNT: usize = Self::ALL.len();

    /// Zero-based position of this level in canonical order.
    pub fn index(&self) -> usize {
        match self {
            ApprovalLevel::CrewingStandardsOversight => 0,
            ApprovalLevel::SeniorDirector => 1,
            ApprovalLevel::DirectorGeneral => 2,
        }
    }

    /// The first level in canonical order.
    pub fn first() -> ApprovalLevel {
        ApprovalLevel::CrewingStandardsOversight
    }

    /// Returns `true` for the first level, the only one that carries
    /// compliance flags.
    pub fn is_first(&self) -> bool {
        *self == Self::first()
    }

    /// Canonical display name, also used in serialized form.
    pub fn name(&self) -> &'static str {
        match self {
            ApprovalLevel::CrewingStandardsOversight => "Crewing Standards and Oversight",
            ApprovalLevel::SeniorDirector => "Senior Director",
            ApprovalLevel::DirectorGeneral => "Director General",
        }
    }
}

impl std::fmt::Display for ApprovalLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ── Decision ─────────────────────────────────────────────────────────

/// The outcome an approver can record for a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    /// The level approves the assessment.
    Approved,
    /// The level rejects the assessment; no later level is ever decided.
    Rejected,
    /// More information is required before the workflow can progress.
    #[serde(rename = "Needs Information")]
    NeedsInformation,
}

// ── Assessment Status ────────────────────────────────────────────────

/// Overall workflow state of an assessment.
///
/// Every variant except [`AssessmentStatus::Draft`] is a pure
/// projection of the approval ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssessmentStatus {
    /// Created but not yet submitted into the workflow.
    Draft,
    /// Awaiting the first-level decision.
    #[serde(rename = "Pending Crewing Standards and Oversight")]
    PendingCrewingStandardsOversight,
    /// Awaiting the Senior Director decision.
    #[serde(rename = "Pending Senior Director")]
    PendingSeniorDirector,
    /// Awaiting the Director General decision.
    #[serde(rename = "Pending Director General")]
    PendingDirectorGeneral,
    /// A level asked for more information; progression is suspended.
    #[serde(rename = "Needs Information")]
    NeedsInformation,
    /// All three levels approved. Terminal.
    Approved,
    /// Some level rejected. Terminal.
    Rejected,
}

impl AssessmentStatus {
    /// The pending status corresponding to a level awaiting decision.
    pub fn pending(level: ApprovalLevel) -> AssessmentStatus {
        match level {
            ApprovalLevel::CrewingStandardsOversight => {
                AssessmentStatus::PendingCrewingStandardsOversight
            }
            ApprovalLevel::SeniorDirector => AssessmentStatus::PendingSeniorDirector,
            ApprovalLevel::DirectorGeneral => AssessmentStatus::PendingDirectorGeneral,
        }
    }

    /// Check if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, AssessmentStatus::Approved | AssessmentStatus::Rejected)
    }

    /// The level awaiting a decision, if this is a pending status.
    pub fn pending_level(&self) -> Option<ApprovalLevel> {
        match self {
            AssessmentStatus::PendingCrewingStandardsOversight => {
                Some(ApprovalLevel::CrewingStandardsOversight)
            }
            AssessmentStatus::PendingSeniorDirector => Some(ApprovalLevel::SeniorDirector),
            AssessmentStatus::PendingDirectorGeneral => Some(ApprovalLevel::DirectorGeneral),
            _ => None,
        }
    }
}

impl std::fmt::Display for AssessmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AssessmentStatus::Draft => "Draft",
            AssessmentStatus::PendingCrewingStandardsOversight => {
                "Pending Crewing Standards and Oversight"
            }
            AssessmentStatus::PendingSeniorDirector => "Pending Senior Director",
            AssessmentStatus::PendingDirectorGeneral => "Pending Director General",
            AssessmentStatus::NeedsInformation => "Needs Information",
            AssessmentStatus::Approved => "Approved",
            AssessmentStatus::Rejected => "Rejected",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_order_is_fixed() {
        assert_eq!(ApprovalLevel::COUNT, 3);
        assert_eq!(ApprovalLevel::ALL[0], ApprovalLevel::CrewingStandardsOversight);
        assert_eq!(ApprovalLevel::ALL[1], ApprovalLevel::SeniorDirector);
        assert_eq!(ApprovalLevel::ALL[2], ApprovalLevel::DirectorGeneral);
        for (i, level) in ApprovalLevel::ALL.iter().enumerate() {
            assert_eq!(level.index(), i);
        }
    }

    #[test]
    fn only_first_level_carries_flags() {
        assert!(ApprovalLevel::CrewingStandardsOversight.is_first());
        assert!(!ApprovalLevel::SeniorDirector.is_first());
        assert!(!ApprovalLevel::DirectorGeneral.is_first());
    }

    #[test]
    fn status_literals_roundtrip() {
        let statuses = [
            AssessmentStatus::Draft,
            AssessmentStatus::PendingCrewingStandardsOversight,
            AssessmentStatus::PendingSeniorDirector,
            AssessmentStatus::PendingDirectorGeneral,
            AssessmentStatus::NeedsInformation,
            AssessmentStatus::Approved,
            AssessmentStatus::Rejected,
        ];
        for status in statuses {
            let json = serde_json::to_string(&status).unwrap();
            let back: AssessmentStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(status, back);
        }
        assert_eq!(
            serde_json::to_string(&AssessmentStatus::PendingSeniorDirector).unwrap(),
            "\"Pending Senior Director\""
        );
    }

    #[test]
    fn pending_status_maps_back_to_level() {
        for level in ApprovalLevel::ALL {
            assert_eq!(AssessmentStatus::pending(level).pending_level(), Some(level));
        }
        assert_eq!(AssessmentStatus::Approved.pending_level(), None);
        assert_eq!(AssessmentStatus::Draft.pending_level(), None);
    }

    #[test]
    fn terminal_states() {
        assert!(AssessmentStatus::Approved.is_terminal());
        assert!(AssessmentStatus::Rejected.is_terminal());
        assert!(!AssessmentStatus::Draft.is_terminal());
        assert!(!AssessmentStatus::NeedsInformation.is_terminal());
        assert!(!AssessmentStatus::PendingDirectorGeneral.is_terminal());
    }
}
