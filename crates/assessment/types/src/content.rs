//! Assessment content: the substantive fields of a risk assessment.
//!
//! These are the fields approvers decide against. Changing any of them
//! while the workflow is in flight invalidates prior approvals and may
//! trigger a workflow reset (see the engine's reset policy).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Structured sub-fields ────────────────────────────────────────────

/// One structured yes/no question with an optional free-text detail.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YesNoAnswer {
    /// The answer; `None` means unanswered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<bool>,
    /// Supporting detail for the answer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl YesNoAnswer {
    pub fn yes(details: impl Into<String>) -> Self {
        Self {
            answer: Some(true),
            details: Some(details.into()),
        }
    }

    pub fn no(details: impl Into<String>) -> Self {
        Self {
            answer: Some(false),
            details: Some(details.into()),
        }
    }
}

// ── Attachments ──────────────────────────────────────────────────────

/// Reference to an attached document. Blob storage is an external
/// collaborator; only identity metadata lives here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRef {
    /// Storage-assigned id; `None` for a newly added, not-yet-persisted
    /// upload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Original file name.
    pub file_name: String,
}

impl AttachmentRef {
    /// A persisted attachment with a storage id.
    pub fn persisted(id: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            file_name: file_name.into(),
        }
    }

    /// A newly added upload that has not been persisted yet.
    pub fn new_upload(file_name: impl Into<String>) -> Self {
        Self {
            id: None,
            file_name: file_name.into(),
        }
    }
}

// ── Assessment Content ───────────────────────────────────────────────

/// The substantive fields of a risk assessment.
///
/// `patrol_length_days` is derived from the patrol dates and is
/// recomputed on every edit; it is never compared independently when
/// detecting substantive changes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentContent {
    // Vessel identity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vessel_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imo_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vessel_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_port: Option<String>,

    // Voyage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patrol_area: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patrol_start: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patrol_end: Option<DateTime<Utc>>,
    /// Derived from `patrol_start`/`patrol_end`; see [`Self::recompute_patrol_length`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patrol_length_days: Option<i64>,

    // Narratives
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personnel_shortages: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proposed_deviations: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operational_impact: Option<String>,

    // Crewing assessment sub-fields
    #[serde(default)]
    pub master_experience_adequate: YesNoAnswer,
    #[serde(default)]
    pub officers_hold_certificates: YesNoAnswer,
    #[serde(default)]
    pub crew_familiar_with_vessel: YesNoAnswer,
    #[serde(default)]
    pub minimum_safe_manning_met: YesNoAnswer,
    #[serde(default)]
    pub watchkeeping_schedule_compliant: YesNoAnswer,
    #[serde(default)]
    pub rest_hours_achievable: YesNoAnswer,
    #[serde(default)]
    pub medical_certificates_current: YesNoAnswer,
    #[serde(default)]
    pub engine_room_coverage_adequate: YesNoAnswer,
    #[serde(default)]
    pub deck_supervision_adequate: YesNoAnswer,
    #[serde(default)]
    pub emergency_roles_filled: YesNoAnswer,
    #[serde(default)]
    pub firefighting_capability_maintained: YesNoAnswer,
    #[serde(default)]
    pub lifesaving_capability_maintained: YesNoAnswer,
    #[serde(default)]
    pub navigation_watch_qualified: YesNoAnswer,
    #[serde(default)]
    pub radio_operator_available: YesNoAnswer,
    #[serde(default)]
    pub food_and_accommodation_adequate: YesNoAnswer,
    #[serde(default)]
    pub training_requirements_met: YesNoAnswer,
    #[serde(default)]
    pub prior_incidents_reviewed: YesNoAnswer,
    #[serde(default)]
    pub fatigue_risk_assessed: YesNoAnswer,
    #[serde(default)]
    pub language_requirements_met: YesNoAnswer,
    #[serde(default)]
    pub security_duties_covered: YesNoAnswer,

    // Attachments
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<AttachmentRef>,
}

impl AssessmentContent {
    /// Recompute the derived patrol length from the patrol dates.
    ///
    /// Clears the field when either date is absent or the range is
    /// inverted.
    pub fn recompute_patrol_length(&mut self) {
        self.patrol_length_days = match (self.patrol_start, self.patrol_end) {
            (Some(start), Some(end)) if end >= start => {
                Some(end.signed_duration_since(start).num_days())
            }
            _ => None,
        };
    }
}
