//! The risk assessment aggregate root.

use crate::{Actor, ApprovalLedger, AssessmentContent, AssessmentStatus};
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

// ── Identifiers ──────────────────────────────────────────────────────

/// Opaque assessment identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssessmentId(pub String);

impl AssessmentId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn short(&self) -> &str {
        &self.0[..8.min(self.0.len())]
    }
}

impl std::fmt::Display for AssessmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Human-readable reference assigned at creation. Immutable thereafter.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReferenceNumber(pub String);

impl ReferenceNumber {
    /// Format: `RA-<year>-<short id>`, e.g. `RA-2026-4f9a01bc`.
    pub fn assign(id: &AssessmentId, at: DateTime<Utc>) -> Self {
        Self(format!("RA-{}-{}", at.year(), id.short()))
    }
}

impl std::fmt::Display for ReferenceNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Advisory fields ──────────────────────────────────────────────────

/// AI-generated advisory annotations. Purely informational: written by
/// the scoring collaborator, displayed to reviewers, and never read by
/// the workflow state machine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskAdvisory {
    /// Numeric risk score from the scoring collaborator.
    pub risk_score: f64,
    /// Generated narrative summary.
    pub summary: String,
    /// Suggested mitigations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mitigations: Vec<String>,
    /// Regulatory considerations raised by the scorer.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub regulatory_notes: Vec<String>,
}

// ── Risk Assessment ──────────────────────────────────────────────────

/// A single risk-assessment case tracked through the approval workflow.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub id: AssessmentId,
    pub reference_number: ReferenceNumber,
    /// The substantive fields approvers decide against.
    pub content: AssessmentContent,
    /// Overall workflow state; outside `Draft` always recomputed from
    /// the ledger on every mutation path.
    pub status: AssessmentStatus,
    /// One decision slot per approval level, canonical order.
    pub ledger: ApprovalLedger,
    /// Advisory annotations from the scoring collaborator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advisory: Option<RiskAdvisory>,
    /// Who created the assessment.
    pub submitted_by: Actor,
    /// When the assessment was created.
    pub submitted_at: DateTime<Utc>,
    /// Stamped by the store on every write; also the compare-and-swap
    /// token for concurrent updates.
    pub last_modified: DateTime<Utc>,
}

impl RiskAssessment {
    /// Create a new assessment.
    ///
    /// Starts in `Draft` when `as_draft` is set, otherwise directly at
    /// the first pending level. The ledger is all-pending either way.
    pub fn new(mut content: AssessmentContent, submitted_by: Actor, as_draft: bool) -> Self {
        let now = Utc::now();
        let id = AssessmentId::generate();
        content.recompute_patrol_length();
        Self {
            reference_number: ReferenceNumber::assign(&id, now),
            id,
            content,
            status: if as_draft {
                AssessmentStatus::Draft
            } else {
                AssessmentStatus::pending(crate::ApprovalLevel::first())
            },
            ledger: ApprovalLedger::new(),
            advisory: None,
            submitted_by,
            submitted_at: now,
            last_modified: now,
        }
    }

    /// Check if the assessment has reached a terminal status.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Check if the assessment is still a pre-submission draft.
    pub fn is_draft(&self) -> bool {
        self.status == AssessmentStatus::Draft
    }
}
