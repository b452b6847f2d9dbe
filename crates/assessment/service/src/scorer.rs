//! Advisory scoring seam: trait definition and static implementation.
//!
//! The scorer is an opaque external collaborator. Its output is stored
//! on the assessment for reviewers to read; the workflow state machine
//! never consults it.

use crate::ScorerError;
use assessment_types::{AssessmentContent, RiskAdvisory};
use async_trait::async_trait;

/// Trait for the generative-AI scoring collaborator.
#[async_trait]
pub trait RiskScorer: Send + Sync {
    /// Produce advisory annotations for the given content.
    async fn score(&self, content: &AssessmentContent) -> Result<RiskAdvisory, ScorerError>;
}

/// A scorer returning a fixed advisory, for testing and development.
pub struct StaticRiskScorer {
    advisory: RiskAdvisory,
}

impl StaticRiskScorer {
    pub fn new(advisory: RiskAdvisory) -> Self {
        Self { advisory }
    }
}

impl Default for StaticRiskScorer {
    fn default() -> Self {
        Self::new(RiskAdvisory {
            risk_score: 5.0,
            summary: "No advisory model configured".to_string(),
            mitigations: Vec::new(),
            regulatory_notes: Vec::new(),
        })
    }
}

#[async_trait]
impl RiskScorer for StaticRiskScorer {
    async fn score(&self, _content: &AssessmentContent) -> Result<RiskAdvisory, ScorerError> {
        Ok(self.advisory.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_scorer_returns_configured_advisory() {
        let scorer = StaticRiskScorer::new(RiskAdvisory {
            risk_score: 8.2,
            summary: "High manning risk".into(),
            mitigations: vec!["Shorten patrol".into()],
            regulatory_notes: vec![],
        });
        let advisory = scorer.score(&AssessmentContent::default()).await.unwrap();
        assert_eq!(advisory.risk_score, 8.2);
        assert_eq!(advisory.mitigations.len(), 1);
    }
}
