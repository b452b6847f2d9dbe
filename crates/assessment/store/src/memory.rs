//! In-memory reference implementation of the assessment store.
//!
//! Deterministic and test-friendly. The compare-and-swap check and the
//! patch application happen under one write lock, so there is at most
//! one winning writer per stamp.

use crate::{AssessmentPatch, AssessmentStore, StoreError, StoreResult};
use assessment_types::{AssessmentId, RiskAssessment};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory assessment store adapter.
#[derive(Default)]
pub struct InMemoryAssessmentStore {
    records: RwLock<HashMap<AssessmentId, RiskAssessment>>,
}

impl InMemoryAssessmentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AssessmentStore for InMemoryAssessmentStore {
    async fn create(&self, assessment: RiskAssessment) -> StoreResult<()> {
        let mut guard = self
            .records
            .write()
            .map_err(|_| StoreError::Backend("records lock poisoned".to_string()))?;

        if guard.contains_key(&assessment.id) {
            return Err(StoreError::Conflict(format!(
                "assessment {} already exists",
                assessment.id
            )));
        }
        guard.insert(assessment.id.clone(), assessment);
        Ok(())
    }

    async fn get(&self, id: &AssessmentId) -> StoreResult<Option<RiskAssessment>> {
        let guard = self
            .records
            .read()
            .map_err(|_| StoreError::Backend("records lock poisoned".to_string()))?;
        Ok(guard.get(id).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<RiskAssessment>> {
        let guard = self
            .records
            .read()
            .map_err(|_| StoreError::Backend("records lock poisoned".to_string()))?;
        let mut all: Vec<RiskAssessment> = guard.values().cloned().collect();
        all.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(all)
    }

    async fn update(
        &self,
        id: &AssessmentId,
        expected_last_modified: DateTime<Utc>,
        patch: AssessmentPatch,
    ) -> StoreResult<RiskAssessment> {
        let mut guard = self
            .records
            .write()
            .map_err(|_| StoreError::Backend("records lock poisoned".to_string()))?;

        let record = guard
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        if record.last_modified != expected_last_modified {
            return Err(StoreError::Conflict(format!(
                "assessment {} was modified at {}, expected {}",
                id, record.last_modified, expected_last_modified
            )));
        }

        if let Some(status) = patch.status {
            record.status = status;
        }
        if let Some(ledger) = patch.ledger {
            record.ledger = ledger;
        }
        if let Some(content) = patch.content {
            record.content = content;
        }
        if let Some(advisory) = patch.advisory {
            record.advisory = Some(advisory);
        }
        record.last_modified = Utc::now();
        Ok(record.clone())
    }
}
