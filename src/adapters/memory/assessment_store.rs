//! In-memory assessment store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::foundation::{AssessmentId, DomainError, EvaluationId, UserId};
use crate::domain::psychometric::{PsychometricEvaluation, PsychometricQuestionSet};
use crate::ports::AssessmentStore;

#[derive(Default)]
pub struct InMemoryAssessmentStore {
    sets: Mutex<HashMap<AssessmentId, PsychometricQuestionSet>>,
    evaluations: Mutex<Vec<PsychometricEvaluation>>,
}

impl InMemoryAssessmentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AssessmentStore for InMemoryAssessmentStore {
    async fn insert_question_set(
        &self,
        set: &PsychometricQuestionSet,
    ) -> Result<(), DomainError> {
        let mut sets = self.sets.lock().expect("assessment store lock poisoned");
        if sets.contains_key(&set.id) {
            return Err(DomainError::persistence(format!(
                "question set {} already exists",
                set.id
            )));
        }
        sets.insert(set.id, set.clone());
        Ok(())
    }

    async fn get_question_set(
        &self,
        id: AssessmentId,
    ) -> Result<Option<PsychometricQuestionSet>, DomainError> {
        let sets = self.sets.lock().expect("assessment store lock poisoned");
        Ok(sets.get(&id).cloned())
    }

    async fn insert_evaluation(
        &self,
        evaluation: &PsychometricEvaluation,
    ) -> Result<(), DomainError> {
        let mut evaluations = self
            .evaluations
            .lock()
            .expect("assessment store lock poisoned");
        if evaluations.iter().any(|e| e.id == evaluation.id) {
            return Err(DomainError::persistence(format!(
                "evaluation {} already exists",
                evaluation.id
            )));
        }
        evaluations.push(evaluation.clone());
        Ok(())
    }

    async fn get_evaluation(
        &self,
        id: EvaluationId,
    ) -> Result<Option<PsychometricEvaluation>, DomainError> {
        let evaluations = self
            .evaluations
            .lock()
            .expect("assessment store lock poisoned");
        Ok(evaluations.iter().find(|e| e.id == id).cloned())
    }

    async fn list_evaluations_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<PsychometricEvaluation>, DomainError> {
        let evaluations = self
            .evaluations
            .lock()
            .expect("assessment store lock poisoned");
        Ok(evaluations
            .iter()
            .rev()
            .filter(|e| &e.user_id == user_id)
            .cloned()
            .collect())
    }
}
