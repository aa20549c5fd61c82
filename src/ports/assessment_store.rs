//! Assessment store port.

use async_trait::async_trait;

use crate::domain::foundation::{AssessmentId, DomainError, EvaluationId, UserId};
use crate::domain::psychometric::{PsychometricEvaluation, PsychometricQuestionSet};

/// Insert-once persistence for question sets and evaluations.
#[async_trait]
pub trait AssessmentStore: Send + Sync {
    /// Persists a generated question set. Fails on duplicate id.
    async fn insert_question_set(
        &self,
        set: &PsychometricQuestionSet,
    ) -> Result<(), DomainError>;

    /// Fetches a question set by id.
    async fn get_question_set(
        &self,
        id: AssessmentId,
    ) -> Result<Option<PsychometricQuestionSet>, DomainError>;

    /// Persists an evaluation. Fails on duplicate id.
    async fn insert_evaluation(
        &self,
        evaluation: &PsychometricEvaluation,
    ) -> Result<(), DomainError>;

    /// Fetches an evaluation by id.
    async fn get_evaluation(
        &self,
        id: EvaluationId,
    ) -> Result<Option<PsychometricEvaluation>, DomainError>;

    /// Lists a user's evaluations, newest first.
    async fn list_evaluations_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<PsychometricEvaluation>, DomainError>;
}
