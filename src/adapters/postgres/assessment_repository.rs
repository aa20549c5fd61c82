//! PostgreSQL adapter for the assessment store.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use super::{payload_error, persistence_error};
use crate::domain::foundation::{AssessmentId, DomainError, EvaluationId, UserId};
use crate::domain::psychometric::{PsychometricEvaluation, PsychometricQuestionSet};
use crate::ports::AssessmentStore;

pub struct PgAssessmentStore {
    pool: PgPool,
}

impl PgAssessmentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AssessmentStore for PgAssessmentStore {
    async fn insert_question_set(
        &self,
        set: &PsychometricQuestionSet,
    ) -> Result<(), DomainError> {
        let payload = serde_json::to_value(set)
            .map_err(|e| payload_error("serialize question set", e))?;

        let result = sqlx::query(
            r#"
            INSERT INTO question_sets (id, payload, created_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(set.id.as_uuid())
        .bind(payload)
        .execute(&self.pool)
        .await
        .map_err(|e| persistence_error("insert question set", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::persistence(format!(
                "question set {} already exists",
                set.id
            )));
        }
        Ok(())
    }

    async fn get_question_set(
        &self,
        id: AssessmentId,
    ) -> Result<Option<PsychometricQuestionSet>, DomainError> {
        let row = sqlx::query("SELECT payload FROM question_sets WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| persistence_error("fetch question set", e))?;

        row.map(|row| {
            serde_json::from_value(row.get("payload"))
                .map_err(|e| payload_error("deserialize question set", e))
        })
        .transpose()
    }

    async fn insert_evaluation(
        &self,
        evaluation: &PsychometricEvaluation,
    ) -> Result<(), DomainError> {
        let payload = serde_json::to_value(evaluation)
            .map_err(|e| payload_error("serialize evaluation", e))?;

        let result = sqlx::query(
            r#"
            INSERT INTO psychometric_evaluations (id, user_id, payload, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(evaluation.id.as_uuid())
        .bind(evaluation.user_id.as_str())
        .bind(payload)
        .bind(evaluation.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| persistence_error("insert evaluation", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::persistence(format!(
                "evaluation {} already exists",
                evaluation.id
            )));
        }
        Ok(())
    }

    async fn get_evaluation(
        &self,
        id: EvaluationId,
    ) -> Result<Option<PsychometricEvaluation>, DomainError> {
        let row = sqlx::query("SELECT payload FROM psychometric_evaluations WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| persistence_error("fetch evaluation", e))?;

        row.map(|row| {
            serde_json::from_value(row.get("payload"))
                .map_err(|e| payload_error("deserialize evaluation", e))
        })
        .transpose()
    }

    async fn list_evaluations_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<PsychometricEvaluation>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT payload FROM psychometric_evaluations
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| persistence_error("list evaluations", e))?;

        rows.iter()
            .map(|row| {
                serde_json::from_value(row.get("payload"))
                    .map_err(|e| payload_error("deserialize evaluation", e))
            })
            .collect()
    }
}
