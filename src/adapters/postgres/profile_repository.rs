//! PostgreSQL adapter for the profile store.
//!
//! Validation history is a plain insert-only table, so a history append is a
//! single `INSERT` with no read-modify-write; concurrent validations for the
//! same user cannot lose entries.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::{payload_error, persistence_error};
use crate::domain::foundation::{DomainError, ReportId, Timestamp, UserId};
use crate::domain::psychometric::PsychometricEvaluation;
use crate::domain::user::UserProfile;
use crate::ports::ProfileStore;

pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn get(&self, user_id: &UserId) -> Result<Option<UserProfile>, DomainError> {
        let row = sqlx::query(
            "SELECT evaluation, updated_at FROM user_profiles WHERE user_id = $1",
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| persistence_error("fetch profile", e))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let evaluation: PsychometricEvaluation =
            serde_json::from_value(row.get("evaluation"))
                .map_err(|e| payload_error("deserialize evaluation", e))?;
        let updated_at: chrono::DateTime<chrono::Utc> = row.get("updated_at");

        let history_rows = sqlx::query(
            "SELECT report_id FROM profile_history WHERE user_id = $1 ORDER BY id ASC",
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| persistence_error("fetch profile history", e))?;

        let history = history_rows
            .iter()
            .map(|row| ReportId::from_uuid(row.get::<Uuid, _>("report_id")))
            .collect();

        Ok(Some(UserProfile::from_parts(
            evaluation,
            history,
            Timestamp::from_datetime(updated_at),
        )))
    }

    async fn put_evaluation(
        &self,
        evaluation: &PsychometricEvaluation,
    ) -> Result<(), DomainError> {
        let payload = serde_json::to_value(evaluation)
            .map_err(|e| payload_error("serialize evaluation", e))?;

        sqlx::query(
            r#"
            INSERT INTO user_profiles (user_id, evaluation, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (user_id)
            DO UPDATE SET evaluation = EXCLUDED.evaluation, updated_at = NOW()
            "#,
        )
        .bind(evaluation.user_id.as_str())
        .bind(payload)
        .execute(&self.pool)
        .await
        .map_err(|e| persistence_error("store evaluation", e))?;

        Ok(())
    }

    async fn append_history(
        &self,
        user_id: &UserId,
        report_id: ReportId,
    ) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO profile_history (user_id, report_id) VALUES ($1, $2)",
        )
        .bind(user_id.as_str())
        .bind(report_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| persistence_error("append history", e))?;

        Ok(())
    }
}
