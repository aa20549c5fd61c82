//! PostgreSQL adapter for the report store.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use super::{payload_error, persistence_error};
use crate::domain::foundation::{DomainError, ReportId, UserId};
use crate::domain::report::ValidationReport;
use crate::ports::ReportStore;

pub struct PgReportStore {
    pool: PgPool,
}

impl PgReportStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn from_row(row: &sqlx::postgres::PgRow) -> Result<ValidationReport, DomainError> {
        let payload: serde_json::Value = row.get("payload");
        serde_json::from_value(payload).map_err(|e| payload_error("deserialize report", e))
    }
}

#[async_trait]
impl ReportStore for PgReportStore {
    async fn insert(&self, report: &ValidationReport) -> Result<(), DomainError> {
        let payload =
            serde_json::to_value(report).map_err(|e| payload_error("serialize report", e))?;

        let result = sqlx::query(
            r#"
            INSERT INTO validation_reports (id, user_id, payload, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(report.id.as_uuid())
        .bind(report.user_id.as_str())
        .bind(payload)
        .bind(report.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| persistence_error("insert report", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::persistence(format!(
                "report {} already exists",
                report.id
            )));
        }
        Ok(())
    }

    async fn get(&self, id: ReportId) -> Result<Option<ValidationReport>, DomainError> {
        let row = sqlx::query("SELECT payload FROM validation_reports WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| persistence_error("fetch report", e))?;

        row.as_ref().map(Self::from_row).transpose()
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<ValidationReport>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT payload FROM validation_reports
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id.as_str())
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| persistence_error("list reports", e))?;

        rows.iter().map(Self::from_row).collect()
    }
}
