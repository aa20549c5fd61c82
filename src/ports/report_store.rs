//! Report store port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ReportId, UserId};
use crate::domain::report::ValidationReport;

/// Append-only persistence for validation reports.
///
/// Reports are write-once: `insert` must reject a duplicate id with a
/// persistence error rather than overwrite.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Persists a new report. Fails on duplicate id.
    async fn insert(&self, report: &ValidationReport) -> Result<(), DomainError>;

    /// Fetches a report by id.
    async fn get(&self, id: ReportId) -> Result<Option<ValidationReport>, DomainError>;

    /// Lists a user's reports, newest first, up to `limit`.
    async fn list_for_user(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<ValidationReport>, DomainError>;
}
