//! ListReports - query handler for a user's validation history.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::report::ValidationReport;
use crate::ports::ReportStore;

const DEFAULT_LIMIT: usize = 10;
const MAX_LIMIT: usize = 50;

/// Query to list a user's reports, newest first.
#[derive(Debug, Clone)]
pub struct ListReportsQuery {
    pub user_id: String,
    pub limit: Option<usize>,
}

/// Handler for report listing.
pub struct ListReportsHandler {
    reports: Arc<dyn ReportStore>,
}

impl ListReportsHandler {
    pub fn new(reports: Arc<dyn ReportStore>) -> Self {
        Self { reports }
    }

    pub async fn handle(
        &self,
        query: ListReportsQuery,
    ) -> Result<Vec<ValidationReport>, DomainError> {
        let user_id = UserId::new(query.user_id)?;
        let limit = query.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
        self.reports.list_for_user(&user_id, limit).await
    }
}
