//! GetReport - query handler for fetching one report.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ReportId};
use crate::domain::report::ValidationReport;
use crate::ports::ReportStore;

/// Query to fetch a report by id.
#[derive(Debug, Clone)]
pub struct GetReportQuery {
    pub report_id: String,
}

/// Handler for report fetches.
pub struct GetReportHandler {
    reports: Arc<dyn ReportStore>,
}

impl GetReportHandler {
    pub fn new(reports: Arc<dyn ReportStore>) -> Self {
        Self { reports }
    }

    pub async fn handle(
        &self,
        query: GetReportQuery,
    ) -> Result<Option<ValidationReport>, DomainError> {
        let report_id: ReportId = query
            .report_id
            .parse()
            .map_err(|_| DomainError::validation("report_id", "not a valid report id"))?;
        self.reports.get(report_id).await
    }
}
