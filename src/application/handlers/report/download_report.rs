//! DownloadReport - renders a stored report into PDF bytes.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ReportId};
use crate::ports::{ReportRenderer, ReportStore};

/// Query to download a report as PDF.
#[derive(Debug, Clone)]
pub struct DownloadReportQuery {
    pub report_id: String,
}

/// Handler for report downloads.
pub struct DownloadReportHandler {
    reports: Arc<dyn ReportStore>,
    renderer: Arc<dyn ReportRenderer>,
}

impl DownloadReportHandler {
    pub fn new(reports: Arc<dyn ReportStore>, renderer: Arc<dyn ReportRenderer>) -> Self {
        Self { reports, renderer }
    }

    pub async fn handle(&self, query: DownloadReportQuery) -> Result<Vec<u8>, DomainError> {
        let report_id: ReportId = query
            .report_id
            .parse()
            .map_err(|_| DomainError::validation("report_id", "not a valid report id"))?;
        let report = self
            .reports
            .get(report_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Report", report_id))?;
        self.renderer.render(&report)
    }
}
