//! Report renderer port.

use crate::domain::foundation::DomainError;
use crate::domain::report::ValidationReport;

/// Renders a stored report into a downloadable document.
///
/// Rendering is a pure transformation of an already-persisted report; a
/// failure here never affects the stored report.
pub trait ReportRenderer: Send + Sync {
    fn render(&self, report: &ValidationReport) -> Result<Vec<u8>, DomainError>;
}
