//! HTTP routes for report endpoints.

use axum::{routing::get, Router};

use super::handlers::{download_report, get_report, list_reports, ReportHandlers};

/// Creates the report router (mounted at the API root).
pub fn routes(handlers: ReportHandlers) -> Router {
    Router::new()
        .route("/api/reports/:user_id", get(list_reports))
        .route("/api/report/:report_id", get(get_report))
        .route("/api/report/:report_id/pdf", get(download_report))
        .with_state(handlers)
}
