//! HTTP handlers for report endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::adapters::http::error::{domain_error_response, ErrorResponse};
use crate::adapters::http::validation::dto::{ReportResponse, ReportSummaryResponse};
use crate::application::handlers::report::{
    DownloadReportHandler, DownloadReportQuery, GetReportHandler, GetReportQuery,
    ListReportsHandler, ListReportsQuery,
};

#[derive(Clone)]
pub struct ReportHandlers {
    list_reports: Arc<ListReportsHandler>,
    get_report: Arc<GetReportHandler>,
    download_report: Arc<DownloadReportHandler>,
}

impl ReportHandlers {
    pub fn new(
        list_reports: Arc<ListReportsHandler>,
        get_report: Arc<GetReportHandler>,
        download_report: Arc<DownloadReportHandler>,
    ) -> Self {
        Self {
            list_reports,
            get_report,
            download_report,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<usize>,
}

/// GET /api/reports/:user_id - list a user's reports, newest first.
pub async fn list_reports(
    State(handlers): State<ReportHandlers>,
    Path(user_id): Path<String>,
    Query(params): Query<ListParams>,
) -> Response {
    match handlers
        .list_reports
        .handle(ListReportsQuery {
            user_id,
            limit: params.limit,
        })
        .await
    {
        Ok(reports) => {
            let summaries: Vec<ReportSummaryResponse> =
                reports.iter().map(ReportSummaryResponse::from).collect();
            (StatusCode::OK, Json(summaries)).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

/// GET /api/report/:report_id - fetch one report.
pub async fn get_report(
    State(handlers): State<ReportHandlers>,
    Path(report_id): Path<String>,
) -> Response {
    match handlers
        .get_report
        .handle(GetReportQuery {
            report_id: report_id.clone(),
        })
        .await
    {
        Ok(Some(report)) => {
            (StatusCode::OK, Json(ReportResponse::from(&report))).into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(
                "NOT_FOUND",
                format!("no report with id '{}'", report_id),
            )),
        )
            .into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// GET /api/report/:report_id/pdf - download one report as PDF.
pub async fn download_report(
    State(handlers): State<ReportHandlers>,
    Path(report_id): Path<String>,
) -> Response {
    match handlers
        .download_report
        .handle(DownloadReportQuery {
            report_id: report_id.clone(),
        })
        .await
    {
        Ok(bytes) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "application/pdf".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"report-{}.pdf\"", report_id),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => domain_error_response(e),
    }
}
