//! Report query and download handlers.

mod download_report;
mod get_report;
mod list_reports;

pub use download_report::{DownloadReportHandler, DownloadReportQuery};
pub use get_report::{GetReportHandler, GetReportQuery};
pub use list_reports::{ListReportsHandler, ListReportsQuery};
