//! PostgreSQL store adapters.
//!
//! Domain payloads are stored as JSONB documents keyed by their ids; the
//! history table is insert-only so appends are atomic at the database level.

mod assessment_repository;
mod profile_repository;
mod report_repository;

pub use assessment_repository::PgAssessmentStore;
pub use profile_repository::PgProfileStore;
pub use report_repository::PgReportStore;

use crate::domain::foundation::DomainError;

/// Maps a sqlx error onto the persistence error code.
fn persistence_error(context: &str, err: sqlx::Error) -> DomainError {
    DomainError::persistence(format!("{}: {}", context, err))
}

/// Maps a payload (de)serialization failure onto the persistence error code.
fn payload_error(context: &str, err: serde_json::Error) -> DomainError {
    DomainError::persistence(format!("{}: {}", context, err))
}
