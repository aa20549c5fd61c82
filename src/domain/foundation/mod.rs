//! Foundation types shared across the domain layer.

mod errors;
mod ids;
mod timestamp;

pub use errors::{DomainError, ErrorCode};
pub use ids::{AssessmentId, EvaluationId, ReportId, UserId};
pub use timestamp::Timestamp;
