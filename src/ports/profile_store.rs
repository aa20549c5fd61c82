//! Profile store port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ReportId, UserId};
use crate::domain::psychometric::PsychometricEvaluation;
use crate::domain::user::UserProfile;

/// Persistence for user profiles.
///
/// `append_history` must be atomic per user: two concurrent validations for
/// the same user must both land in the history list. Implementations may not
/// use read-modify-write on the list.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetches a user's profile.
    async fn get(&self, user_id: &UserId) -> Result<Option<UserProfile>, DomainError>;

    /// Stores an evaluation as the user's latest, creating the profile on
    /// first evaluation.
    async fn put_evaluation(
        &self,
        evaluation: &PsychometricEvaluation,
    ) -> Result<(), DomainError>;

    /// Atomically appends a report to the user's validation history.
    async fn append_history(
        &self,
        user_id: &UserId,
        report_id: ReportId,
    ) -> Result<(), DomainError>;
}
