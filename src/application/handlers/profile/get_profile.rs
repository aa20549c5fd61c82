//! GetProfile - query handler for fetching a user's profile.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::UserProfile;
use crate::ports::ProfileStore;

/// Query to fetch a user's profile.
#[derive(Debug, Clone)]
pub struct GetProfileQuery {
    pub user_id: String,
}

/// Handler for profile fetches.
pub struct GetProfileHandler {
    profiles: Arc<dyn ProfileStore>,
}

impl GetProfileHandler {
    pub fn new(profiles: Arc<dyn ProfileStore>) -> Self {
        Self { profiles }
    }

    pub async fn handle(&self, query: GetProfileQuery) -> Result<Option<UserProfile>, DomainError> {
        let user_id = UserId::new(query.user_id)?;
        self.profiles.get(&user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryProfileStore;
    use crate::domain::foundation::AssessmentId;
    use crate::domain::psychometric::{PsychometricEvaluation, TraitDimension, TraitScores};

    #[tokio::test]
    async fn missing_profile_is_none() {
        let handler = GetProfileHandler::new(Arc::new(InMemoryProfileStore::new()));
        let result = handler
            .handle(GetProfileQuery { user_id: "founder-1".to_string() })
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn stored_profile_is_returned() {
        let profiles = Arc::new(InMemoryProfileStore::new());
        let evaluation = PsychometricEvaluation::new(
            UserId::new("founder-1").unwrap(),
            AssessmentId::new(),
            TraitScores {
                dimension_scores: TraitDimension::ALL.iter().map(|d| (*d, 5.0)).collect(),
                strengths: vec![],
                weaknesses: vec![],
                fit_score: 50.0,
            },
        );
        profiles.put_evaluation(&evaluation).await.unwrap();

        let handler = GetProfileHandler::new(profiles);
        let profile = handler
            .handle(GetProfileQuery { user_id: "founder-1".to_string() })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(profile.latest_evaluation().id, evaluation.id);
    }

    #[tokio::test]
    async fn empty_user_id_rejected() {
        let handler = GetProfileHandler::new(Arc::new(InMemoryProfileStore::new()));
        assert!(handler
            .handle(GetProfileQuery { user_id: "".to_string() })
            .await
            .is_err());
    }
}
