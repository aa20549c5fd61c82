//! In-memory profile store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::foundation::{DomainError, ReportId, UserId};
use crate::domain::psychometric::PsychometricEvaluation;
use crate::domain::user::UserProfile;
use crate::ports::ProfileStore;

#[derive(Default)]
pub struct InMemoryProfileStore {
    profiles: Mutex<HashMap<UserId, UserProfile>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn get(&self, user_id: &UserId) -> Result<Option<UserProfile>, DomainError> {
        let profiles = self.profiles.lock().expect("profile store lock poisoned");
        Ok(profiles.get(user_id).cloned())
    }

    async fn put_evaluation(
        &self,
        evaluation: &PsychometricEvaluation,
    ) -> Result<(), DomainError> {
        let mut profiles = self.profiles.lock().expect("profile store lock poisoned");
        let user_id = evaluation.user_id.clone();
        let profile = match profiles.remove(&user_id) {
            Some(existing) => existing.with_evaluation(evaluation.clone()),
            None => UserProfile::new(evaluation.clone()),
        };
        profiles.insert(user_id, profile);
        Ok(())
    }

    async fn append_history(
        &self,
        user_id: &UserId,
        report_id: ReportId,
    ) -> Result<(), DomainError> {
        // Append happens inside one lock acquisition; concurrent appends
        // serialize instead of overwriting each other.
        let mut profiles = self.profiles.lock().expect("profile store lock poisoned");
        let profile = profiles
            .get_mut(user_id)
            .ok_or_else(|| DomainError::not_found("Profile", user_id))?;
        profile.record_validation(report_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::AssessmentId;
    use crate::domain::psychometric::{TraitDimension, TraitScores};
    use std::sync::Arc;

    fn evaluation(user: &str) -> PsychometricEvaluation {
        PsychometricEvaluation::new(
            UserId::new(user).unwrap(),
            AssessmentId::new(),
            TraitScores {
                dimension_scores: TraitDimension::ALL.iter().map(|d| (*d, 6.0)).collect(),
                strengths: vec![],
                weaknesses: vec![],
                fit_score: 60.0,
            },
        )
    }

    #[tokio::test]
    async fn first_evaluation_creates_profile() {
        let store = InMemoryProfileStore::new();
        let user = UserId::new("founder-1").unwrap();
        assert!(store.get(&user).await.unwrap().is_none());

        store.put_evaluation(&evaluation("founder-1")).await.unwrap();
        assert!(store.get(&user).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn newer_evaluation_replaces_latest_but_keeps_history() {
        let store = InMemoryProfileStore::new();
        let user = UserId::new("founder-1").unwrap();
        store.put_evaluation(&evaluation("founder-1")).await.unwrap();
        let report = ReportId::new();
        store.append_history(&user, report).await.unwrap();

        let newer = evaluation("founder-1");
        store.put_evaluation(&newer).await.unwrap();

        let profile = store.get(&user).await.unwrap().unwrap();
        assert_eq!(profile.latest_evaluation().id, newer.id);
        assert_eq!(profile.history(), &[report]);
    }

    #[tokio::test]
    async fn append_without_profile_fails() {
        let store = InMemoryProfileStore::new();
        let user = UserId::new("founder-1").unwrap();
        assert!(store.append_history(&user, ReportId::new()).await.is_err());
    }

    #[tokio::test]
    async fn concurrent_appends_both_land() {
        let store = Arc::new(InMemoryProfileStore::new());
        let user = UserId::new("founder-1").unwrap();
        store.put_evaluation(&evaluation("founder-1")).await.unwrap();

        let a = ReportId::new();
        let b = ReportId::new();
        let (ra, rb) = tokio::join!(
            store.append_history(&user, a),
            store.append_history(&user, b),
        );
        ra.unwrap();
        rb.unwrap();

        let profile = store.get(&user).await.unwrap().unwrap();
        assert_eq!(profile.history().len(), 2);
        assert!(profile.history().contains(&a));
        assert!(profile.history().contains(&b));
    }
}
