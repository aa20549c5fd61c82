//! DTOs for profile endpoints.

use serde::Serialize;
use std::collections::HashMap;

use crate::domain::user::UserProfile;

/// Profile response.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user_id: String,
    pub fit_score: f64,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub dimension_scores: HashMap<String, f64>,
    /// Validation report ids, oldest first.
    pub validation_history: Vec<String>,
    pub evaluated_at: String,
}

impl From<&UserProfile> for ProfileResponse {
    fn from(profile: &UserProfile) -> Self {
        let evaluation = profile.latest_evaluation();
        Self {
            user_id: profile.user_id().to_string(),
            fit_score: evaluation.fit_score,
            strengths: evaluation.strengths.clone(),
            weaknesses: evaluation.weaknesses.clone(),
            dimension_scores: evaluation
                .dimension_scores
                .iter()
                .map(|(d, s)| (d.display_name().to_string(), *s))
                .collect(),
            validation_history: profile.history().iter().map(|id| id.to_string()).collect(),
            evaluated_at: evaluation.created_at.as_datetime().to_rfc3339(),
        }
    }
}
