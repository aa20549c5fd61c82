//! User profile aggregate.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ReportId, Timestamp, UserId};
use crate::domain::psychometric::PsychometricEvaluation;

/// Profile of a user: their latest psychometric evaluation plus the ordered
/// history of validation reports they have run.
///
/// Created on first evaluation. The evaluation may be replaced by a newer
/// one; the history list only ever grows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    user_id: UserId,
    latest_evaluation: PsychometricEvaluation,
    history: Vec<ReportId>,
    updated_at: Timestamp,
}

impl UserProfile {
    /// Creates a profile from a first evaluation.
    pub fn new(evaluation: PsychometricEvaluation) -> Self {
        Self {
            user_id: evaluation.user_id.clone(),
            latest_evaluation: evaluation,
            history: Vec::new(),
            updated_at: Timestamp::now(),
        }
    }

    /// Reconstructs a profile from stored parts.
    pub fn from_parts(
        evaluation: PsychometricEvaluation,
        history: Vec<ReportId>,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            user_id: evaluation.user_id.clone(),
            latest_evaluation: evaluation,
            history,
            updated_at,
        }
    }

    /// Replaces the latest evaluation, keeping history intact.
    pub fn with_evaluation(mut self, evaluation: PsychometricEvaluation) -> Self {
        self.latest_evaluation = evaluation;
        self.updated_at = Timestamp::now();
        self
    }

    /// Appends a report to the validation history.
    pub fn record_validation(&mut self, report_id: ReportId) {
        self.history.push(report_id);
        self.updated_at = Timestamp::now();
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn latest_evaluation(&self) -> &PsychometricEvaluation {
        &self.latest_evaluation
    }

    pub fn history(&self) -> &[ReportId] {
        &self.history
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::AssessmentId;
    use crate::domain::psychometric::{TraitDimension, TraitScores};

    fn evaluation(user: &str) -> PsychometricEvaluation {
        PsychometricEvaluation::new(
            UserId::new(user).unwrap(),
            AssessmentId::new(),
            TraitScores {
                dimension_scores: TraitDimension::ALL.iter().map(|d| (*d, 6.0)).collect(),
                strengths: vec!["Persistence & Grit".into()],
                weaknesses: vec![],
                fit_score: 60.0,
            },
        )
    }

    #[test]
    fn new_profile_has_empty_history() {
        let profile = UserProfile::new(evaluation("founder-1"));
        assert!(profile.history().is_empty());
        assert_eq!(profile.user_id().as_str(), "founder-1");
    }

    #[test]
    fn history_preserves_order() {
        let mut profile = UserProfile::new(evaluation("founder-1"));
        let first = ReportId::new();
        let second = ReportId::new();
        profile.record_validation(first);
        profile.record_validation(second);
        assert_eq!(profile.history(), &[first, second]);
    }

    #[test]
    fn replacing_evaluation_keeps_history() {
        let mut profile = UserProfile::new(evaluation("founder-1"));
        let report = ReportId::new();
        profile.record_validation(report);

        let updated = profile.with_evaluation(evaluation("founder-1"));
        assert_eq!(updated.history(), &[report]);
    }
}
