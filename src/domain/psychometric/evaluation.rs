//! Psychometric evaluation records.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{TraitDimension, TraitScores};
use crate::domain::foundation::{AssessmentId, EvaluationId, Timestamp, UserId};

/// A scored assessment bound to a user. Write-once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PsychometricEvaluation {
    pub id: EvaluationId,
    pub user_id: UserId,
    pub assessment_id: AssessmentId,
    pub dimension_scores: BTreeMap<TraitDimension, f64>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub fit_score: f64,
    pub created_at: Timestamp,
}

impl PsychometricEvaluation {
    /// Binds trait scores to a user as an immutable evaluation record.
    pub fn new(user_id: UserId, assessment_id: AssessmentId, scores: TraitScores) -> Self {
        Self {
            id: EvaluationId::new(),
            user_id,
            assessment_id,
            dimension_scores: scores.dimension_scores,
            strengths: scores.strengths,
            weaknesses: scores.weaknesses,
            fit_score: scores.fit_score,
            created_at: Timestamp::now(),
        }
    }

    /// Top strengths, strongest first, at most `n`.
    pub fn top_strengths(&self, n: usize) -> &[String] {
        &self.strengths[..self.strengths.len().min(n)]
    }

    /// Top weaknesses, weakest first, at most `n`.
    pub fn top_weaknesses(&self, n: usize) -> &[String] {
        &self.weaknesses[..self.weaknesses.len().min(n)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores() -> TraitScores {
        TraitScores {
            dimension_scores: TraitDimension::ALL.iter().map(|d| (*d, 6.0)).collect(),
            strengths: vec!["Leadership & Vision".into(), "Problem Solving".into()],
            weaknesses: vec!["Communication Skills".into()],
            fit_score: 60.0,
        }
    }

    #[test]
    fn evaluation_captures_scores() {
        let eval = PsychometricEvaluation::new(
            UserId::new("founder-1").unwrap(),
            AssessmentId::new(),
            scores(),
        );
        assert_eq!(eval.fit_score, 60.0);
        assert_eq!(eval.dimension_scores.len(), 10);
    }

    #[test]
    fn top_lists_are_bounded() {
        let eval = PsychometricEvaluation::new(
            UserId::new("founder-1").unwrap(),
            AssessmentId::new(),
            scores(),
        );
        assert_eq!(eval.top_strengths(1), &["Leadership & Vision".to_string()]);
        assert_eq!(eval.top_strengths(5).len(), 2);
        assert_eq!(eval.top_weaknesses(3).len(), 1);
    }
}
