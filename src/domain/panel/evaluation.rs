//! Per-role evaluation results.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Cluster;
use crate::domain::foundation::DomainError;

/// Score assigned by one role, on the panel's 1.0-5.0 scale.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleScore(f64);

impl RoleScore {
    pub const MIN: f64 = 1.0;
    pub const MAX: f64 = 5.0;

    /// Creates a score, rejecting values outside the panel scale.
    pub fn new(value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() || !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(DomainError::validation(
                "score",
                format!("score must be between {} and {}", Self::MIN, Self::MAX),
            ));
        }
        Ok(Self(value))
    }

    /// Creates a score, clamping out-of-range finite values onto the scale.
    ///
    /// Model output occasionally drifts slightly outside the requested range;
    /// clamping keeps an otherwise well-formed evaluation usable.
    pub fn clamped(value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() {
            return Err(DomainError::validation("score", "score must be a finite number"));
        }
        Ok(Self(value.clamp(Self::MIN, Self::MAX)))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for RoleScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

/// Result of one role's evaluation within a panel run.
///
/// `score: None` records a failed role: the panel keeps the slot so reports
/// can list the gap, and aggregation excludes it from scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleEvaluation {
    pub role: String,
    pub cluster: Cluster,
    pub score: Option<RoleScore>,
    pub rationale: String,
}

impl RoleEvaluation {
    /// Creates a successful evaluation.
    pub fn scored(
        role: impl Into<String>,
        cluster: Cluster,
        score: RoleScore,
        rationale: impl Into<String>,
    ) -> Self {
        Self {
            role: role.into(),
            cluster,
            score: Some(score),
            rationale: rationale.into(),
        }
    }

    /// Records a failed role with the failure note in place of a rationale.
    pub fn failed(role: impl Into<String>, cluster: Cluster, note: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            cluster,
            score: None,
            rationale: note.into(),
        }
    }

    /// Returns true when the role produced a usable score.
    pub fn succeeded(&self) -> bool {
        self.score.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_rejects_out_of_range() {
        assert!(RoleScore::new(0.5).is_err());
        assert!(RoleScore::new(5.1).is_err());
        assert!(RoleScore::new(f64::NAN).is_err());
        assert!(RoleScore::new(3.2).is_ok());
    }

    #[test]
    fn clamped_pulls_values_onto_scale() {
        assert_eq!(RoleScore::clamped(7.0).unwrap().value(), 5.0);
        assert_eq!(RoleScore::clamped(0.0).unwrap().value(), 1.0);
        assert_eq!(RoleScore::clamped(4.4).unwrap().value(), 4.4);
        assert!(RoleScore::clamped(f64::INFINITY).is_err());
    }

    #[test]
    fn failed_evaluation_has_no_score() {
        let eval = RoleEvaluation::failed("Originality", Cluster::CoreIdea, "timed out");
        assert!(!eval.succeeded());
        assert_eq!(eval.rationale, "timed out");
    }

    #[test]
    fn evaluation_round_trips_through_json() {
        let eval = RoleEvaluation::scored(
            "Originality",
            Cluster::CoreIdea,
            RoleScore::new(4.0).unwrap(),
            "Novel approach",
        );
        let json = serde_json::to_string(&eval).unwrap();
        let back: RoleEvaluation = serde_json::from_str(&json).unwrap();
        assert_eq!(eval, back);
    }
}
