//! Validation reports - the write-once output of a panel run.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::foundation::{EvaluationId, ReportId, Timestamp, UserId};
use super::idea::IdeaInput;
use super::panel::{Cluster, PanelOutcome, RoleEvaluation, ValidationOutcome};

/// Bounded founder-context summary attached to personalized reports.
///
/// Present only when a user profile existed at request time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalizationBlock {
    pub evaluation_id: EvaluationId,
    pub fit_score: f64,
    pub top_strengths: Vec<String>,
    pub top_weaknesses: Vec<String>,
    /// Rendered context text injected into role prompts, at most 600 chars.
    pub context: String,
}

/// Completed validation report. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub id: ReportId,
    pub user_id: UserId,
    pub idea: IdeaInput,
    /// Per-role results in roster order, failed roles included.
    pub evaluations: Vec<RoleEvaluation>,
    pub cluster_scores: BTreeMap<Cluster, Option<f64>>,
    pub overall_score: f64,
    pub outcome: ValidationOutcome,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendations: Vec<String>,
    pub next_steps: Vec<String>,
    pub failed_roles: Vec<String>,
    pub personalization: Option<PersonalizationBlock>,
    pub created_at: Timestamp,
}

impl ValidationReport {
    /// Assembles a report from a finished panel run.
    pub fn assemble(
        user_id: UserId,
        idea: IdeaInput,
        evaluations: Vec<RoleEvaluation>,
        outcome: PanelOutcome,
        personalization: Option<PersonalizationBlock>,
    ) -> Self {
        Self {
            id: ReportId::new(),
            user_id,
            idea,
            evaluations,
            cluster_scores: outcome.cluster_scores,
            overall_score: outcome.overall_score,
            outcome: outcome.outcome,
            strengths: outcome.strengths,
            weaknesses: outcome.weaknesses,
            recommendations: outcome.recommendations,
            next_steps: outcome.next_steps,
            failed_roles: outcome.failed_roles,
            personalization,
            created_at: Timestamp::now(),
        }
    }

    /// Returns true when at least one role failed during the panel run.
    pub fn has_gaps(&self) -> bool {
        !self.failed_roles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::idea::{IdeaConcept, IdeaTitle};
    use crate::domain::panel::{aggregate, roster, ClusterWeights, RoleScore};

    fn idea() -> IdeaInput {
        IdeaInput::new(
            IdeaTitle::new("Solar drones").unwrap(),
            IdeaConcept::new("Parcel delivery with solar-powered drones").unwrap(),
        )
    }

    fn evaluations() -> Vec<RoleEvaluation> {
        roster()
            .iter()
            .map(|spec| {
                RoleEvaluation::scored(
                    spec.role,
                    spec.cluster,
                    RoleScore::new(3.5).unwrap(),
                    "fine",
                )
            })
            .collect()
    }

    #[test]
    fn assemble_copies_outcome_fields() {
        let evals = evaluations();
        let outcome = aggregate(&evals, &ClusterWeights::defaults()).unwrap();
        let report = ValidationReport::assemble(
            UserId::new("founder-1").unwrap(),
            idea(),
            evals,
            outcome.clone(),
            None,
        );

        assert_eq!(report.overall_score, outcome.overall_score);
        assert_eq!(report.cluster_scores, outcome.cluster_scores);
        assert!(report.personalization.is_none());
        assert!(!report.has_gaps());
    }

    #[test]
    fn report_round_trips_through_json() {
        let evals = evaluations();
        let outcome = aggregate(&evals, &ClusterWeights::defaults()).unwrap();
        let report = ValidationReport::assemble(
            UserId::new("founder-1").unwrap(),
            idea(),
            evals,
            outcome,
            None,
        );
        let json = serde_json::to_string(&report).unwrap();
        let back: ValidationReport = serde_json::from_str(&json).unwrap();
        assert_eq!(report, back);
    }
}
