//! Pure aggregation of panel results into cluster subtotals and an overall
//! score.
//!
//! Aggregation is deterministic: the same evaluation set and weights always
//! produce the same output, regardless of the order evaluations arrived in.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::{Cluster, RoleEvaluation};
use crate::domain::foundation::{DomainError, ErrorCode};

/// Cluster weights used for the overall score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterWeights(BTreeMap<Cluster, u32>);

impl ClusterWeights {
    /// The fixed default weights.
    pub fn defaults() -> Self {
        Self(
            Cluster::ALL
                .iter()
                .map(|c| (*c, c.default_weight()))
                .collect(),
        )
    }

    /// Merges caller-supplied overrides (keyed by cluster name) over the
    /// defaults.
    pub fn with_overrides(overrides: &HashMap<String, u32>) -> Result<Self, DomainError> {
        let mut weights = Self::defaults();
        for (name, weight) in overrides {
            let cluster = Cluster::from_name(name).ok_or_else(|| {
                DomainError::validation("weights", format!("unknown cluster '{}'", name))
            })?;
            weights.0.insert(cluster, *weight);
        }
        if weights.0.values().all(|w| *w == 0) {
            return Err(DomainError::validation(
                "weights",
                "at least one cluster weight must be positive",
            ));
        }
        Ok(weights)
    }

    pub fn get(&self, cluster: Cluster) -> u32 {
        self.0.get(&cluster).copied().unwrap_or(0)
    }
}

impl Default for ClusterWeights {
    fn default() -> Self {
        Self::defaults()
    }
}

/// Overall validation outcome band (score on the 0-100 scale).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationOutcome {
    Excellent,
    Good,
    Moderate,
    Weak,
    Poor,
}

impl ValidationOutcome {
    /// Bands an overall score into an outcome.
    pub fn from_score(overall: f64) -> Self {
        if overall >= 90.0 {
            ValidationOutcome::Excellent
        } else if overall >= 70.0 {
            ValidationOutcome::Good
        } else if overall >= 50.0 {
            ValidationOutcome::Moderate
        } else if overall >= 30.0 {
            ValidationOutcome::Weak
        } else {
            ValidationOutcome::Poor
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ValidationOutcome::Excellent => "Excellent",
            ValidationOutcome::Good => "Good",
            ValidationOutcome::Moderate => "Moderate",
            ValidationOutcome::Weak => "Weak",
            ValidationOutcome::Poor => "Poor",
        }
    }
}

/// Aggregated result of one panel run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelOutcome {
    /// Mean role score per cluster on the 1-5 scale; `None` marks a cluster
    /// with no successful roles (reported as unavailable, never divided).
    pub cluster_scores: BTreeMap<Cluster, Option<f64>>,
    /// Weighted overall score on the 0-100 scale.
    pub overall_score: f64,
    pub outcome: ValidationOutcome,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendations: Vec<String>,
    pub next_steps: Vec<String>,
    /// Roles that failed and were excluded from scoring.
    pub failed_roles: Vec<String>,
}

const STRENGTH_CUTOFF: f64 = 4.0;
const WEAKNESS_CUTOFF: f64 = 2.5;

/// Aggregates role evaluations into cluster subtotals and an overall score.
///
/// Failed roles are excluded from scoring and listed as gaps. Returns
/// `InsufficientPanel` when no cluster has a single successful role, since
/// no meaningful overall score exists in that case.
pub fn aggregate(
    evaluations: &[RoleEvaluation],
    weights: &ClusterWeights,
) -> Result<PanelOutcome, DomainError> {
    let mut sums: BTreeMap<Cluster, (f64, u32)> = BTreeMap::new();
    let mut failed_roles = Vec::new();

    for eval in evaluations {
        match eval.score {
            Some(score) => {
                let entry = sums.entry(eval.cluster).or_insert((0.0, 0));
                entry.0 += score.value();
                entry.1 += 1;
            }
            None => failed_roles.push(eval.role.clone()),
        }
    }

    let mut cluster_scores: BTreeMap<Cluster, Option<f64>> = BTreeMap::new();
    for cluster in Cluster::ALL {
        let score = sums
            .get(&cluster)
            .filter(|(_, n)| *n > 0)
            .map(|(sum, n)| sum / f64::from(*n));
        cluster_scores.insert(cluster, score);
    }

    let mut weighted_sum = 0.0;
    let mut weight_total = 0u32;
    for (cluster, score) in &cluster_scores {
        if let Some(score) = score {
            let weight = weights.get(*cluster);
            weighted_sum += score * f64::from(weight);
            weight_total += weight;
        }
    }

    if weight_total == 0 {
        return Err(DomainError::new(
            ErrorCode::InsufficientPanel,
            "no cluster produced a successful evaluation",
        ));
    }

    // 1-5 weighted mean rescaled to 0-100.
    let overall_score = weighted_sum / f64::from(weight_total) * 20.0;
    let outcome = ValidationOutcome::from_score(overall_score);

    let mut strengths = Vec::new();
    let mut weaknesses = Vec::new();
    let mut recommendations = Vec::new();
    for (cluster, score) in &cluster_scores {
        match score {
            Some(s) if *s >= STRENGTH_CUTOFF => {
                strengths.push(format!("{} scores strongly ({:.1}/5.0)", cluster.name(), s));
            }
            Some(s) if *s < WEAKNESS_CUTOFF => {
                weaknesses.push(format!("{} is underdeveloped ({:.1}/5.0)", cluster.name(), s));
                recommendations.push(cluster_recommendation(*cluster).to_string());
            }
            Some(_) => {}
            None => {
                weaknesses.push(format!("{} could not be assessed", cluster.name()));
            }
        }
    }

    let next_steps = next_steps_for(outcome, &weaknesses, &failed_roles);

    Ok(PanelOutcome {
        cluster_scores,
        overall_score,
        outcome,
        strengths,
        weaknesses,
        recommendations,
        next_steps,
        failed_roles,
    })
}

fn cluster_recommendation(cluster: Cluster) -> &'static str {
    match cluster {
        Cluster::CoreIdea => "Sharpen the core value proposition and validate the problem with target customers",
        Cluster::MarketOpportunity => "Size the reachable market segment and test acquisition channels with a landing experiment",
        Cluster::Execution => "De-risk the technical plan with a thin prototype of the hardest component",
        Cluster::BusinessModel => "Model unit economics with realistic pricing and cost assumptions",
        Cluster::Team => "Close the critical skill gaps through hiring, co-founders, or advisors",
        Cluster::Compliance => "Map the regulatory obligations early and budget for compliance work",
        Cluster::RiskStrategy => "Document the top risks with explicit mitigation and fallback plans",
    }
}

fn next_steps_for(
    outcome: ValidationOutcome,
    weaknesses: &[String],
    failed_roles: &[String],
) -> Vec<String> {
    let mut steps = Vec::new();
    match outcome {
        ValidationOutcome::Excellent | ValidationOutcome::Good => {
            steps.push("Move to customer discovery interviews and an MVP scope".to_string());
        }
        ValidationOutcome::Moderate => {
            steps.push("Address the weakest clusters before committing significant resources".to_string());
        }
        ValidationOutcome::Weak | ValidationOutcome::Poor => {
            steps.push("Revisit the fundamentals of the idea before further investment".to_string());
        }
    }
    if !weaknesses.is_empty() {
        steps.push(format!(
            "Prioritize improvements in: {}",
            weaknesses.join("; ")
        ));
    }
    if !failed_roles.is_empty() {
        steps.push(format!(
            "Re-run validation to fill {} unscored perspective(s)",
            failed_roles.len()
        ));
    }
    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::panel::RoleScore;

    fn scored(role: &str, cluster: Cluster, score: f64) -> RoleEvaluation {
        RoleEvaluation::scored(role, cluster, RoleScore::new(score).unwrap(), "rationale")
    }

    fn full_panel(score: f64) -> Vec<RoleEvaluation> {
        crate::domain::panel::roster()
            .iter()
            .map(|spec| scored(spec.role, spec.cluster, score))
            .collect()
    }

    #[test]
    fn uniform_scores_produce_uniform_clusters() {
        let outcome = aggregate(&full_panel(4.0), &ClusterWeights::defaults()).unwrap();
        for (_, score) in &outcome.cluster_scores {
            assert_eq!(*score, Some(4.0));
        }
        assert!((outcome.overall_score - 80.0).abs() < 1e-9);
        assert_eq!(outcome.outcome, ValidationOutcome::Good);
        assert!(outcome.failed_roles.is_empty());
    }

    #[test]
    fn failed_roles_are_excluded_and_listed() {
        let mut evals = full_panel(3.0);
        evals[0] = RoleEvaluation::failed(evals[0].role.clone(), evals[0].cluster, "timed out");
        evals[1] = RoleEvaluation::failed(evals[1].role.clone(), evals[1].cluster, "timed out");

        let outcome = aggregate(&evals, &ClusterWeights::defaults()).unwrap();
        assert_eq!(outcome.failed_roles.len(), 2);
        // Remaining Core Idea roles still average cleanly.
        assert_eq!(outcome.cluster_scores[&Cluster::CoreIdea], Some(3.0));
    }

    #[test]
    fn empty_cluster_is_unavailable_not_divided() {
        let evals: Vec<_> = full_panel(3.5)
            .into_iter()
            .map(|e| {
                if e.cluster == Cluster::Team {
                    RoleEvaluation::failed(e.role, e.cluster, "backend down")
                } else {
                    e
                }
            })
            .collect();

        let outcome = aggregate(&evals, &ClusterWeights::defaults()).unwrap();
        assert_eq!(outcome.cluster_scores[&Cluster::Team], None);
        assert!((outcome.overall_score - 70.0).abs() < 1e-9);
        assert!(outcome
            .weaknesses
            .iter()
            .any(|w| w.contains("could not be assessed")));
    }

    #[test]
    fn all_failed_panel_is_insufficient() {
        let evals: Vec<_> = full_panel(3.0)
            .into_iter()
            .map(|e| RoleEvaluation::failed(e.role, e.cluster, "backend down"))
            .collect();

        let err = aggregate(&evals, &ClusterWeights::defaults()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InsufficientPanel);
    }

    #[test]
    fn weight_overrides_shift_overall() {
        let mut evals = full_panel(3.0);
        // Boost every Market Opportunity role to the maximum.
        for eval in &mut evals {
            if eval.cluster == Cluster::MarketOpportunity {
                eval.score = Some(RoleScore::new(5.0).unwrap());
            }
        }

        let default_outcome = aggregate(&evals, &ClusterWeights::defaults()).unwrap();
        let overrides: HashMap<String, u32> =
            [("Market Opportunity".to_string(), 80u32)].into_iter().collect();
        let heavy = ClusterWeights::with_overrides(&overrides).unwrap();
        let heavy_outcome = aggregate(&evals, &heavy).unwrap();

        assert!(heavy_outcome.overall_score > default_outcome.overall_score);
    }

    #[test]
    fn unknown_override_cluster_rejected() {
        let overrides: HashMap<String, u32> =
            [("Marketing".to_string(), 50u32)].into_iter().collect();
        assert!(ClusterWeights::with_overrides(&overrides).is_err());
    }

    #[test]
    fn all_zero_weights_rejected() {
        let overrides: HashMap<String, u32> = Cluster::ALL
            .iter()
            .map(|c| (c.name().to_string(), 0u32))
            .collect();
        assert!(ClusterWeights::with_overrides(&overrides).is_err());
    }

    #[test]
    fn outcome_bands_match_scale() {
        assert_eq!(ValidationOutcome::from_score(95.0), ValidationOutcome::Excellent);
        assert_eq!(ValidationOutcome::from_score(70.0), ValidationOutcome::Good);
        assert_eq!(ValidationOutcome::from_score(55.0), ValidationOutcome::Moderate);
        assert_eq!(ValidationOutcome::from_score(30.0), ValidationOutcome::Weak);
        assert_eq!(ValidationOutcome::from_score(10.0), ValidationOutcome::Poor);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_evaluations() -> impl Strategy<Value = Vec<RoleEvaluation>> {
            let roster = crate::domain::panel::roster();
            proptest::collection::vec(proptest::option::of(1.0f64..=5.0), roster.len()).prop_map(
                move |scores| {
                    roster
                        .iter()
                        .zip(scores)
                        .map(|(spec, score)| match score {
                            Some(s) => RoleEvaluation::scored(
                                spec.role,
                                spec.cluster,
                                RoleScore::new(s).unwrap(),
                                "r",
                            ),
                            None => RoleEvaluation::failed(spec.role, spec.cluster, "failed"),
                        })
                        .collect()
                },
            )
        }

        proptest! {
            #[test]
            fn aggregation_is_deterministic(evals in arb_evaluations()) {
                let weights = ClusterWeights::defaults();
                let a = aggregate(&evals, &weights);
                let b = aggregate(&evals, &weights);
                match (a, b) {
                    (Ok(a), Ok(b)) => prop_assert_eq!(a, b),
                    (Err(a), Err(b)) => prop_assert_eq!(a.code(), b.code()),
                    _ => prop_assert!(false, "determinism violated"),
                }
            }

            #[test]
            fn overall_score_stays_in_bounds(evals in arb_evaluations()) {
                if let Ok(outcome) = aggregate(&evals, &ClusterWeights::defaults()) {
                    prop_assert!(outcome.overall_score >= 20.0 - 1e-9);
                    prop_assert!(outcome.overall_score <= 100.0 + 1e-9);
                }
            }

            #[test]
            fn aggregation_ignores_evaluation_order(
                evals in arb_evaluations(),
                seed in any::<u64>(),
            ) {
                let weights = ClusterWeights::defaults();
                let mut shuffled = evals.clone();
                // Cheap deterministic shuffle via seeded rotation and swap.
                let n = shuffled.len();
                shuffled.rotate_left((seed as usize) % n);
                shuffled.swap(0, (seed as usize / 7) % n);

                match (aggregate(&evals, &weights), aggregate(&shuffled, &weights)) {
                    (Ok(a), Ok(b)) => {
                        prop_assert_eq!(a.cluster_scores, b.cluster_scores);
                        prop_assert!((a.overall_score - b.overall_score).abs() < 1e-9);
                    }
                    (Err(a), Err(b)) => prop_assert_eq!(a.code(), b.code()),
                    _ => prop_assert!(false, "order sensitivity detected"),
                }
            }
        }
    }
}
