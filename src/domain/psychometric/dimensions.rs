//! The ten fixed trait dimensions assessed by the questionnaire.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Trait dimension of the founder assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraitDimension {
    Leadership,
    RiskTolerance,
    Resilience,
    Innovation,
    DecisionMaking,
    EmotionalIntelligence,
    Persistence,
    StrategicThinking,
    Communication,
    ProblemSolving,
}

impl TraitDimension {
    /// All dimensions in canonical order.
    pub const ALL: [TraitDimension; 10] = [
        TraitDimension::Leadership,
        TraitDimension::RiskTolerance,
        TraitDimension::Resilience,
        TraitDimension::Innovation,
        TraitDimension::DecisionMaking,
        TraitDimension::EmotionalIntelligence,
        TraitDimension::Persistence,
        TraitDimension::StrategicThinking,
        TraitDimension::Communication,
        TraitDimension::ProblemSolving,
    ];

    /// Human-readable dimension name.
    pub fn display_name(&self) -> &'static str {
        match self {
            TraitDimension::Leadership => "Leadership & Vision",
            TraitDimension::RiskTolerance => "Risk Tolerance",
            TraitDimension::Resilience => "Resilience & Adaptability",
            TraitDimension::Innovation => "Innovation & Creativity",
            TraitDimension::DecisionMaking => "Decision Making",
            TraitDimension::EmotionalIntelligence => "Emotional Intelligence",
            TraitDimension::Persistence => "Persistence & Grit",
            TraitDimension::StrategicThinking => "Strategic Thinking",
            TraitDimension::Communication => "Communication Skills",
            TraitDimension::ProblemSolving => "Problem Solving",
        }
    }

    /// What the dimension measures; used in generation prompts.
    pub fn description(&self) -> &'static str {
        match self {
            TraitDimension::Leadership => "ability to lead, inspire, and set strategic direction",
            TraitDimension::RiskTolerance => "comfort with uncertainty and calculated risk-taking",
            TraitDimension::Resilience => "ability to recover from setbacks and adapt to change",
            TraitDimension::Innovation => "capacity for creative thinking and novel solutions",
            TraitDimension::DecisionMaking => "quality and speed of judgment under pressure",
            TraitDimension::EmotionalIntelligence => {
                "self-awareness and interpersonal effectiveness"
            }
            TraitDimension::Persistence => "determination to pursue long-term goals",
            TraitDimension::StrategicThinking => {
                "ability to analyze complex situations and plan ahead"
            }
            TraitDimension::Communication => "clarity and effectiveness in conveying ideas",
            TraitDimension::ProblemSolving => "analytical and creative approach to challenges",
        }
    }

    /// Weight of the dimension in the entrepreneurial fit score.
    ///
    /// Weights sum to 1.0 across all dimensions.
    pub fn fit_weight(&self) -> f64 {
        match self {
            TraitDimension::Leadership => 0.12,
            TraitDimension::RiskTolerance => 0.10,
            TraitDimension::Resilience => 0.10,
            TraitDimension::Innovation => 0.10,
            TraitDimension::DecisionMaking => 0.10,
            TraitDimension::EmotionalIntelligence => 0.08,
            TraitDimension::Persistence => 0.10,
            TraitDimension::StrategicThinking => 0.12,
            TraitDimension::Communication => 0.08,
            TraitDimension::ProblemSolving => 0.10,
        }
    }
}

impl fmt::Display for TraitDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_weights_sum_to_one() {
        let total: f64 = TraitDimension::ALL.iter().map(|d| d.fit_weight()).sum();
        assert!((total - 1.0).abs() < 1e-9, "weights sum to {}", total);
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&TraitDimension::RiskTolerance).unwrap();
        assert_eq!(json, "\"risk_tolerance\"");
    }

    #[test]
    fn all_dimensions_have_distinct_names() {
        let mut names: Vec<_> = TraitDimension::ALL.iter().map(|d| d.display_name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), TraitDimension::ALL.len());
    }
}
