//! DTOs for validation endpoints.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::report::ValidationReport;

/// POST /api/validation/idea request body.
#[derive(Debug, Deserialize)]
pub struct ValidateIdeaRequest {
    pub user_id: String,
    pub title: String,
    pub concept: String,
    /// Optional cluster weight overrides, keyed by cluster name.
    #[serde(default)]
    pub weights: HashMap<String, u32>,
}

/// One role evaluation in a report response.
#[derive(Debug, Serialize)]
pub struct RoleEvaluationDto {
    pub role: String,
    pub cluster: String,
    pub score: Option<f64>,
    pub rationale: String,
}

/// One cluster subtotal in a report response.
#[derive(Debug, Serialize)]
pub struct ClusterScoreDto {
    pub cluster: String,
    pub weight: u32,
    /// Absent when the cluster had no successful roles.
    pub score: Option<f64>,
}

/// Personalization block in a report response.
#[derive(Debug, Serialize)]
pub struct PersonalizationDto {
    pub evaluation_id: String,
    pub fit_score: f64,
    pub top_strengths: Vec<String>,
    pub top_weaknesses: Vec<String>,
}

/// Full report response.
#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub report_id: String,
    pub user_id: String,
    pub idea_title: String,
    pub idea_concept: String,
    pub source_document: Option<String>,
    pub overall_score: f64,
    pub outcome: String,
    pub cluster_scores: Vec<ClusterScoreDto>,
    pub evaluations: Vec<RoleEvaluationDto>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendations: Vec<String>,
    pub next_steps: Vec<String>,
    pub failed_roles: Vec<String>,
    pub personalization: Option<PersonalizationDto>,
    pub created_at: String,
}

impl From<&ValidationReport> for ReportResponse {
    fn from(report: &ValidationReport) -> Self {
        Self {
            report_id: report.id.to_string(),
            user_id: report.user_id.to_string(),
            idea_title: report.idea.title().as_str().to_string(),
            idea_concept: report.idea.concept().as_str().to_string(),
            source_document: report.idea.source_document().map(str::to_string),
            overall_score: report.overall_score,
            outcome: report.outcome.label().to_string(),
            cluster_scores: report
                .cluster_scores
                .iter()
                .map(|(cluster, score)| ClusterScoreDto {
                    cluster: cluster.name().to_string(),
                    weight: cluster.default_weight(),
                    score: *score,
                })
                .collect(),
            evaluations: report
                .evaluations
                .iter()
                .map(|e| RoleEvaluationDto {
                    role: e.role.clone(),
                    cluster: e.cluster.name().to_string(),
                    score: e.score.map(|s| s.value()),
                    rationale: e.rationale.clone(),
                })
                .collect(),
            strengths: report.strengths.clone(),
            weaknesses: report.weaknesses.clone(),
            recommendations: report.recommendations.clone(),
            next_steps: report.next_steps.clone(),
            failed_roles: report.failed_roles.clone(),
            personalization: report.personalization.as_ref().map(|p| PersonalizationDto {
                evaluation_id: p.evaluation_id.to_string(),
                fit_score: p.fit_score,
                top_strengths: p.top_strengths.clone(),
                top_weaknesses: p.top_weaknesses.clone(),
            }),
            created_at: report.created_at.as_datetime().to_rfc3339(),
        }
    }
}

/// Report summary used in history listings.
#[derive(Debug, Serialize)]
pub struct ReportSummaryResponse {
    pub report_id: String,
    pub idea_title: String,
    pub overall_score: f64,
    pub outcome: String,
    pub has_gaps: bool,
    pub created_at: String,
}

impl From<&ValidationReport> for ReportSummaryResponse {
    fn from(report: &ValidationReport) -> Self {
        Self {
            report_id: report.id.to_string(),
            idea_title: report.idea.title().as_str().to_string(),
            overall_score: report.overall_score,
            outcome: report.outcome.label().to_string(),
            has_gaps: report.has_gaps(),
            created_at: report.created_at.as_datetime().to_rfc3339(),
        }
    }
}
