//! DTOs for psychometric endpoints.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::psychometric::{PsychometricEvaluation, PsychometricQuestionSet};

/// POST /api/psychometric/generate request body.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub count: usize,
}

/// One answer option presented to the client.
///
/// Option scores are withheld; the client only needs ids and text.
#[derive(Debug, Serialize)]
pub struct OptionDto {
    pub id: String,
    pub text: String,
}

/// One question presented to the client.
#[derive(Debug, Serialize)]
pub struct QuestionDto {
    pub id: String,
    pub dimension: String,
    pub text: String,
    pub options: Vec<OptionDto>,
}

/// Generated question set response.
#[derive(Debug, Serialize)]
pub struct QuestionSetResponse {
    pub assessment_id: String,
    pub total_questions: usize,
    pub questions: Vec<QuestionDto>,
}

impl From<&PsychometricQuestionSet> for QuestionSetResponse {
    fn from(set: &PsychometricQuestionSet) -> Self {
        Self {
            assessment_id: set.id.to_string(),
            total_questions: set.len(),
            questions: set
                .questions
                .iter()
                .map(|q| QuestionDto {
                    id: q.id.clone(),
                    dimension: q.dimension.display_name().to_string(),
                    text: q.text.clone(),
                    options: q
                        .options
                        .iter()
                        .map(|o| OptionDto {
                            id: o.id.clone(),
                            text: o.text.clone(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

/// POST /api/psychometric/evaluate request body.
#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub user_id: String,
    pub assessment_id: String,
    /// Question id -> selected option id.
    pub responses: HashMap<String, String>,
}

/// Evaluation response.
#[derive(Debug, Serialize)]
pub struct EvaluationResponse {
    pub evaluation_id: String,
    pub user_id: String,
    pub assessment_id: String,
    pub dimension_scores: HashMap<String, f64>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub fit_score: f64,
    pub created_at: String,
}

impl From<&PsychometricEvaluation> for EvaluationResponse {
    fn from(evaluation: &PsychometricEvaluation) -> Self {
        Self {
            evaluation_id: evaluation.id.to_string(),
            user_id: evaluation.user_id.to_string(),
            assessment_id: evaluation.assessment_id.to_string(),
            dimension_scores: evaluation
                .dimension_scores
                .iter()
                .map(|(d, s)| (d.display_name().to_string(), *s))
                .collect(),
            strengths: evaluation.strengths.clone(),
            weaknesses: evaluation.weaknesses.clone(),
            fit_score: evaluation.fit_score,
            created_at: evaluation.created_at.as_datetime().to_rfc3339(),
        }
    }
}
