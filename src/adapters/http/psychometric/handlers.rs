//! HTTP handlers for psychometric endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::domain_error_response;
use crate::application::handlers::psychometric::{
    EvaluateAssessmentCommand, EvaluateAssessmentHandler, GenerateAssessmentCommand,
    GenerateAssessmentHandler,
};

use super::dto::{EvaluateRequest, EvaluationResponse, GenerateRequest, QuestionSetResponse};

#[derive(Clone)]
pub struct PsychometricHandlers {
    generate: Arc<GenerateAssessmentHandler>,
    evaluate: Arc<EvaluateAssessmentHandler>,
}

impl PsychometricHandlers {
    pub fn new(
        generate: Arc<GenerateAssessmentHandler>,
        evaluate: Arc<EvaluateAssessmentHandler>,
    ) -> Self {
        Self { generate, evaluate }
    }
}

/// POST /api/psychometric/generate - generate a question set.
pub async fn generate_assessment(
    State(handlers): State<PsychometricHandlers>,
    Json(req): Json<GenerateRequest>,
) -> Response {
    let cmd = GenerateAssessmentCommand { count: req.count };

    match handlers.generate.handle(cmd).await {
        Ok(set) => {
            (StatusCode::CREATED, Json(QuestionSetResponse::from(&set))).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

/// POST /api/psychometric/evaluate - score a completed assessment.
pub async fn evaluate_assessment(
    State(handlers): State<PsychometricHandlers>,
    Json(req): Json<EvaluateRequest>,
) -> Response {
    let cmd = EvaluateAssessmentCommand {
        user_id: req.user_id,
        assessment_id: req.assessment_id,
        responses: req.responses,
    };

    match handlers.evaluate.handle(cmd).await {
        Ok(evaluation) => {
            (StatusCode::OK, Json(EvaluationResponse::from(&evaluation))).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}
