//! EvaluateAssessment - scores a completed response set and updates the
//! user's profile.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::foundation::{AssessmentId, DomainError, UserId};
use crate::domain::psychometric::{score_responses, PsychometricEvaluation};
use crate::ports::{AssessmentStore, ProfileStore};

/// Command to evaluate a completed assessment.
#[derive(Debug, Clone)]
pub struct EvaluateAssessmentCommand {
    pub user_id: String,
    pub assessment_id: String,
    /// Question id -> selected option id.
    pub responses: HashMap<String, String>,
}

/// Handler for assessment evaluation.
pub struct EvaluateAssessmentHandler {
    assessments: Arc<dyn AssessmentStore>,
    profiles: Arc<dyn ProfileStore>,
}

impl EvaluateAssessmentHandler {
    pub fn new(assessments: Arc<dyn AssessmentStore>, profiles: Arc<dyn ProfileStore>) -> Self {
        Self {
            assessments,
            profiles,
        }
    }

    pub async fn handle(
        &self,
        cmd: EvaluateAssessmentCommand,
    ) -> Result<PsychometricEvaluation, DomainError> {
        let user_id = UserId::new(cmd.user_id)?;
        let assessment_id: AssessmentId = cmd
            .assessment_id
            .parse()
            .map_err(|_| DomainError::validation("assessment_id", "not a valid assessment id"))?;

        let set = self
            .assessments
            .get_question_set(assessment_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Assessment", assessment_id))?;

        let scores = score_responses(&set, &cmd.responses)?;
        let evaluation = PsychometricEvaluation::new(user_id, assessment_id, scores);

        self.assessments.insert_evaluation(&evaluation).await?;
        self.profiles.put_evaluation(&evaluation).await?;

        Ok(evaluation)
    }
}
