//! GenerateAssessment - generates and stores a new question set.

use std::sync::Arc;

use crate::application::QuestionGenerator;
use crate::domain::foundation::DomainError;
use crate::domain::psychometric::PsychometricQuestionSet;
use crate::ports::AssessmentStore;

/// Command to generate a question set.
#[derive(Debug, Clone)]
pub struct GenerateAssessmentCommand {
    pub count: usize,
}

/// Handler for assessment generation.
pub struct GenerateAssessmentHandler {
    generator: Arc<QuestionGenerator>,
    assessments: Arc<dyn AssessmentStore>,
}

impl GenerateAssessmentHandler {
    pub fn new(generator: Arc<QuestionGenerator>, assessments: Arc<dyn AssessmentStore>) -> Self {
        Self {
            generator,
            assessments,
        }
    }

    pub async fn handle(
        &self,
        cmd: GenerateAssessmentCommand,
    ) -> Result<PsychometricQuestionSet, DomainError> {
        let set = self.generator.generate(cmd.count).await?;
        self.assessments.insert_question_set(&set).await?;
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockCompletionClient;
    use crate::adapters::memory::InMemoryAssessmentStore;
    use crate::domain::foundation::ErrorCode;

    fn handler(store: Arc<InMemoryAssessmentStore>) -> GenerateAssessmentHandler {
        GenerateAssessmentHandler::new(
            Arc::new(QuestionGenerator::new(Arc::new(
                MockCompletionClient::scoring(3.0),
            ))),
            store,
        )
    }

    #[tokio::test]
    async fn generated_set_is_stored() {
        let store = Arc::new(InMemoryAssessmentStore::new());
        let set = handler(store.clone())
            .handle(GenerateAssessmentCommand { count: 15 })
            .await
            .unwrap();

        assert_eq!(set.len(), 15);
        let stored = store.get_question_set(set.id).await.unwrap().unwrap();
        assert_eq!(stored, set);
    }

    #[tokio::test]
    async fn out_of_bounds_count_rejected() {
        let store = Arc::new(InMemoryAssessmentStore::new());
        let err = handler(store)
            .handle(GenerateAssessmentCommand { count: 25 })
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InputValidation);
    }
}
