//! ValidatePitchDeck - extracts an idea from an uploaded deck, then runs the
//! same validation pipeline as a direct submission.

use std::collections::HashMap;
use std::sync::Arc;

use super::ValidateIdeaHandler;
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::report::ValidationReport;
use crate::ports::DocumentExtractor;

/// Command to validate an uploaded pitch deck.
#[derive(Debug, Clone)]
pub struct ValidatePitchDeckCommand {
    pub user_id: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub weight_overrides: HashMap<String, u32>,
}

/// Handler for pitch-deck validation.
pub struct ValidatePitchDeckHandler {
    extractor: Arc<dyn DocumentExtractor>,
    idea_handler: Arc<ValidateIdeaHandler>,
}

impl ValidatePitchDeckHandler {
    pub fn new(
        extractor: Arc<dyn DocumentExtractor>,
        idea_handler: Arc<ValidateIdeaHandler>,
    ) -> Self {
        Self {
            extractor,
            idea_handler,
        }
    }

    pub async fn handle(
        &self,
        cmd: ValidatePitchDeckCommand,
    ) -> Result<ValidationReport, DomainError> {
        let user_id = UserId::new(cmd.user_id)?;
        let draft = self.extractor.extract(&cmd.file_name, &cmd.bytes).await?;
        let idea = draft.into_idea(cmd.file_name)?;
        self.idea_handler
            .run_validation(user_id, idea, &cmd.weight_overrides)
            .await
    }
}
