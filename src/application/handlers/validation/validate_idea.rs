//! ValidateIdea - runs the full panel for a directly submitted idea.

use std::collections::HashMap;
use std::sync::Arc;

use crate::application::{PanelRunner, PersonalizationService};
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::idea::{IdeaConcept, IdeaInput, IdeaTitle};
use crate::domain::panel::{aggregate, ClusterWeights};
use crate::domain::report::ValidationReport;
use crate::ports::{ProfileStore, ReportStore};

/// Command to validate a submitted idea.
#[derive(Debug, Clone)]
pub struct ValidateIdeaCommand {
    pub user_id: String,
    pub title: String,
    pub concept: String,
    /// Optional per-request cluster weight overrides, keyed by cluster name.
    pub weight_overrides: HashMap<String, u32>,
}

/// Handler for idea validation.
pub struct ValidateIdeaHandler {
    runner: Arc<PanelRunner>,
    personalization: Arc<PersonalizationService>,
    reports: Arc<dyn ReportStore>,
    profiles: Arc<dyn ProfileStore>,
    /// Deployment-level weight overrides applied under request overrides.
    base_overrides: HashMap<String, u32>,
}

impl ValidateIdeaHandler {
    pub fn new(
        runner: Arc<PanelRunner>,
        personalization: Arc<PersonalizationService>,
        reports: Arc<dyn ReportStore>,
        profiles: Arc<dyn ProfileStore>,
        base_overrides: HashMap<String, u32>,
    ) -> Self {
        Self {
            runner,
            personalization,
            reports,
            profiles,
            base_overrides,
        }
    }

    pub async fn handle(
        &self,
        cmd: ValidateIdeaCommand,
    ) -> Result<ValidationReport, DomainError> {
        let user_id = UserId::new(cmd.user_id)?;
        let idea = IdeaInput::new(IdeaTitle::new(cmd.title)?, IdeaConcept::new(cmd.concept)?);
        self.run_validation(user_id, idea, &cmd.weight_overrides)
            .await
    }

    /// Shared validation pipeline, also used by pitch-deck validation.
    ///
    /// Sequence: weights -> personalization fetch (soft-fail) -> panel run ->
    /// aggregate -> assemble -> persist -> history append (profile users).
    pub(crate) async fn run_validation(
        &self,
        user_id: UserId,
        idea: IdeaInput,
        request_overrides: &HashMap<String, u32>,
    ) -> Result<ValidationReport, DomainError> {
        // Validate weights before spending any model calls.
        let weights = self.weights(request_overrides)?;

        let block = self.personalization.context_for(&user_id).await;
        let had_profile = block.is_some();

        let evaluations = self
            .runner
            .run(&idea, block.as_ref().map(|b| b.context.as_str()))
            .await?;
        let outcome = aggregate(&evaluations, &weights)?;

        let report = ValidationReport::assemble(user_id.clone(), idea, evaluations, outcome, block);
        self.reports.insert(&report).await?;

        // History lives on the profile; users without one have no history yet.
        if had_profile {
            self.profiles.append_history(&user_id, report.id).await?;
        }

        Ok(report)
    }

    fn weights(
        &self,
        request_overrides: &HashMap<String, u32>,
    ) -> Result<ClusterWeights, DomainError> {
        let mut merged = self.base_overrides.clone();
        merged.extend(request_overrides.iter().map(|(k, v)| (k.clone(), *v)));
        ClusterWeights::with_overrides(&merged)
    }
}
