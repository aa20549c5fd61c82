//! Panel runner - fans one idea out to every roster role and joins the
//! results.
//!
//! Roles are independent: each gets its own completion call with no
//! inter-role memory, issued through a bounded worker pool. The runner is a
//! barrier: it returns only once every role has succeeded, failed, or timed
//! out. A failed role is recorded with a null score; only a permanent
//! backend error aborts the run as a whole.

use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{info, warn};

use crate::config::PanelConfig;
use crate::domain::foundation::DomainError;
use crate::domain::idea::IdeaInput;
use crate::domain::panel::{roster, RoleEvaluation, RoleScore, RoleSpec};
use crate::ports::{CompletionClient, CompletionError, CompletionRequest};

/// Maximum tokens requested per role evaluation.
const ROLE_MAX_TOKENS: u32 = 512;

/// Runs the full evaluation panel for one idea.
pub struct PanelRunner {
    completions: Arc<dyn CompletionClient>,
    config: PanelConfig,
}

impl PanelRunner {
    pub fn new(completions: Arc<dyn CompletionClient>, config: PanelConfig) -> Self {
        Self { completions, config }
    }

    /// Evaluates the idea with every configured role.
    ///
    /// Returns the complete evaluation list in roster order, with failed
    /// roles recorded as gaps. Errors only on a permanent backend failure.
    pub async fn run(
        &self,
        idea: &IdeaInput,
        personalization: Option<&str>,
    ) -> Result<Vec<RoleEvaluation>, DomainError> {
        info!(
            idea = idea.title().as_str(),
            roles = roster().len(),
            personalized = personalization.is_some(),
            "starting panel run"
        );

        let jobs: Vec<(usize, RoleSpec, String)> = roster()
            .iter()
            .enumerate()
            .map(|(idx, spec)| (idx, *spec, spec.render_prompt(idea, personalization)))
            .collect();

        let mut results: Vec<(usize, Result<RoleEvaluation, DomainError>)> =
            stream::iter(jobs.into_iter().map(|(idx, spec, prompt)| async move {
                (idx, self.evaluate_role(&spec, prompt).await)
            }))
            .buffer_unordered(self.config.concurrency)
            .collect()
            .await;

        // The pool completes out of order; reports list roles in roster order.
        results.sort_by_key(|(idx, _)| *idx);

        let mut evaluations = Vec::with_capacity(results.len());
        for (_, result) in results {
            evaluations.push(result?);
        }

        let failed = evaluations.iter().filter(|e| !e.succeeded()).count();
        info!(
            succeeded = evaluations.len() - failed,
            failed, "panel run complete"
        );
        Ok(evaluations)
    }

    /// Evaluates one role, absorbing transient failures into a null-score
    /// result.
    ///
    /// Transient errors and timeouts consume the retry budget; malformed
    /// model output is retried exactly once. A permanent backend error is
    /// returned as an error and aborts the whole panel.
    async fn evaluate_role(
        &self,
        spec: &RoleSpec,
        prompt: String,
    ) -> Result<RoleEvaluation, DomainError> {
        let request = CompletionRequest::new(prompt).with_max_tokens(ROLE_MAX_TOKENS);
        let mut transient_budget = self.config.max_transient_retries;
        let mut malformed_budget = 1u32;

        loop {
            let outcome = match timeout(
                self.config.role_timeout(),
                self.completions.complete(request.clone()),
            )
            .await
            {
                Ok(result) => result,
                Err(_) => Err(CompletionError::Timeout {
                    timeout_secs: self.config.role_timeout_secs as u32,
                }),
            };

            match outcome {
                Ok(text) => match parse_role_reply(&text) {
                    Ok((score, rationale)) => {
                        return Ok(RoleEvaluation::scored(
                            spec.role,
                            spec.cluster,
                            score,
                            rationale,
                        ));
                    }
                    Err(reason) if malformed_budget > 0 => {
                        malformed_budget -= 1;
                        warn!(role = spec.role, %reason, "malformed role output, retrying");
                    }
                    Err(reason) => {
                        warn!(role = spec.role, %reason, "role failed on malformed output");
                        return Ok(RoleEvaluation::failed(
                            spec.role,
                            spec.cluster,
                            format!("malformed model output: {}", reason),
                        ));
                    }
                },
                Err(err) if err.is_transient() => {
                    if transient_budget > 0 {
                        transient_budget -= 1;
                        warn!(role = spec.role, error = %err, "transient backend failure, retrying");
                    } else {
                        warn!(role = spec.role, error = %err, "role failed after retries");
                        return Ok(RoleEvaluation::failed(
                            spec.role,
                            spec.cluster,
                            format!("backend failure: {}", err),
                        ));
                    }
                }
                Err(err) => {
                    warn!(role = spec.role, error = %err, "permanent backend failure");
                    return Err(err.into());
                }
            }
        }
    }
}

/// Parses one role's `{"score": .., "rationale": ".."}` reply.
fn parse_role_reply(text: &str) -> Result<(RoleScore, String), String> {
    #[derive(serde::Deserialize)]
    struct RoleReply {
        score: f64,
        rationale: String,
    }

    let body = strip_code_fences(text);
    let reply: RoleReply =
        serde_json::from_str(body).map_err(|e| format!("invalid JSON: {}", e))?;
    let score = RoleScore::clamped(reply.score).map_err(|e| e.message().to_string())?;
    Ok((score, reply.rationale))
}

/// Removes a surrounding markdown code fence, if present.
///
/// Models sometimes wrap the requested JSON in ```json fences despite
/// instructions not to.
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    let inner = inner.strip_suffix("```").unwrap_or(inner);
    inner.trim()
}
