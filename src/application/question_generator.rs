//! LLM-backed question set generation.
//!
//! The engine plans the dimension for every slot locally (round-robin), so
//! the even-distribution guarantee holds by construction; the model only
//! fills in question text and option scores. Malformed output is retried
//! once before the generation fails.

use std::sync::Arc;
use tracing::warn;

use crate::domain::foundation::{AssessmentId, DomainError};
use crate::domain::psychometric::{
    plan_dimensions, AnswerOption, PsychometricQuestionSet, Question, TraitDimension,
};
use crate::ports::{CompletionClient, CompletionError, CompletionRequest};

const GENERATION_MAX_TOKENS: u32 = 4_000;

pub struct QuestionGenerator {
    completions: Arc<dyn CompletionClient>,
}

impl QuestionGenerator {
    pub fn new(completions: Arc<dyn CompletionClient>) -> Self {
        Self { completions }
    }

    /// Generates a question set with exactly `count` questions.
    pub async fn generate(&self, count: usize) -> Result<PsychometricQuestionSet, DomainError> {
        let plan = plan_dimensions(count)?;
        let request = CompletionRequest::new(generation_prompt(&plan))
            .with_max_tokens(GENERATION_MAX_TOKENS);

        let mut attempts_left = 2u32;
        loop {
            attempts_left -= 1;
            let text = self.completions.complete(request.clone()).await?;
            match build_question_set(&plan, &text) {
                Ok(set) => return Ok(set),
                Err(reason) if attempts_left > 0 => {
                    warn!(%reason, "malformed question generation output, retrying");
                }
                Err(reason) => {
                    return Err(CompletionError::Parse(format!(
                        "question generation output unusable: {}",
                        reason
                    ))
                    .into());
                }
            }
        }
    }
}

fn generation_prompt(plan: &[TraitDimension]) -> String {
    let mut slots = String::new();
    for (i, dimension) in plan.iter().enumerate() {
        slots.push_str(&format!(
            "{}. {} ({})\n",
            i + 1,
            dimension.display_name(),
            dimension.description()
        ));
    }
    format!(
        "Generate exactly {count} situational psychometric questions for startup founders, \
         one per numbered slot below. Each question must assess the named trait.\n\
         \n\
         Slots:\n{slots}\n\
         Each question needs four answer options with ids \"A\" to \"D\". Each option \
         carries a score from 0 (trait absent) to 10 (trait very strong) reflecting how \
         strongly choosing it expresses the slot's trait.\n\
         \n\
         Return ONLY valid JSON, no markdown fences:\n\
         {{\"questions\": [{{\"text\": \"...\", \"options\": \
         [{{\"id\": \"A\", \"text\": \"...\", \"score\": 7.0}}]}}]}}",
        count = plan.len(),
        slots = slots,
    )
}

/// Binds model output to the local plan: ids and dimensions are assigned
/// here, never taken from the model.
fn build_question_set(
    plan: &[TraitDimension],
    text: &str,
) -> Result<PsychometricQuestionSet, String> {
    #[derive(serde::Deserialize)]
    struct GeneratedOption {
        id: String,
        text: String,
        score: f64,
    }

    #[derive(serde::Deserialize)]
    struct GeneratedQuestion {
        text: String,
        options: Vec<GeneratedOption>,
    }

    #[derive(serde::Deserialize)]
    struct GeneratedSet {
        questions: Vec<GeneratedQuestion>,
    }

    let body = strip_code_fences(text);
    let generated: GeneratedSet =
        serde_json::from_str(body).map_err(|e| format!("invalid JSON: {}", e))?;

    if generated.questions.len() != plan.len() {
        return Err(format!(
            "expected {} questions, model returned {}",
            plan.len(),
            generated.questions.len()
        ));
    }

    let questions = plan
        .iter()
        .zip(generated.questions)
        .enumerate()
        .map(|(i, (dimension, q))| Question {
            id: format!("q{}", i + 1),
            dimension: *dimension,
            text: q.text,
            options: q
                .options
                .into_iter()
                .map(|o| AnswerOption {
                    id: o.id,
                    text: o.text,
                    score: o.score,
                })
                .collect(),
        })
        .collect();

    PsychometricQuestionSet::new(AssessmentId::new(), questions)
        .map_err(|e| e.message().to_string())
}

fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    let inner = inner.strip_suffix("```").unwrap_or(inner);
    inner.trim()
}
