//! Deterministic completion client for tests and offline development.
//!
//! Answers panel prompts with a fixed score, question generation prompts
//! with a well-formed set of the requested size, and extraction prompts with
//! a canned title/concept pair. Roles can be scripted to fail so degraded
//! panels are reproducible.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::ports::{CompletionClient, CompletionError, CompletionRequest};

pub struct MockCompletionClient {
    score: f64,
    failing_roles: Vec<&'static str>,
    calls: AtomicU32,
}

impl MockCompletionClient {
    /// Client that scores every role evaluation with `score`.
    pub fn scoring(score: f64) -> Self {
        Self {
            score,
            failing_roles: Vec::new(),
            calls: AtomicU32::new(0),
        }
    }

    /// Makes the listed roles fail with a transient error on every attempt.
    pub fn with_failing_roles(mut self, roles: Vec<&'static str>) -> Self {
        self.failing_roles = roles;
        self
    }

    /// Number of completions requested so far.
    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    fn question_set_reply(count: usize) -> String {
        let questions: Vec<serde_json::Value> = (0..count)
            .map(|i| {
                serde_json::json!({
                    "text": format!("How do you respond in situation {}?", i + 1),
                    "options": [
                        {"id": "A", "text": "Hold back", "score": 2.0},
                        {"id": "B", "text": "Consult the team", "score": 5.0},
                        {"id": "C", "text": "Take charge", "score": 8.0},
                        {"id": "D", "text": "Reframe the problem", "score": 10.0},
                    ],
                })
            })
            .collect();
        serde_json::json!({ "questions": questions }).to_string()
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        for role in &self.failing_roles {
            if request.prompt.contains(role) {
                return Err(CompletionError::Unavailable {
                    message: format!("scripted failure for {}", role),
                });
            }
        }

        // Question generation prompts announce their slot count up front.
        if let Some(rest) = request.prompt.strip_prefix("Generate exactly ") {
            let count: usize = rest
                .split_whitespace()
                .next()
                .and_then(|n| n.parse().ok())
                .unwrap_or(10);
            return Ok(Self::question_set_reply(count));
        }

        // Pitch-deck condensation prompts ask for a title/concept pair.
        if request.prompt.contains("\"title\"") && request.prompt.contains("\"concept\"") {
            return Ok(
                r#"{"title": "Extracted Idea", "concept": "Concept condensed from the uploaded deck."}"#
                    .to_string(),
            );
        }

        Ok(format!(
            r#"{{"score": {}, "rationale": "Mock evaluation rationale."}}"#,
            self.score
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn panel_prompts_get_fixed_scores() {
        let client = MockCompletionClient::scoring(4.2);
        let reply = client
            .complete(CompletionRequest::new("Evaluate this idea strictly for Originality."))
            .await
            .unwrap();
        assert!(reply.contains("4.2"));
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn failing_roles_return_transient_errors() {
        let client = MockCompletionClient::scoring(4.2).with_failing_roles(vec!["Originality"]);
        let err = client
            .complete(CompletionRequest::new("Evaluate this idea strictly for Originality."))
            .await
            .unwrap_err();
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn generation_prompts_get_matching_question_counts() {
        let client = MockCompletionClient::scoring(3.0);
        let reply = client
            .complete(CompletionRequest::new(
                "Generate exactly 12 situational psychometric questions for startup founders",
            ))
            .await
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&reply).unwrap();
        assert_eq!(parsed["questions"].as_array().unwrap().len(), 12);
    }

    #[tokio::test]
    async fn extraction_prompts_get_title_and_concept() {
        let client = MockCompletionClient::scoring(3.0);
        let reply = client
            .complete(CompletionRequest::new(
                "Condense into JSON {\"title\": \"...\", \"concept\": \"...\"}: deck text",
            ))
            .await
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&reply).unwrap();
        assert_eq!(parsed["title"], "Extracted Idea");
    }
}
