//! Personalization layer.
//!
//! Looks up the requesting user's profile before a panel run and condenses
//! the latest psychometric evaluation into a bounded context block. A
//! missing profile or a failing lookup never blocks validation.

use std::sync::Arc;
use tracing::warn;

use crate::domain::foundation::UserId;
use crate::domain::report::PersonalizationBlock;
use crate::ports::ProfileStore;

/// Longest context text injected into role prompts.
const MAX_CONTEXT_CHARS: usize = 600;
const TOP_TRAITS: usize = 3;

pub struct PersonalizationService {
    profiles: Arc<dyn ProfileStore>,
}

impl PersonalizationService {
    pub fn new(profiles: Arc<dyn ProfileStore>) -> Self {
        Self { profiles }
    }

    /// Builds the personalization block for a user, if a profile exists.
    ///
    /// A store failure is logged and treated as an absent profile.
    pub async fn context_for(&self, user_id: &UserId) -> Option<PersonalizationBlock> {
        let profile = match self.profiles.get(user_id).await {
            Ok(profile) => profile?,
            Err(err) => {
                warn!(
                    user = user_id.as_str(),
                    error = %err,
                    "profile lookup failed, validating without personalization"
                );
                return None;
            }
        };

        let evaluation = profile.latest_evaluation();
        let top_strengths: Vec<String> = evaluation.top_strengths(TOP_TRAITS).to_vec();
        let top_weaknesses: Vec<String> = evaluation.top_weaknesses(TOP_TRAITS).to_vec();

        let mut context = String::new();
        if !top_strengths.is_empty() {
            context.push_str(&format!("Founder strengths: {}. ", top_strengths.join(", ")));
        }
        if !top_weaknesses.is_empty() {
            context.push_str(&format!(
                "Founder weaknesses: {}. ",
                top_weaknesses.join(", ")
            ));
        }
        context.push_str(&format!(
            "Entrepreneurial fit score: {:.0}/100. \
             Phrase insights relative to these strengths and weaknesses.",
            evaluation.fit_score
        ));

        Some(PersonalizationBlock {
            evaluation_id: evaluation.id,
            fit_score: evaluation.fit_score,
            top_strengths,
            top_weaknesses,
            context: truncate_chars(context, MAX_CONTEXT_CHARS),
        })
    }
}

/// Truncates to at most `max` characters on a char boundary.
fn truncate_chars(mut s: String, max: usize) -> String {
    if let Some((idx, _)) = s.char_indices().nth(max) {
        s.truncate(idx);
    }
    s
}
