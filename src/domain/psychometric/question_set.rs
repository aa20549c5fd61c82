//! Psychometric question sets.

use serde::{Deserialize, Serialize};

use super::TraitDimension;
use crate::domain::foundation::{AssessmentId, DomainError};

/// Minimum questions per generated set.
pub const MIN_QUESTIONS: usize = 10;
/// Maximum questions per generated set.
pub const MAX_QUESTIONS: usize = 20;

const MIN_OPTIONS: usize = 2;
const MAX_OPTIONS: usize = 6;
const MAX_OPTION_SCORE: f64 = 10.0;

/// One selectable answer to a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerOption {
    /// Short option identifier ("A".."F").
    pub id: String,
    pub text: String,
    /// Contribution to the question's dimension, 0-10.
    pub score: f64,
}

/// One question, tagged with the dimension it assesses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Locally assigned identifier ("q1".."qN").
    pub id: String,
    pub dimension: TraitDimension,
    pub text: String,
    pub options: Vec<AnswerOption>,
}

impl Question {
    /// Finds an option by identifier.
    pub fn option(&self, option_id: &str) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.id == option_id)
    }
}

/// An immutable generated question set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PsychometricQuestionSet {
    pub id: AssessmentId,
    pub questions: Vec<Question>,
}

impl PsychometricQuestionSet {
    /// Validates and constructs a question set.
    ///
    /// Enforces the structural invariants the rest of the engine relies on:
    /// question count within bounds, locally unique question ids, every
    /// dimension covered, and well-formed options.
    pub fn new(id: AssessmentId, questions: Vec<Question>) -> Result<Self, DomainError> {
        if !(MIN_QUESTIONS..=MAX_QUESTIONS).contains(&questions.len()) {
            return Err(DomainError::validation(
                "questions",
                format!(
                    "question count must be between {} and {}",
                    MIN_QUESTIONS, MAX_QUESTIONS
                ),
            ));
        }

        let mut ids: Vec<&str> = questions.iter().map(|q| q.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        if ids.len() != questions.len() {
            return Err(DomainError::validation("questions", "duplicate question id"));
        }

        for dimension in TraitDimension::ALL {
            if !questions.iter().any(|q| q.dimension == dimension) {
                return Err(DomainError::validation(
                    "questions",
                    format!("dimension '{}' has no questions", dimension),
                ));
            }
        }

        for question in &questions {
            if question.text.trim().is_empty() {
                return Err(DomainError::validation(
                    "questions",
                    format!("question '{}' has empty text", question.id),
                ));
            }
            if !(MIN_OPTIONS..=MAX_OPTIONS).contains(&question.options.len()) {
                return Err(DomainError::validation(
                    "questions",
                    format!(
                        "question '{}' must have between {} and {} options",
                        question.id, MIN_OPTIONS, MAX_OPTIONS
                    ),
                ));
            }
            let mut option_ids: Vec<&str> =
                question.options.iter().map(|o| o.id.as_str()).collect();
            option_ids.sort_unstable();
            option_ids.dedup();
            if option_ids.len() != question.options.len() {
                return Err(DomainError::validation(
                    "questions",
                    format!("question '{}' has duplicate option ids", question.id),
                ));
            }
            for option in &question.options {
                if !option.score.is_finite()
                    || !(0.0..=MAX_OPTION_SCORE).contains(&option.score)
                {
                    return Err(DomainError::validation(
                        "questions",
                        format!(
                            "option '{}' of question '{}' has an invalid score",
                            option.id, question.id
                        ),
                    ));
                }
            }
        }

        Ok(Self { id, questions })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Finds a question by identifier.
    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }
}

/// Plans the dimension for each question slot in a set of `count` questions.
///
/// Dimensions are assigned round-robin in canonical order, so the spread
/// between the most- and least-covered dimension is at most one regardless
/// of what the model later fills into each slot.
pub fn plan_dimensions(count: usize) -> Result<Vec<TraitDimension>, DomainError> {
    if !(MIN_QUESTIONS..=MAX_QUESTIONS).contains(&count) {
        return Err(DomainError::validation(
            "count",
            format!(
                "question count must be between {} and {}",
                MIN_QUESTIONS, MAX_QUESTIONS
            ),
        ));
    }
    Ok((0..count)
        .map(|i| TraitDimension::ALL[i % TraitDimension::ALL.len()])
        .collect())
}
