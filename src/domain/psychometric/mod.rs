//! Psychometric assessment - trait dimensions, question sets, and pure
//! response scoring.

mod dimensions;
mod evaluation;
mod question_set;
mod scoring;

pub use dimensions::TraitDimension;
pub use evaluation::PsychometricEvaluation;
pub use question_set::{
    plan_dimensions, AnswerOption, PsychometricQuestionSet, Question, MAX_QUESTIONS, MIN_QUESTIONS,
};
pub use scoring::{score_responses, TraitScores};
