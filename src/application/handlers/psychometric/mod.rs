//! Psychometric assessment handlers.

mod evaluate_assessment;
mod generate_assessment;

pub use evaluate_assessment::{EvaluateAssessmentCommand, EvaluateAssessmentHandler};
pub use generate_assessment::{GenerateAssessmentCommand, GenerateAssessmentHandler};
