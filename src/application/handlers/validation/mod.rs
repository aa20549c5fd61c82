//! Idea and pitch-deck validation handlers.

mod validate_idea;
mod validate_pitch_deck;

pub use validate_idea::{ValidateIdeaCommand, ValidateIdeaHandler};
pub use validate_pitch_deck::{ValidatePitchDeckCommand, ValidatePitchDeckHandler};
