//! Document adapters.

mod pitch_deck_extractor;

pub use pitch_deck_extractor::PitchDeckExtractor;
