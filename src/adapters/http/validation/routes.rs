//! HTTP routes for validation endpoints.

use axum::{routing::post, Router};

use super::handlers::{validate_idea, validate_pitch_deck, ValidationHandlers};

/// Creates the validation router.
pub fn routes(handlers: ValidationHandlers) -> Router {
    Router::new()
        .route("/idea", post(validate_idea))
        .route("/pitch-deck", post(validate_pitch_deck))
        .with_state(handlers)
}
