//! HTTP routes for psychometric endpoints.

use axum::{routing::post, Router};

use super::handlers::{evaluate_assessment, generate_assessment, PsychometricHandlers};

/// Creates the psychometric router.
pub fn routes(handlers: PsychometricHandlers) -> Router {
    Router::new()
        .route("/generate", post(generate_assessment))
        .route("/evaluate", post(evaluate_assessment))
        .with_state(handlers)
}
