//! HTTP routes for profile endpoints.

use axum::{routing::get, Router};

use super::handlers::{get_profile, ProfileHandlers};

/// Creates the profile router.
pub fn routes(handlers: ProfileHandlers) -> Router {
    Router::new()
        .route("/:user_id", get(get_profile))
        .with_state(handlers)
}
