//! HTTP adapters - REST API implementation.
//!
//! Each resource has its own module with DTOs, handlers, and routes; this
//! module assembles them into the application router.

mod error;
pub mod profile;
pub mod psychometric;
pub mod report;
pub mod validation;

pub use error::ErrorResponse;

use axum::{routing::get, Json, Router};

pub use profile::ProfileHandlers;
pub use psychometric::PsychometricHandlers;
pub use report::ReportHandlers;
pub use validation::ValidationHandlers;

/// Assembles the full application router.
pub fn app_router(
    validation: ValidationHandlers,
    psychometric: PsychometricHandlers,
    profile: ProfileHandlers,
    report: ReportHandlers,
) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/validation", validation::routes(validation))
        .nest("/api/psychometric", psychometric::routes(psychometric))
        .nest("/api/profile", profile::routes(profile))
        .merge(report::routes(report))
}

/// GET /health - liveness probe.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
