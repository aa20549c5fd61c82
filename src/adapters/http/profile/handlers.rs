//! HTTP handlers for profile endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{domain_error_response, ErrorResponse};
use crate::application::handlers::profile::{GetProfileHandler, GetProfileQuery};

use super::dto::ProfileResponse;

#[derive(Clone)]
pub struct ProfileHandlers {
    get_profile: Arc<GetProfileHandler>,
}

impl ProfileHandlers {
    pub fn new(get_profile: Arc<GetProfileHandler>) -> Self {
        Self { get_profile }
    }
}

/// GET /api/profile/:user_id - fetch a user's profile.
pub async fn get_profile(
    State(handlers): State<ProfileHandlers>,
    Path(user_id): Path<String>,
) -> Response {
    match handlers
        .get_profile
        .handle(GetProfileQuery { user_id: user_id.clone() })
        .await
    {
        Ok(Some(profile)) => {
            (StatusCode::OK, Json(ProfileResponse::from(&profile))).into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(
                "NOT_FOUND",
                format!("no profile for user '{}'", user_id),
            )),
        )
            .into_response(),
        Err(e) => domain_error_response(e),
    }
}
