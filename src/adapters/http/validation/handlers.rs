//! HTTP handlers for validation endpoints.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{domain_error_response, ErrorResponse};
use crate::application::handlers::validation::{
    ValidateIdeaCommand, ValidateIdeaHandler, ValidatePitchDeckCommand, ValidatePitchDeckHandler,
};

use super::dto::{ReportResponse, ValidateIdeaRequest};

#[derive(Clone)]
pub struct ValidationHandlers {
    validate_idea: Arc<ValidateIdeaHandler>,
    validate_pitch_deck: Arc<ValidatePitchDeckHandler>,
}

impl ValidationHandlers {
    pub fn new(
        validate_idea: Arc<ValidateIdeaHandler>,
        validate_pitch_deck: Arc<ValidatePitchDeckHandler>,
    ) -> Self {
        Self {
            validate_idea,
            validate_pitch_deck,
        }
    }
}

/// POST /api/validation/idea - validate a directly submitted idea.
pub async fn validate_idea(
    State(handlers): State<ValidationHandlers>,
    Json(req): Json<ValidateIdeaRequest>,
) -> Response {
    let cmd = ValidateIdeaCommand {
        user_id: req.user_id,
        title: req.title,
        concept: req.concept,
        weight_overrides: req.weights,
    };

    match handlers.validate_idea.handle(cmd).await {
        Ok(report) => {
            (StatusCode::CREATED, Json(ReportResponse::from(&report))).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

/// POST /api/validation/pitch-deck - validate an uploaded pitch deck.
///
/// Multipart fields: `user_id` (text), `file` (the deck), optional
/// `weights` (JSON object of cluster weight overrides).
pub async fn validate_pitch_deck(
    State(handlers): State<ValidationHandlers>,
    multipart: Multipart,
) -> Response {
    let parts = match read_upload(multipart).await {
        Ok(parts) => parts,
        Err(response) => return response,
    };

    let cmd = ValidatePitchDeckCommand {
        user_id: parts.user_id,
        file_name: parts.file_name,
        bytes: parts.bytes,
        weight_overrides: parts.weights,
    };

    match handlers.validate_pitch_deck.handle(cmd).await {
        Ok(report) => {
            (StatusCode::CREATED, Json(ReportResponse::from(&report))).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

struct UploadParts {
    user_id: String,
    file_name: String,
    bytes: Vec<u8>,
    weights: HashMap<String, u32>,
}

async fn read_upload(mut multipart: Multipart) -> Result<UploadParts, Response> {
    let mut user_id = None;
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut weights = HashMap::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return Err(bad_request(format!("malformed multipart body: {}", e)));
            }
        };

        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("user_id") => {
                user_id = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| bad_request(format!("unreadable user_id field: {}", e)))?,
                );
            }
            Some("file") => {
                let file_name = field
                    .file_name()
                    .map(str::to_string)
                    .ok_or_else(|| bad_request("file field is missing a file name"))?;
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| bad_request(format!("unreadable file field: {}", e)))?;
                file = Some((file_name, bytes.to_vec()));
            }
            Some("weights") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| bad_request(format!("unreadable weights field: {}", e)))?;
                weights = serde_json::from_str(&text)
                    .map_err(|e| bad_request(format!("weights is not a JSON object: {}", e)))?;
            }
            _ => {}
        }
    }

    let user_id = user_id.ok_or_else(|| bad_request("missing user_id field"))?;
    let (file_name, bytes) = file.ok_or_else(|| bad_request("missing file field"))?;

    Ok(UploadParts {
        user_id,
        file_name,
        bytes,
        weights,
    })
}

fn bad_request(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::bad_request(message)),
    )
        .into_response()
}
