//! Shared HTTP error envelope and status mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::collections::HashMap;

use crate::domain::foundation::{DomainError, ErrorCode};

/// JSON error body returned by every endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, String>>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("INPUT_VALIDATION", message)
    }
}

impl From<&DomainError> for ErrorResponse {
    fn from(err: &DomainError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.message().to_string(),
            details: (!err.details().is_empty()).then(|| err.details().clone()),
        }
    }
}

/// Maps a domain error onto an HTTP response.
pub fn domain_error_response(err: DomainError) -> Response {
    let status = match err.code() {
        ErrorCode::InputValidation => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::DocumentExtraction => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::BackendTransient => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::BackendPermanent | ErrorCode::InsufficientPanel => StatusCode::BAD_GATEWAY,
        ErrorCode::Persistence | ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ErrorResponse::from(&err))).into_response()
}
