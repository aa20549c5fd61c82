//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;

/// Error codes for every failure class the engine distinguishes.
///
/// Role-level failures inside a panel run are not errors; they degrade the
/// report instead (gap-flagged, cluster possibly unavailable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Malformed or missing request fields. Never retried.
    InputValidation,
    /// Uploaded document could not be read or yielded no text.
    DocumentExtraction,
    /// Model backend failed transiently and the retry budget is exhausted.
    BackendTransient,
    /// Model backend rejected the request permanently.
    BackendPermanent,
    /// Storage failure; surfaced, never silently dropped.
    Persistence,
    /// Too few successful role evaluations to compute an overall score.
    InsufficientPanel,
    /// Requested entity does not exist.
    NotFound,
    /// Unclassified internal failure.
    Internal,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::InputValidation => "INPUT_VALIDATION",
            ErrorCode::DocumentExtraction => "DOCUMENT_EXTRACTION",
            ErrorCode::BackendTransient => "BACKEND_TRANSIENT",
            ErrorCode::BackendPermanent => "BACKEND_PERMANENT",
            ErrorCode::Persistence => "PERSISTENCE",
            ErrorCode::InsufficientPanel => "INSUFFICIENT_PANEL",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::Internal => "INTERNAL",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    code: ErrorCode,
    message: String,
    details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates an input validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InputValidation, message).with_detail("field", field)
    }

    /// Creates a not-found error for an entity.
    pub fn not_found(entity: &str, id: impl fmt::Display) -> Self {
        Self::new(ErrorCode::NotFound, format!("{} not found", entity))
            .with_detail("id", id.to_string())
    }

    /// Creates a persistence error.
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Persistence, message)
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Returns the error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the error details.
    pub fn details(&self) -> &HashMap<String, String> {
        &self.details
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}
