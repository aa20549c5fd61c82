//! Completion client port - the single opaque capability for model calls.
//!
//! The whole engine talks to the model backend through one function:
//! prompt in, text out, with a transient/permanent error split. Nothing in
//! the core couples to a provider SDK shape, so the backend can be mocked
//! entirely in tests.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Port for model completions.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Requests one completion and returns the raw text content.
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError>;
}

/// A single completion request.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// User prompt.
    pub prompt: String,
    /// Optional system prompt.
    pub system: Option<String>,
    /// Maximum tokens to generate.
    pub max_tokens: Option<u32>,
    /// Sampling temperature.
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    /// Creates a request with only a prompt.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system: None,
            max_tokens: None,
            temperature: None,
        }
    }

    /// Sets the system prompt.
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Sets the maximum tokens to generate.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    /// Sets the temperature.
    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }
}

/// Completion errors, split by retryability.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CompletionError {
    /// Rate limited by the backend.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    /// Backend is temporarily unavailable.
    #[error("backend unavailable: {message}")]
    Unavailable { message: String },

    /// Network failure during the request.
    #[error("network error: {0}")]
    Network(String),

    /// Request exceeded its timeout.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },

    /// API key or authentication rejected.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Backend rejected the request as malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Could not parse the backend's response envelope.
    #[error("parse error: {0}")]
    Parse(String),
}

impl CompletionError {
    /// Returns true when retrying the same request may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            CompletionError::RateLimited { .. }
                | CompletionError::Unavailable { .. }
                | CompletionError::Network(_)
                | CompletionError::Timeout { .. }
                | CompletionError::Parse(_)
        )
    }
}

impl From<CompletionError> for DomainError {
    fn from(err: CompletionError) -> Self {
        let code = if err.is_transient() {
            ErrorCode::BackendTransient
        } else {
            ErrorCode::BackendPermanent
        };
        DomainError::new(code, err.to_string())
    }
}
