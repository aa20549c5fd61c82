//! Document extractor port.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::idea::IdeaDraft;

/// Extracts an idea draft from an uploaded pitch-deck file.
///
/// Unreadable or unsupported documents fail with a `DocumentExtraction`
/// error; the caller treats the result as an opaque idea source.
#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    async fn extract(&self, file_name: &str, bytes: &[u8]) -> Result<IdeaDraft, DomainError>;
}
