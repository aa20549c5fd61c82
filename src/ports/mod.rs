//! Ports - interfaces to every boundary collaborator.
//!
//! Adapters implement these traits; the application layer depends only on
//! the traits so every collaborator can be swapped for a test double.

mod assessment_store;
mod completion;
mod document_extractor;
mod profile_store;
mod report_renderer;
mod report_store;

pub use assessment_store::AssessmentStore;
pub use completion::{CompletionClient, CompletionError, CompletionRequest};
pub use document_extractor::DocumentExtractor;
pub use profile_store::ProfileStore;
pub use report_renderer::ReportRenderer;
pub use report_store::ReportStore;
