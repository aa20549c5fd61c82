//! Rendering adapters.

mod pdf_renderer;

pub use pdf_renderer::PdfReportRenderer;
