//! PDF renderer for validation reports.
//!
//! Paginated A4 text layout: a cursor walks down the page and rolls over to
//! a fresh page when the bottom margin is reached. Reports with failed roles
//! or without a personalization block render the same way, minus those
//! sections.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::report::ValidationReport;
use crate::ports::ReportRenderer;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const LINE_HEIGHT_MM: f32 = 6.0;
const HEADING_SIZE: f32 = 14.0;
const BODY_SIZE: f32 = 10.0;
const WRAP_COLUMNS: usize = 95;

pub struct PdfReportRenderer;

impl PdfReportRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PdfReportRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportRenderer for PdfReportRenderer {
    fn render(&self, report: &ValidationReport) -> Result<Vec<u8>, DomainError> {
        let mut writer = PageWriter::new(&format!(
            "Validation Report - {}",
            report.idea.title().as_str()
        ))?;

        writer.heading(&format!("Validation Report: {}", report.idea.title().as_str()));
        writer.line(&format!("Report ID: {}", report.id));
        writer.line(&format!("Submitted by: {}", report.user_id));
        if let Some(source) = report.idea.source_document() {
            writer.line(&format!("Source document: {}", source));
        }
        writer.line(&format!(
            "Created: {}",
            report.created_at.as_datetime().format("%Y-%m-%d %H:%M UTC")
        ));
        writer.blank();

        writer.heading("Idea");
        writer.paragraph(report.idea.concept().as_str());
        writer.blank();

        writer.heading(&format!(
            "Overall: {:.1}/100 ({})",
            report.overall_score,
            report.outcome.label()
        ));
        for (cluster, score) in &report.cluster_scores {
            match score {
                Some(score) => writer.line(&format!("{}: {:.1}/5.0", cluster.name(), score)),
                None => writer.line(&format!("{}: unavailable", cluster.name())),
            }
        }
        writer.blank();

        writer.list_section("Strengths", &report.strengths);
        writer.list_section("Weaknesses", &report.weaknesses);
        writer.list_section("Recommendations", &report.recommendations);
        writer.list_section("Next Steps", &report.next_steps);

        if !report.failed_roles.is_empty() {
            writer.heading("Unscored Perspectives");
            writer.paragraph(&format!(
                "The following perspectives could not be scored and are excluded \
                 from all subtotals: {}.",
                report.failed_roles.join(", ")
            ));
            writer.blank();
        }

        if let Some(block) = &report.personalization {
            writer.heading("Founder Fit");
            writer.line(&format!("Fit score: {:.0}/100", block.fit_score));
            if !block.top_strengths.is_empty() {
                writer.line(&format!("Strengths: {}", block.top_strengths.join(", ")));
            }
            if !block.top_weaknesses.is_empty() {
                writer.line(&format!("Weaknesses: {}", block.top_weaknesses.join(", ")));
            }
            writer.blank();
        }

        writer.heading("Panel Detail");
        for evaluation in &report.evaluations {
            match evaluation.score {
                Some(score) => {
                    writer.line(&format!(
                        "{} [{}] - {:.1}/5.0",
                        evaluation.role,
                        evaluation.cluster.name(),
                        score.value()
                    ));
                    writer.paragraph(&evaluation.rationale);
                }
                None => {
                    writer.line(&format!(
                        "{} [{}] - unscored ({})",
                        evaluation.role,
                        evaluation.cluster.name(),
                        evaluation.rationale
                    ));
                }
            }
        }

        writer.finish()
    }
}

/// Cursor-based page writer over a printpdf document.
struct PageWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    font: IndirectFontRef,
    bold: IndirectFontRef,
    y: f32,
}

impl PageWriter {
    fn new(title: &str) -> Result<Self, DomainError> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(render_error)?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(render_error)?;
        let layer = doc.get_page(page).get_layer(layer);
        Ok(Self {
            doc,
            layer,
            font,
            bold,
            y: PAGE_HEIGHT_MM - MARGIN_MM,
        })
    }

    fn advance(&mut self, height: f32) {
        if self.y - height < MARGIN_MM {
            let (page, layer) =
                self.doc
                    .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT_MM - MARGIN_MM;
        }
        self.y -= height;
    }

    fn heading(&mut self, text: &str) {
        self.advance(LINE_HEIGHT_MM * 1.5);
        self.layer
            .use_text(text, HEADING_SIZE, Mm(MARGIN_MM), Mm(self.y), &self.bold);
    }

    fn line(&mut self, text: &str) {
        for wrapped in wrap(text, WRAP_COLUMNS) {
            self.advance(LINE_HEIGHT_MM);
            self.layer
                .use_text(wrapped, BODY_SIZE, Mm(MARGIN_MM), Mm(self.y), &self.font);
        }
    }

    fn paragraph(&mut self, text: &str) {
        for line in text.lines() {
            if line.trim().is_empty() {
                self.blank();
            } else {
                self.line(line);
            }
        }
    }

    fn list_section(&mut self, title: &str, items: &[String]) {
        if items.is_empty() {
            return;
        }
        self.heading(title);
        for item in items {
            self.line(&format!("- {}", item));
        }
        self.blank();
    }

    fn blank(&mut self) {
        self.advance(LINE_HEIGHT_MM / 2.0);
    }

    fn finish(self) -> Result<Vec<u8>, DomainError> {
        self.doc.save_to_bytes().map_err(render_error)
    }
}

fn render_error(err: printpdf::Error) -> DomainError {
    DomainError::new(ErrorCode::Internal, format!("PDF rendering failed: {}", err))
}

/// Greedy word wrap at `columns` characters.
fn wrap(text: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > columns {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
