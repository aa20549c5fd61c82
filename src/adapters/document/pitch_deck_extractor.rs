//! Pitch-deck extractor.
//!
//! Pulls raw text out of uploaded PDF or PowerPoint decks, then condenses it
//! into a title/concept pair with one completion call. When the model output
//! is malformed twice in a row, a first-line heuristic keeps the upload
//! usable instead of failing it.

use async_trait::async_trait;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::idea::IdeaDraft;
use crate::ports::{CompletionClient, CompletionRequest, DocumentExtractor};

/// Longest slice of deck text sent to the model.
const MAX_DECK_TEXT_CHARS: usize = 12_000;
/// Concept length used by the heuristic fallback.
const FALLBACK_CONCEPT_CHARS: usize = 2_000;
const FALLBACK_TITLE_CHARS: usize = 120;
const CONDENSE_MAX_TOKENS: u32 = 800;

pub struct PitchDeckExtractor {
    completions: Arc<dyn CompletionClient>,
}

impl PitchDeckExtractor {
    pub fn new(completions: Arc<dyn CompletionClient>) -> Self {
        Self { completions }
    }

    async fn condense(&self, raw_text: &str) -> IdeaDraft {
        let excerpt = truncate_chars(raw_text, MAX_DECK_TEXT_CHARS);
        let request = CompletionRequest::new(format!(
            "Extract the startup idea from this pitch deck text. Return ONLY valid JSON, \
             no markdown fences: {{\"title\": \"<idea name>\", \"concept\": \
             \"<two to four sentence summary of the idea>\"}}\n\nDeck text:\n{}",
            excerpt
        ))
        .with_max_tokens(CONDENSE_MAX_TOKENS);

        for _ in 0..2 {
            match self.completions.complete(request.clone()).await {
                Ok(reply) => match parse_draft(&reply) {
                    Ok(draft) => return draft,
                    Err(reason) => {
                        warn!(%reason, "malformed extraction output, retrying");
                    }
                },
                Err(err) => {
                    warn!(error = %err, "extraction completion failed");
                    break;
                }
            }
        }

        warn!("falling back to heuristic idea extraction");
        heuristic_draft(raw_text)
    }
}

#[async_trait]
impl DocumentExtractor for PitchDeckExtractor {
    async fn extract(&self, file_name: &str, bytes: &[u8]) -> Result<IdeaDraft, DomainError> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        let raw_text = match extension.as_deref() {
            Some("pdf") => extract_pdf_text(bytes)?,
            Some("ppt") | Some("pptx") => extract_slide_text(bytes)?,
            _ => {
                return Err(DomainError::new(
                    ErrorCode::DocumentExtraction,
                    format!(
                        "unsupported file format '{}'; supported: .pdf, .ppt, .pptx",
                        file_name
                    ),
                ));
            }
        };

        if raw_text.trim().is_empty() {
            return Err(DomainError::new(
                ErrorCode::DocumentExtraction,
                "document contains no extractable text",
            ));
        }

        Ok(self.condense(&raw_text).await)
    }
}

fn extract_pdf_text(bytes: &[u8]) -> Result<String, DomainError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
        DomainError::new(ErrorCode::DocumentExtraction, format!("unreadable PDF: {}", e))
    })
}

/// Reads slide XML out of the deck archive in slide order and collects the
/// `<a:t>` text runs.
fn extract_slide_text(bytes: &[u8]) -> Result<String, DomainError> {
    let cursor = std::io::Cursor::new(bytes);
    let mut archive = zip::ZipArchive::new(cursor).map_err(|e| {
        DomainError::new(
            ErrorCode::DocumentExtraction,
            format!("unreadable slide archive: {}", e),
        )
    })?;

    let mut slide_names: Vec<(u32, String)> = archive
        .file_names()
        .filter_map(|name| {
            let number = name
                .strip_prefix("ppt/slides/slide")?
                .strip_suffix(".xml")?
                .parse()
                .ok()?;
            Some((number, name.to_string()))
        })
        .collect();
    slide_names.sort();

    let mut text = String::new();
    for (_, name) in slide_names {
        let mut xml = String::new();
        archive
            .by_name(&name)
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DocumentExtraction,
                    format!("unreadable slide '{}': {}", name, e),
                )
            })?
            .read_to_string(&mut xml)
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DocumentExtraction,
                    format!("unreadable slide '{}': {}", name, e),
                )
            })?;
        text.push_str(&slide_text_runs(&xml));
        text.push('\n');
    }
    Ok(text)
}

fn slide_text_runs(xml: &str) -> String {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == b"a:t" => in_text_run = true,
            Ok(Event::End(e)) if e.name().as_ref() == b"a:t" => in_text_run = false,
            Ok(Event::Text(t)) if in_text_run => {
                if let Ok(run) = t.unescape() {
                    if !text.is_empty() && !text.ends_with(' ') {
                        text.push(' ');
                    }
                    text.push_str(run.trim());
                }
            }
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
    }
    text
}

fn parse_draft(reply: &str) -> Result<IdeaDraft, String> {
    #[derive(serde::Deserialize)]
    struct DraftReply {
        title: String,
        concept: String,
    }

    let body = strip_code_fences(reply);
    let reply: DraftReply =
        serde_json::from_str(body).map_err(|e| format!("invalid JSON: {}", e))?;
    if reply.title.trim().is_empty() || reply.concept.trim().is_empty() {
        return Err("empty title or concept".to_string());
    }
    Ok(IdeaDraft {
        title: reply.title,
        concept: reply.concept,
    })
}

fn heuristic_draft(raw_text: &str) -> IdeaDraft {
    let title = raw_text
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("Untitled pitch deck");
    IdeaDraft {
        title: truncate_chars(title, FALLBACK_TITLE_CHARS),
        concept: truncate_chars(raw_text.trim(), FALLBACK_CONCEPT_CHARS),
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    let inner = inner.strip_suffix("```").unwrap_or(inner);
    inner.trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::CompletionError;
    use std::io::Write;
    use std::sync::Mutex;

    struct ReplySequence {
        replies: Mutex<Vec<Result<String, CompletionError>>>,
    }

    #[async_trait]
    impl CompletionClient for ReplySequence {
        async fn complete(
            &self,
            _request: CompletionRequest,
        ) -> Result<String, CompletionError> {
            self.replies.lock().unwrap().remove(0)
        }
    }

    fn extractor(replies: Vec<Result<String, CompletionError>>) -> PitchDeckExtractor {
        PitchDeckExtractor::new(Arc::new(ReplySequence {
            replies: Mutex::new(replies),
        }))
    }

    fn deck_archive(slides: &[&str]) -> Vec<u8> {
        let mut buffer = std::io::Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buffer);
            let options = zip::write::FileOptions::default();
            for (i, body) in slides.iter().enumerate() {
                writer
                    .start_file(format!("ppt/slides/slide{}.xml", i + 1), options)
                    .unwrap();
                writer
                    .write_all(
                        format!(
                            r#"<p:sld xmlns:a="urn:a"><p:txBody><a:p><a:r><a:t>{}</a:t></a:r></a:p></p:txBody></p:sld>"#,
                            body
                        )
                        .as_bytes(),
                    )
                    .unwrap();
            }
            writer.finish().unwrap();
        }
        buffer.into_inner()
    }

    #[tokio::test]
    async fn unsupported_extension_rejected() {
        let err = extractor(vec![])
            .extract("notes.txt", b"whatever")
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::DocumentExtraction);
    }

    #[tokio::test]
    async fn unreadable_pdf_rejected() {
        let err = extractor(vec![])
            .extract("deck.pdf", b"this is not a pdf")
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::DocumentExtraction);
    }

    #[tokio::test]
    async fn slide_text_flows_through_condensation() {
        let bytes = deck_archive(&["AgroSense", "Soil sensors for smallholder farms"]);
        let draft = extractor(vec![Ok(
            r#"{"title": "AgroSense", "concept": "Soil sensing platform for smallholder farms."}"#
                .to_string(),
        )])
        .extract("deck.pptx", &bytes)
        .await
        .unwrap();

        assert_eq!(draft.title, "AgroSense");
        assert!(draft.concept.contains("Soil sensing"));
    }

    #[tokio::test]
    async fn malformed_condensation_falls_back_to_heuristic() {
        let bytes = deck_archive(&["AgroSense", "Soil sensors for smallholder farms"]);
        let draft = extractor(vec![
            Ok("garbage".to_string()),
            Ok("more garbage".to_string()),
        ])
        .extract("deck.pptx", &bytes)
        .await
        .unwrap();

        assert_eq!(draft.title, "AgroSense");
        assert!(draft.concept.contains("Soil sensors"));
    }

    #[tokio::test]
    async fn empty_archive_rejected() {
        let bytes = deck_archive(&[]);
        let err = extractor(vec![])
            .extract("deck.pptx", &bytes)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::DocumentExtraction);
    }

    #[test]
    fn text_runs_are_collected_in_order() {
        let xml = r#"<p:sld><a:p><a:r><a:t>First</a:t></a:r><a:r><a:t>Second</a:t></a:r></a:p></p:sld>"#;
        assert_eq!(slide_text_runs(xml), "First Second");
    }

    #[test]
    fn heuristic_uses_first_non_empty_line() {
        let draft = heuristic_draft("\n\n  AgroSense  \nSoil sensors everywhere");
        assert_eq!(draft.title, "AgroSense");
        assert!(draft.concept.starts_with("AgroSense"));
    }
}
