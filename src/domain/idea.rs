//! Idea submission value objects.

use serde::{Deserialize, Serialize};

use super::foundation::{DomainError, ErrorCode};

const MAX_TITLE_LEN: usize = 200;
const MAX_CONCEPT_LEN: usize = 8_000;

/// Title of a submitted startup idea.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdeaTitle(String);

impl IdeaTitle {
    pub fn new(title: impl Into<String>) -> Result<Self, DomainError> {
        let title = title.into();
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("title", "idea title cannot be empty"));
        }
        if trimmed.chars().count() > MAX_TITLE_LEN {
            return Err(DomainError::validation(
                "title",
                format!("idea title exceeds {} characters", MAX_TITLE_LEN),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Concept description of a submitted startup idea.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdeaConcept(String);

impl IdeaConcept {
    pub fn new(concept: impl Into<String>) -> Result<Self, DomainError> {
        let concept = concept.into();
        let trimmed = concept.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation(
                "concept",
                "idea concept cannot be empty",
            ));
        }
        if trimmed.chars().count() > MAX_CONCEPT_LEN {
            return Err(DomainError::validation(
                "concept",
                format!("idea concept exceeds {} characters", MAX_CONCEPT_LEN),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A validated idea submission. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdeaInput {
    title: IdeaTitle,
    concept: IdeaConcept,
    /// Original file name when the idea came from an uploaded pitch deck.
    source_document: Option<String>,
}

impl IdeaInput {
    pub fn new(title: IdeaTitle, concept: IdeaConcept) -> Self {
        Self {
            title,
            concept,
            source_document: None,
        }
    }

    pub fn from_document(
        title: IdeaTitle,
        concept: IdeaConcept,
        source_document: impl Into<String>,
    ) -> Self {
        Self {
            title,
            concept,
            source_document: Some(source_document.into()),
        }
    }

    pub fn title(&self) -> &IdeaTitle {
        &self.title
    }

    pub fn concept(&self) -> &IdeaConcept {
        &self.concept
    }

    pub fn source_document(&self) -> Option<&str> {
        self.source_document.as_deref()
    }
}

/// Raw extraction result before validation into an [`IdeaInput`].
#[derive(Debug, Clone)]
pub struct IdeaDraft {
    pub title: String,
    pub concept: String,
}

impl IdeaDraft {
    /// Validates the draft into an immutable idea submission.
    pub fn into_idea(self, source_document: impl Into<String>) -> Result<IdeaInput, DomainError> {
        let title = IdeaTitle::new(self.title).map_err(|e| {
            DomainError::new(
                ErrorCode::DocumentExtraction,
                format!("extracted title unusable: {}", e.message()),
            )
        })?;
        let concept = IdeaConcept::new(self.concept).map_err(|e| {
            DomainError::new(
                ErrorCode::DocumentExtraction,
                format!("extracted concept unusable: {}", e.message()),
            )
        })?;
        Ok(IdeaInput::from_document(title, concept, source_document))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_rejects_empty_and_oversized() {
        assert!(IdeaTitle::new("").is_err());
        assert!(IdeaTitle::new("  ").is_err());
        assert!(IdeaTitle::new("x".repeat(201)).is_err());
        assert!(IdeaTitle::new("Solar delivery drones").is_ok());
    }

    #[test]
    fn title_is_trimmed() {
        let title = IdeaTitle::new("  Solar drones  ").unwrap();
        assert_eq!(title.as_str(), "Solar drones");
    }

    #[test]
    fn concept_rejects_empty() {
        assert!(IdeaConcept::new("").is_err());
        assert!(IdeaConcept::new("Deliver parcels with solar drones").is_ok());
    }

    #[test]
    fn idea_from_document_keeps_source() {
        let idea = IdeaInput::from_document(
            IdeaTitle::new("Solar drones").unwrap(),
            IdeaConcept::new("Deliver parcels with solar drones").unwrap(),
            "deck.pdf",
        );
        assert_eq!(idea.source_document(), Some("deck.pdf"));
    }

    #[test]
    fn bad_draft_maps_to_extraction_error() {
        let draft = IdeaDraft {
            title: String::new(),
            concept: "something".to_string(),
        };
        let err = draft.into_idea("deck.pdf").unwrap_err();
        assert_eq!(err.code(), ErrorCode::DocumentExtraction);
    }
}
