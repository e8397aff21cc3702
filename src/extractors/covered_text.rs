use super::{text_of, BaseExtractor};
use crate::{Document, ExtractionResult, Feature, Span};

/// The text under the span.
#[derive(Debug, Clone, Default)]
pub struct CoveredText {
    name: String,
    lowercase: bool,
}

impl CoveredText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lowercase(mut self) -> Self {
        self.lowercase = true;
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl BaseExtractor for CoveredText {
    fn name(&self) -> &str {
        &self.name
    }

    fn extract(&self, document: &Document, span: &Span) -> ExtractionResult<Vec<Feature>> {
        let text = text_of("CoveredText", document, span)?;
        let value = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };
        Ok(vec![Feature::new(self.name.clone(), value)])
    }
}
