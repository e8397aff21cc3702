use std::sync::Arc;

use super::BaseExtractor;
use crate::{feature_name, Document, ExtractionResult, Feature, Span};

/// Runs several extractors on the same span and concatenates their output.
#[derive(Debug, Clone)]
pub struct Combined {
    extractors: Vec<Arc<dyn BaseExtractor>>,
    name: String,
}

impl Combined {
    pub fn new(extractors: Vec<Arc<dyn BaseExtractor>>) -> Self {
        let name = feature_name(extractors.iter().map(|e| e.name()));
        Self { extractors, name }
    }
}

impl BaseExtractor for Combined {
    fn name(&self) -> &str {
        &self.name
    }

    fn extract(&self, document: &Document, span: &Span) -> ExtractionResult<Vec<Feature>> {
        let mut features = Vec::new();
        for extractor in &self.extractors {
            features.extend(extractor.extract(document, span)?);
        }
        Ok(features)
    }
}
