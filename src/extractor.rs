use std::sync::Arc;

use crate::extractors::BaseExtractor;
use crate::{
    Bounds, Context, Document, ExtractionError, ExtractionResult, Feature, Span, SpanType,
};

/// Span type given to the synthetic focus built by
/// [`ContextExtractor::extract_between`].
pub const GAP_TYPE: &str = "Gap";

/// A base extractor bound to a target span type and a list of contexts.
///
/// This is the unit a classifier pipeline configures once and then calls for
/// every focus span. Feature order follows context order.
///
/// ```
/// use layered_features::{Context, ContextExtractor, CoveredText, Document, Span};
///
/// let mut builder = Document::builder("doc", "big red dog");
/// builder.add_whitespace_tokens("Token");
/// let doc = builder.build();
///
/// let extractor = ContextExtractor::new(
///     "Token",
///     CoveredText::new(),
///     vec![Context::preceding(1).unwrap(), Context::following(1).unwrap()],
/// );
/// let features = extractor.extract(&doc, &Span::new("Token", 4, 7)).unwrap();
/// assert_eq!(features[0].name, "Preceding_0_1_0");
/// assert_eq!(features[0].value.to_string(), "big");
/// assert_eq!(features[1].value.to_string(), "dog");
/// ```
#[derive(Debug, Clone)]
pub struct ContextExtractor {
    target: SpanType,
    extractor: Arc<dyn BaseExtractor>,
    contexts: Vec<Context>,
}

impl ContextExtractor {
    pub fn new(
        target: impl Into<SpanType>,
        extractor: impl BaseExtractor + 'static,
        contexts: Vec<Context>,
    ) -> Self {
        Self::from_shared(target, Arc::new(extractor), contexts)
    }

    /// Build around an extractor that is also used elsewhere.
    pub fn from_shared(
        target: impl Into<SpanType>,
        extractor: Arc<dyn BaseExtractor>,
        contexts: Vec<Context>,
    ) -> Self {
        Self {
            target: target.into(),
            extractor,
            contexts,
        }
    }

    pub fn target(&self) -> &SpanType {
        &self.target
    }

    pub fn extractor(&self) -> &dyn BaseExtractor {
        &*self.extractor
    }

    pub fn contexts(&self) -> &[Context] {
        &self.contexts
    }

    pub fn extract(&self, document: &Document, focus: &Span) -> ExtractionResult<Vec<Feature>> {
        self.extract_with_bounds(document, focus, Bounds::Unbounded)
    }

    /// Extract without reaching outside `bounds`, typically the sentence
    /// containing the focus.
    pub fn extract_within(
        &self,
        document: &Document,
        focus: &Span,
        bounds: &Span,
    ) -> ExtractionResult<Vec<Feature>> {
        self.extract_with_bounds(document, focus, Bounds::of(bounds))
    }

    pub fn extract_with_bounds(
        &self,
        document: &Document,
        focus: &Span,
        bounds: Bounds,
    ) -> ExtractionResult<Vec<Feature>> {
        let mut features = Vec::new();
        for context in &self.contexts {
            let found = context
                .extract(document, focus, bounds, &self.target, &*self.extractor)
                .map_err(|err| self.fault(document, focus, err))?;
            tracing::trace!(
                context = %context,
                focus = %focus,
                features = found.len(),
                "extracted context"
            );
            features.extend(found);
        }
        Ok(features)
    }

    /// Extract around the gap between two spans, e.g. the words separating
    /// two mentions of a relation.
    pub fn extract_between(
        &self,
        document: &Document,
        first: &Span,
        second: &Span,
    ) -> ExtractionResult<Vec<Feature>> {
        let gap = Span::try_new(GAP_TYPE, first.end(), second.begin()).ok_or_else(|| {
            ExtractionError::InvalidGap {
                first: first.clone(),
                second: second.clone(),
            }
        })?;
        self.extract(document, &gap)
    }

    fn fault(&self, document: &Document, focus: &Span, err: ExtractionError) -> ExtractionError {
        if err.is_config() {
            return err;
        }
        tracing::warn!(
            document = document.id(),
            focus = %focus,
            error = %err,
            "feature extraction failed"
        );
        err.at(document.id(), focus)
    }
}
