//! Base extractors: map one span to zero or more raw features.
//!
//! Contexts decide *which* spans to look at; a [`BaseExtractor`] decides
//! what to say about each of them. The built-in extractors are simple value
//! transforms over the span's text or attributes.

mod char_ngram;
mod char_pattern;
mod combined;
mod covered_text;
mod type_path;

use std::fmt::Debug;
use std::sync::Arc;

use crate::{Document, ExtractionResult, Feature, Span};

pub use char_ngram::{CharNgram, CharSide};
pub use char_pattern::{CharPattern, PatternType};
pub use combined::Combined;
pub use covered_text::CoveredText;
pub use type_path::TypePath;

/// Turns a single span into raw features.
///
/// Implementations must be pure: the same span of the same document yields
/// the same features in the same order.
pub trait BaseExtractor: Debug + Send + Sync {
    /// Name given to this extractor's features, and to the out-of-bounds
    /// placeholders emitted in its place. Empty when features are unnamed.
    fn name(&self) -> &str;

    fn extract(&self, document: &Document, span: &Span) -> ExtractionResult<Vec<Feature>>;
}

impl<E: BaseExtractor + ?Sized> BaseExtractor for Arc<E> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn extract(&self, document: &Document, span: &Span) -> ExtractionResult<Vec<Feature>> {
        (**self).extract(document, span)
    }
}

impl<E: BaseExtractor + ?Sized> BaseExtractor for Box<E> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn extract(&self, document: &Document, span: &Span) -> ExtractionResult<Vec<Feature>> {
        (**self).extract(document, span)
    }
}

/// Covered text of a span, or an extractor fault naming the span.
pub(crate) fn text_of<'d>(
    extractor: &str,
    document: &'d Document,
    span: &Span,
) -> ExtractionResult<&'d str> {
    document
        .covered_text(span)
        .ok_or_else(|| crate::ExtractionError::Extractor {
            extractor: extractor.to_string(),
            span: span.clone(),
            message: format!(
                "offsets do not fit the document text ({} characters)",
                document.char_len()
            ),
        })
}
