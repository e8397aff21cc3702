use super::{text_of, BaseExtractor};
use crate::schema::ResolvedPath;
use crate::{
    AttrValue, ConfigResult, Document, ExtractionError, ExtractionResult, Feature, FeatureValue,
    Schema, Span, SpanType,
};

/// The value found by following a chain of span attributes, e.g. `pos` or
/// `head/lemma`.
///
/// The path is resolved against a [`Schema`] when the extractor is built.
/// At extraction time a missing attribute anywhere along the path simply
/// yields no feature.
#[derive(Debug, Clone)]
pub struct TypePath {
    path: ResolvedPath,
    name: String,
}

impl TypePath {
    pub fn new(schema: &Schema, span_type: impl Into<SpanType>, path: &str) -> ConfigResult<Self> {
        let path = schema.resolve_path(&span_type.into(), path)?;
        let name = format!(
            "TypePath({})",
            path.steps().iter().map(|s| capitalize(s)).collect::<String>()
        );
        Ok(Self { path, name })
    }

    fn fault(&self, span: &Span, message: String) -> ExtractionError {
        ExtractionError::Extractor {
            extractor: self.name.clone(),
            span: span.clone(),
            message,
        }
    }
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl BaseExtractor for TypePath {
    fn name(&self) -> &str {
        &self.name
    }

    fn extract(&self, document: &Document, span: &Span) -> ExtractionResult<Vec<Feature>> {
        if span.span_type() != self.path.root() {
            return Err(self.fault(span, format!("expected a `{}` span", self.path.root())));
        }

        let (last, hops) = match self.path.steps().split_last() {
            Some(split) => split,
            None => return Ok(Vec::new()),
        };

        let mut current = span.clone();
        for hop in hops {
            match document.attr(&current, hop) {
                Some(AttrValue::Span(next)) => current = next.clone(),
                Some(other) => {
                    return Err(self.fault(span, format!("`{}` holds {:?}, not a span", hop, other)));
                }
                None => return Ok(Vec::new()),
            }
        }

        let value = match document.attr(&current, last) {
            None => return Ok(Vec::new()),
            Some(AttrValue::Str(s)) => FeatureValue::Str(s.clone()),
            Some(AttrValue::Int(i)) => FeatureValue::Int(*i),
            Some(AttrValue::Bool(b)) => FeatureValue::Bool(*b),
            Some(AttrValue::Float(f)) => FeatureValue::Float(*f),
            Some(AttrValue::Span(target)) => {
                FeatureValue::Str(text_of(&self.name, document, target)?.to_string())
            }
        };

        Ok(vec![Feature::new(self.name.clone(), value)])
    }
}
