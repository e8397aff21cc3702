//! Documents: an immutable text buffer plus typed span layers.
//!
//! Documents are assembled upstream through a [`DocumentBuilder`] and are
//! read-only afterwards, so any number of extractions may share one.

mod display;
mod index;

use std::collections::{BTreeMap, HashMap};

use crate::{Span, SpanType};

pub use display::DocumentDisplay;
pub use index::Layer;

/// A typed attribute value attached to a span.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Str(String),
    Int(i64),
    Bool(bool),
    Float(f64),
    Span(Span),
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Str(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Str(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Float(value)
    }
}

impl From<Span> for AttrValue {
    fn from(value: Span) -> Self {
        AttrValue::Span(value)
    }
}

/// Text plus, per span type, an ordered layer of spans.
pub struct Document {
    id: String,
    text: String,
    /// Byte offset of every character, plus the text length.
    char_bytes: Vec<usize>,
    layers: HashMap<SpanType, Layer>,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut layer_sizes: Vec<_> = self
            .layers
            .iter()
            .map(|(span_type, layer)| (span_type.as_str(), layer.len()))
            .collect();
        layer_sizes.sort();
        f.debug_struct("Document")
            .field("id", &self.id)
            .field("char_len", &self.char_len())
            .field("layers", &layer_sizes)
            .finish()
    }
}

impl Document {
    pub fn builder(id: impl Into<String>, text: impl Into<String>) -> DocumentBuilder {
        DocumentBuilder::new(id, text)
    }

    /// Identifier used when reporting extraction faults.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length of the text in characters, the unit of span offsets.
    pub fn char_len(&self) -> usize {
        self.char_bytes.len() - 1
    }

    /// Text under a span, or `None` when the offsets do not fit the text.
    pub fn covered_text(&self, span: &Span) -> Option<&str> {
        let begin = *self.char_bytes.get(span.begin())?;
        let end = *self.char_bytes.get(span.end())?;
        self.text.get(begin..end)
    }

    pub fn layer(&self, span_type: &str) -> Option<&Layer> {
        self.layers.get(span_type)
    }

    /// Spans of a type; empty when the document has no such layer.
    pub fn spans(&self, span_type: &str) -> &[Span] {
        self.layer(span_type).map(Layer::spans).unwrap_or(&[])
    }

    pub fn span_types(&self) -> impl Iterator<Item = &SpanType> {
        self.layers.keys()
    }

    pub fn attrs(&self, span: &Span) -> Option<&BTreeMap<String, AttrValue>> {
        self.layer(span.span_type().as_str())?.attrs(span)
    }

    pub fn attr(&self, span: &Span, name: &str) -> Option<&AttrValue> {
        self.attrs(span)?.get(name)
    }

    /// See [`Layer::preceding`].
    pub fn preceding(&self, span_type: &str, reference: &Span, k: usize) -> Vec<Span> {
        self.layer(span_type)
            .map(|layer| layer.preceding(reference, k))
            .unwrap_or_default()
    }

    /// See [`Layer::following`].
    pub fn following(&self, span_type: &str, reference: &Span, k: usize) -> Vec<Span> {
        self.layer(span_type)
            .map(|layer| layer.following(reference, k))
            .unwrap_or_default()
    }

    /// See [`Layer::covered`].
    pub fn covered(&self, span_type: &str, reference: &Span) -> Vec<Span> {
        self.layer(span_type)
            .map(|layer| layer.covered(reference))
            .unwrap_or_default()
    }

    /// Number of spans of a type lying entirely inside `[begin, end)`.
    pub fn count_covered_range(&self, span_type: &str, begin: usize, end: usize) -> usize {
        self.layer(span_type)
            .map_or(0, |layer| layer.covered_range(begin, end).count())
    }

    pub fn next(&self, span_type: &str, reference: &Span) -> Option<Span> {
        self.layer(span_type)?.next(reference)
    }

    pub fn previous(&self, span_type: &str, reference: &Span) -> Option<Span> {
        self.layer(span_type)?.previous(reference)
    }
}

/// Collects spans and attributes, then freezes them into a [`Document`].
#[derive(Debug)]
pub struct DocumentBuilder {
    id: String,
    text: String,
    entries: HashMap<SpanType, Vec<(Span, BTreeMap<String, AttrValue>)>>,
}

impl DocumentBuilder {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            entries: HashMap::new(),
        }
    }

    pub fn add_span(&mut self, span: Span) -> &mut Self {
        self.add_annotated(span, Vec::<(String, AttrValue)>::new())
    }

    /// Add a span together with its attributes.
    pub fn add_annotated<I, K>(&mut self, span: Span, attrs: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, AttrValue)>,
        K: Into<String>,
    {
        let attrs = attrs.into_iter().map(|(k, v)| (k.into(), v)).collect();
        self.entries
            .entry(span.span_type().clone())
            .or_default()
            .push((span, attrs));
        self
    }

    /// Add one span per whitespace-separated word of the text.
    pub fn add_whitespace_tokens(&mut self, span_type: impl Into<SpanType>) -> &mut Self {
        let span_type = span_type.into();
        let mut offsets = Vec::new();
        let mut start = None;
        for (idx, ch) in self.text.chars().enumerate() {
            match (ch.is_whitespace(), start) {
                (true, Some(s)) => {
                    offsets.push((s, idx));
                    start = None;
                }
                (false, None) => start = Some(idx),
                _ => {}
            }
        }
        if let Some(s) = start {
            offsets.push((s, self.text.chars().count()));
        }
        for (b, e) in offsets {
            self.add_span(Span::new(span_type.clone(), b, e));
        }
        self
    }

    pub fn build(self) -> Document {
        let layers = self
            .entries
            .into_iter()
            .map(|(span_type, entries)| (span_type, Layer::from_entries(entries)))
            .collect();
        let char_bytes = self
            .text
            .char_indices()
            .map(|(byte, _)| byte)
            .chain(std::iter::once(self.text.len()))
            .collect();
        Document {
            id: self.id,
            text: self.text,
            char_bytes,
            layers,
        }
    }
}
