//! Typed, offset-delimited regions of document text.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Name of a span layer (e.g. `Token`, `Sentence`, `Chunk`).
///
/// Cloning is a reference-count bump, so spans can carry their type by value.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpanType(Arc<str>);

impl SpanType {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SpanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for SpanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SpanType {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for SpanType {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl Borrow<str> for SpanType {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// An immutable `[begin, end)` region of a document, tagged with its layer.
///
/// Offsets count characters of the document text, not bytes. Zero-width
/// spans are legal and are used as insertion markers.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Span {
    span_type: SpanType,
    begin: usize,
    end: usize,
}

impl Span {
    /// Create a span, returning `None` when `begin > end`.
    pub fn try_new(span_type: impl Into<SpanType>, begin: usize, end: usize) -> Option<Self> {
        if begin > end {
            return None;
        }
        Some(Self {
            span_type: span_type.into(),
            begin,
            end,
        })
    }

    /// Create a span.
    ///
    /// # Panics
    ///
    /// Panics when `begin > end`; use [`Span::try_new`] for untrusted offsets.
    pub fn new(span_type: impl Into<SpanType>, begin: usize, end: usize) -> Self {
        let span_type = span_type.into();
        assert!(
            begin <= end,
            "span {} has begin {} after end {}",
            span_type,
            begin,
            end
        );
        Self {
            span_type,
            begin,
            end,
        }
    }

    pub fn span_type(&self) -> &SpanType {
        &self.span_type
    }

    pub fn begin(&self) -> usize {
        self.begin
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// Same offsets, possibly a different layer.
    pub fn same_offsets(&self, other: &Span) -> bool {
        self.begin == other.begin && self.end == other.end
    }

    /// True if `other` lies entirely inside this span.
    pub fn contains(&self, other: &Span) -> bool {
        self.begin <= other.begin && other.end <= self.end
    }

    /// True if the spans share at least one offset, or are the same region.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.same_offsets(other) || (self.begin < other.end && other.begin < self.end)
    }

    /// A span of the same type with different offsets.
    pub fn with_offsets(&self, begin: usize, end: usize) -> Option<Span> {
        Span::try_new(self.span_type.clone(), begin, end)
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}..{})", self.span_type, self.begin, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl Ord for Span {
    fn cmp(&self, other: &Self) -> Ordering {
        self.begin
            .cmp(&other.begin)
            .then(self.end.cmp(&other.end))
            .then_with(|| self.span_type.cmp(&other.span_type))
    }
}

impl PartialOrd for Span {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Clipping region for context lookups.
///
/// Candidates that do not lie entirely inside the bounds are treated as
/// absent, which keeps context from reaching across a sentence or paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Bounds {
    #[default]
    Unbounded,
    Range { begin: usize, end: usize },
}

impl Bounds {
    /// Bounds covering exactly the given span.
    pub fn of(span: &Span) -> Self {
        Bounds::Range {
            begin: span.begin(),
            end: span.end(),
        }
    }

    pub fn contains(&self, span: &Span) -> bool {
        match *self {
            Bounds::Unbounded => true,
            Bounds::Range { begin, end } => begin <= span.begin() && span.end() <= end,
        }
    }
}
