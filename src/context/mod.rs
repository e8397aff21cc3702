//! The context combinator language.
//!
//! A [`Context`] says where to look relative to a focus span. Positional
//! variants (`Preceding`, `Following`, `FirstCovered`, `LastCovered`) walk a
//! half-open `[begin, end)` range counted outward from the focus and fill
//! positions with no span behind them with `OOB<distance>` placeholders.
//! Aggregating variants (`Bag`, `Count`, `Ngram`, `Ngrams`) run their
//! children and re-derive features from the combined output.
//!
//! ```text
//! The  quick  brown  fox  [jumped over]  the  lazy  dog  .
//!  3     2      1     0       focus       0     1    2   3
//!  `------ Preceding ----'               `---- Following ---'
//! ```

mod aggregate;
mod distance;
mod located;

use std::fmt;
use std::num::NonZeroUsize;

use crate::extractors::BaseExtractor;
use crate::{feature_name, Bounds, ConfigError, ConfigResult, Document, ExtractionResult};
use crate::{Feature, Span, SpanType};

use distance::Side;
pub(crate) use located::Located;

/// A validated `[begin, end)` position range, `begin < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    begin: usize,
    end: usize,
}

impl Range {
    /// `context` names the variant being built, for the error message.
    pub fn new(context: &'static str, begin: usize, end: usize) -> ConfigResult<Self> {
        if begin >= end {
            return Err(ConfigError::InvalidRange {
                context,
                begin,
                end,
            });
        }
        Ok(Self { begin, end })
    }

    pub fn begin(&self) -> usize {
        self.begin
    }

    pub fn end(&self) -> usize {
        self.end
    }
}

/// Where to look relative to the focus span, and how to name what is found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Context {
    /// The focus span itself.
    Focus,
    Preceding(Range),
    Following(Range),
    /// Every span inside the focus, in document order.
    Covered,
    FirstCovered(Range),
    LastCovered(Range),
    Bag(Vec<Context>),
    Count(Vec<Context>),
    Ngram(Vec<Context>),
    Ngrams(NonZeroUsize, Vec<Context>),
}

impl Context {
    pub fn focus() -> Self {
        Context::Focus
    }

    /// The `end` nearest spans before the focus.
    pub fn preceding(end: usize) -> ConfigResult<Self> {
        Self::preceding_range(0, end)
    }

    pub fn preceding_range(begin: usize, end: usize) -> ConfigResult<Self> {
        Ok(Context::Preceding(Range::new("Preceding", begin, end)?))
    }

    /// The `end` nearest spans after the focus.
    pub fn following(end: usize) -> ConfigResult<Self> {
        Self::following_range(0, end)
    }

    pub fn following_range(begin: usize, end: usize) -> ConfigResult<Self> {
        Ok(Context::Following(Range::new("Following", begin, end)?))
    }

    pub fn covered() -> Self {
        Context::Covered
    }

    pub fn first_covered(end: usize) -> ConfigResult<Self> {
        Self::first_covered_range(0, end)
    }

    pub fn first_covered_range(begin: usize, end: usize) -> ConfigResult<Self> {
        Ok(Context::FirstCovered(Range::new("FirstCovered", begin, end)?))
    }

    pub fn last_covered(end: usize) -> ConfigResult<Self> {
        Self::last_covered_range(0, end)
    }

    pub fn last_covered_range(begin: usize, end: usize) -> ConfigResult<Self> {
        Ok(Context::LastCovered(Range::new("LastCovered", begin, end)?))
    }

    pub fn bag(children: Vec<Context>) -> Self {
        Context::Bag(children)
    }

    pub fn count(children: Vec<Context>) -> Self {
        Context::Count(children)
    }

    pub fn ngram(children: Vec<Context>) -> Self {
        Context::Ngram(children)
    }

    /// Sliding windows of `n` consecutive child values.
    pub fn ngrams(n: usize, children: Vec<Context>) -> ConfigResult<Self> {
        let n = NonZeroUsize::new(n).ok_or(ConfigError::InvalidNgramWidth { context: "Ngrams" })?;
        Ok(Context::Ngrams(n, children))
    }

    /// The name prefix this context gives its features.
    pub fn name(&self) -> String {
        fn ranged(tag: &str, range: &Range) -> String {
            format!("{}_{}_{}", tag, range.begin, range.end)
        }
        fn nested(tag: &str, extra: Option<String>, children: &[Context]) -> String {
            feature_name(
                std::iter::once(tag.to_string())
                    .chain(extra)
                    .chain(children.iter().map(Context::name)),
            )
        }

        match self {
            Context::Focus => "Focus".to_string(),
            Context::Preceding(range) => ranged("Preceding", range),
            Context::Following(range) => ranged("Following", range),
            Context::Covered => "Covered".to_string(),
            Context::FirstCovered(range) => ranged("FirstCovered", range),
            Context::LastCovered(range) => ranged("LastCovered", range),
            Context::Bag(children) => nested("Bag", None, children),
            Context::Count(children) => nested("Count", None, children),
            Context::Ngram(children) => nested("Ngram", None, children),
            Context::Ngrams(n, children) => nested("Ngrams", Some(n.to_string()), children),
        }
    }

    /// Run this context around `focus`, applying `extractor` to every
    /// `target` span it finds.
    pub fn extract(
        &self,
        document: &Document,
        focus: &Span,
        bounds: Bounds,
        target: &SpanType,
        extractor: &dyn BaseExtractor,
    ) -> ExtractionResult<Vec<Feature>> {
        let extraction = Extraction {
            document,
            focus,
            bounds,
            target,
            extractor,
        };
        let located = self.locate(&extraction)?;
        Ok(located.into_iter().map(Located::into_feature).collect())
    }

    pub(crate) fn locate(&self, extraction: &Extraction<'_>) -> ExtractionResult<Vec<Located>> {
        let name = self.name();
        match self {
            Context::Focus => distance::focus(extraction, &name),
            Context::Preceding(range) => distance::ranged(extraction, &name, Side::Preceding, range),
            Context::Following(range) => distance::ranged(extraction, &name, Side::Following, range),
            Context::Covered => distance::covered(extraction, &name),
            Context::FirstCovered(range) => {
                distance::ranged(extraction, &name, Side::FirstCovered, range)
            }
            Context::LastCovered(range) => {
                distance::ranged(extraction, &name, Side::LastCovered, range)
            }
            Context::Bag(children) => aggregate::bag(extraction, &name, children),
            Context::Count(children) => aggregate::count(extraction, &name, children),
            Context::Ngram(children) => aggregate::ngram(extraction, &name, children),
            Context::Ngrams(n, children) => aggregate::ngrams(extraction, &name, *n, children),
        }
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Everything one extraction call needs, passed down the context tree.
pub(crate) struct Extraction<'a> {
    pub document: &'a Document,
    pub focus: &'a Span,
    pub bounds: Bounds,
    pub target: &'a SpanType,
    pub extractor: &'a dyn BaseExtractor,
}

impl Extraction<'_> {
    pub fn run(&self, span: &Span) -> ExtractionResult<Vec<Feature>> {
        self.extractor.extract(self.document, span)
    }
}
