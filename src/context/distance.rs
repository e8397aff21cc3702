//! Positional contexts: the focus itself, covered spans, and ranged walks
//! away from the focus with out-of-bounds padding.

use super::{Extraction, Located, Range};
use crate::{ConfigError, ExtractionResult, Span};

/// Which sequence a ranged context walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Preceding,
    Following,
    FirstCovered,
    LastCovered,
}

impl Side {
    /// Up to `end` candidates, farthest from the focus first.
    fn select(self, extraction: &Extraction<'_>, end: usize) -> Vec<Span> {
        let document = extraction.document;
        let focus = extraction.focus;
        let target = extraction.target.as_str();
        match self {
            Side::Preceding => document.preceding(target, focus, end),
            Side::Following => {
                let mut spans = document.following(target, focus, end);
                spans.reverse();
                spans
            }
            Side::FirstCovered => {
                let mut spans = document.covered(target, focus);
                spans.truncate(end);
                spans.reverse();
                spans
            }
            Side::LastCovered => {
                let mut spans = document.covered(target, focus);
                let skip = spans.len().saturating_sub(end);
                spans.split_off(skip)
            }
        }
    }

    /// Whether features come out nearest position first.
    fn nearest_first(self) -> bool {
        matches!(self, Side::Following | Side::FirstCovered)
    }
}

/// Walk positions `range.end - 1` down to `range.begin`.
///
/// Candidates are indexed from the far end of the requested window, so a
/// shortfall of `missing` spans leaves the farthest `missing` positions
/// empty no matter where `range.begin` cuts. Out-of-bounds distances count
/// down towards the focus and reach 1 at the position nearest the edge.
pub(crate) fn ranged(
    extraction: &Extraction<'_>,
    context: &str,
    side: Side,
    range: &Range,
) -> ExtractionResult<Vec<Located>> {
    let (begin, end) = (range.begin(), range.end());
    let mut candidates = side.select(extraction, end);
    let missing = end - candidates.len();
    candidates.truncate((end - begin).saturating_sub(missing));

    let bounds = extraction.bounds;
    let mut oob = missing + candidates.iter().filter(|s| !bounds.contains(s)).count();

    let mut groups: Vec<Vec<Located>> = Vec::with_capacity(end - begin);
    for position in (begin..end).rev() {
        let candidate = (end - 1 - position)
            .checked_sub(missing)
            .and_then(|idx| candidates.get(idx))
            .filter(|span| bounds.contains(span));

        match candidate {
            Some(span) => groups.push(
                extraction
                    .run(span)?
                    .into_iter()
                    .map(|feature| Located::at(context, position, feature))
                    .collect(),
            ),
            None => {
                groups.push(vec![Located::out_of_bounds(
                    context,
                    position,
                    oob,
                    extraction.extractor.name(),
                )]);
                oob = oob.saturating_sub(1);
            }
        }
    }

    if side.nearest_first() {
        groups.reverse();
    }
    Ok(groups.into_iter().flatten().collect())
}

/// Every covered span, numbered in document order. Bounds do not apply.
pub(crate) fn covered(extraction: &Extraction<'_>, context: &str) -> ExtractionResult<Vec<Located>> {
    let spans = extraction
        .document
        .covered(extraction.target.as_str(), extraction.focus);

    let mut located = Vec::new();
    for (position, span) in spans.iter().enumerate() {
        located.extend(
            extraction
                .run(span)?
                .into_iter()
                .map(|feature| Located::at(context, position, feature)),
        );
    }
    Ok(located)
}

pub(crate) fn focus(extraction: &Extraction<'_>, context: &str) -> ExtractionResult<Vec<Located>> {
    let focus = extraction.focus;
    if focus.span_type() != extraction.target {
        return Err(ConfigError::FocusTypeMismatch {
            expected: extraction.target.clone(),
            focus: focus.clone(),
        }
        .into());
    }

    Ok(extraction
        .run(focus)?
        .into_iter()
        .map(|feature| Located::unordered(context, feature))
        .collect())
}
