//! Ordered span layers and the relative-position queries run against them.
//!
//! Every query is a binary search into a sorted `Vec<Span>` followed by a
//! bounded walk, so nothing keeps cursor state between calls.

use std::collections::BTreeMap;

use crate::{AttrValue, Span};

/// All spans of one type, sorted by begin then end.
#[derive(Debug, Clone, Default)]
pub struct Layer {
    spans: Vec<Span>,
    attrs: Vec<BTreeMap<String, AttrValue>>,
}

impl Layer {
    pub(crate) fn from_entries(mut entries: Vec<(Span, BTreeMap<String, AttrValue>)>) -> Self {
        // stable, so duplicates keep insertion order
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        let (spans, attrs) = entries.into_iter().unzip();
        Self { spans, attrs }
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn contains_span(&self, span: &Span) -> bool {
        self.spans.binary_search(span).is_ok()
    }

    /// Attributes of a span in this layer. For duplicate spans the first
    /// inserted one wins.
    pub fn attrs(&self, span: &Span) -> Option<&BTreeMap<String, AttrValue>> {
        let idx = self.spans.partition_point(|s| s < span);
        match self.spans.get(idx) {
            Some(found) if found == span => self.attrs.get(idx),
            _ => None,
        }
    }

    /// Up to `k` spans ending at or before `reference.begin()`, nearest `k`,
    /// in document order (farthest first).
    pub fn preceding(&self, reference: &Span, k: usize) -> Vec<Span> {
        let upper = self.spans.partition_point(|s| s.begin() <= reference.begin());
        let mut found: Vec<Span> = self.spans[..upper]
            .iter()
            .rev()
            .filter(|s| s.end() <= reference.begin() && *s != reference)
            .take(k)
            .cloned()
            .collect();
        found.reverse();
        found
    }

    /// Up to `k` spans starting at or after `reference.end()`, in document
    /// order (nearest first).
    pub fn following(&self, reference: &Span, k: usize) -> Vec<Span> {
        let lower = self.spans.partition_point(|s| s.begin() < reference.end());
        self.spans[lower..]
            .iter()
            .filter(|s| *s != reference)
            .take(k)
            .cloned()
            .collect()
    }

    /// Spans lying entirely inside `reference`, in document order.
    pub fn covered(&self, reference: &Span) -> Vec<Span> {
        self.covered_range(reference.begin(), reference.end())
            .filter(|s| *s != reference)
            .cloned()
            .collect()
    }

    /// Spans lying entirely inside `[begin, end)`.
    pub fn covered_range(&self, begin: usize, end: usize) -> impl Iterator<Item = &Span> + '_ {
        let lower = self.spans.partition_point(|s| s.begin() < begin);
        self.spans[lower..]
            .iter()
            .take_while(move |s| s.begin() <= end)
            .filter(move |s| s.end() <= end)
    }

    /// Nearest span after `reference`.
    pub fn next(&self, reference: &Span) -> Option<Span> {
        self.following(reference, 1).pop()
    }

    /// Nearest span before `reference`.
    pub fn previous(&self, reference: &Span) -> Option<Span> {
        self.preceding(reference, 1).pop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(offsets: &[(usize, usize)]) -> Layer {
        Layer::from_entries(
            offsets
                .iter()
                .map(|&(b, e)| (Span::new("Token", b, e), BTreeMap::new()))
                .collect(),
        )
    }

    fn offsets(spans: &[Span]) -> Vec<(usize, usize)> {
        spans.iter().map(|s| (s.begin(), s.end())).collect()
    }

    #[test]
    fn test_preceding_returns_nearest_in_document_order() {
        let tokens = layer(&[(0, 3), (4, 9), (10, 15), (16, 19), (20, 26)]);
        let focus = Span::new("Chunk", 16, 26);
        assert_eq!(offsets(&tokens.preceding(&focus, 2)), vec![(4, 9), (10, 15)]);
        // never pads
        assert_eq!(
            offsets(&tokens.preceding(&focus, 10)),
            vec![(0, 3), (4, 9), (10, 15)]
        );
    }

    #[test]
    fn test_following_returns_nearest_first() {
        let tokens = layer(&[(0, 3), (4, 9), (10, 15), (16, 19), (20, 26)]);
        let focus = Span::new("Chunk", 0, 9);
        assert_eq!(offsets(&tokens.following(&focus, 2)), vec![(10, 15), (16, 19)]);
    }

    #[test]
    fn test_overlapping_spans_are_neither_before_nor_after() {
        let tokens = layer(&[(0, 3), (2, 6), (7, 9)]);
        let focus = Span::new("Chunk", 4, 7);
        assert_eq!(offsets(&tokens.preceding(&focus, 5)), vec![(0, 3)]);
        assert_eq!(offsets(&tokens.following(&focus, 5)), vec![(7, 9)]);
    }

    #[test]
    fn test_covered_excludes_reference_itself() {
        let tokens = layer(&[(0, 3), (4, 9), (10, 15)]);
        let focus = Span::new("Token", 4, 9);
        assert!(tokens.covered(&focus).is_empty());

        let sentence = Span::new("Sentence", 0, 15);
        assert_eq!(tokens.covered(&sentence).len(), 3);
    }

    #[test]
    fn test_zero_width_markers() {
        let markers = layer(&[(4, 4), (9, 9)]);
        let token = Span::new("Token", 4, 9);
        assert_eq!(offsets(&markers.preceding(&token, 5)), vec![(4, 4)]);
        assert_eq!(offsets(&markers.following(&token, 5)), vec![(9, 9)]);
        assert_eq!(markers.covered(&token).len(), 2);
    }

    #[test]
    fn test_next_and_previous() {
        let tokens = layer(&[(0, 3), (4, 9), (10, 15)]);
        let middle = Span::new("Token", 4, 9);
        assert_eq!(tokens.previous(&middle), Some(Span::new("Token", 0, 3)));
        assert_eq!(tokens.next(&middle), Some(Span::new("Token", 10, 15)));
        assert_eq!(tokens.previous(&Span::new("Token", 0, 3)), None);
    }

    #[test]
    fn test_empty_layer() {
        let empty = Layer::default();
        let focus = Span::new("Token", 0, 3);
        assert!(empty.preceding(&focus, 3).is_empty());
        assert!(empty.following(&focus, 3).is_empty());
        assert!(empty.covered(&focus).is_empty());
    }
}
