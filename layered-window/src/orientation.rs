use std::fmt;

use layered_features::{Document, Span, SpanType};

/// Where a window starts relative to the focus, and which way it grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Before the focus, growing leftwards.
    Left,
    /// After the focus, growing rightwards.
    Right,
    /// Inside the focus, from its first span onwards.
    Middle,
    /// Inside the focus, from its last span backwards.
    MiddleReverse,
}

impl Orientation {
    pub fn tag(self) -> &'static str {
        match self {
            Orientation::Left => "L",
            Orientation::Right => "R",
            Orientation::Middle => "M",
            Orientation::MiddleReverse => "MR",
        }
    }

    /// True when the window grows towards the start of the text.
    pub fn is_backward(self) -> bool {
        matches!(self, Orientation::Left | Orientation::MiddleReverse)
    }

    /// The span at window position 0, or `None` when there is no context
    /// on this side of the focus.
    pub fn start_span(self, document: &Document, target: &SpanType, focus: &Span) -> Option<Span> {
        let target = target.as_str();
        match self {
            Orientation::Left => document.previous(target, focus),
            Orientation::Right => document.next(target, focus),
            Orientation::Middle => document.covered(target, focus).into_iter().next(),
            Orientation::MiddleReverse => document.covered(target, focus).pop(),
        }
    }

    /// Up to `limit` spans starting at [`Orientation::start_span`], nearest
    /// first.
    pub(crate) fn sequence(
        self,
        document: &Document,
        target: &SpanType,
        focus: &Span,
        limit: usize,
    ) -> Vec<Span> {
        let target = target.as_str();
        let mut spans = match self {
            Orientation::Left => {
                let mut spans = document.preceding(target, focus, limit);
                spans.reverse();
                spans
            }
            Orientation::Right => document.following(target, focus, limit),
            Orientation::Middle => document.covered(target, focus),
            Orientation::MiddleReverse => {
                let mut spans = document.covered(target, focus);
                spans.reverse();
                spans
            }
        };
        spans.truncate(limit);
        spans
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// The order in which window n-gram values are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    LeftToRight,
    RightToLeft,
}

impl Direction {
    pub fn tag(self) -> &'static str {
        match self {
            Direction::LeftToRight => "L2R",
            Direction::RightToLeft => "R2L",
        }
    }
}
