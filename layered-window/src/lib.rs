#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Oriented window and span distance features for layered-features.
//!
//! These extractors predate [`layered_features::Context`] and keep their own
//! naming and out-of-bounds numbering, which trained models depend on:
//!
//! - [`WindowExtractor`] - one feature per position of a window that starts
//!   next to (or inside) the focus, e.g. `Window_L0`, `Window_L1OOB1`
//! - [`WindowNgramExtractor`] - a single joined feature over such a window
//! - [`DirectedDistanceExtractor`] / [`DistanceExtractor`] - how many unit
//!   spans separate two spans
//!
//! Out-of-bounds positions are numbered from the first missing position of
//! each call, so `[2, 4)` past the edge of a sentence yields `OOB1, OOB2`
//! here, where `Preceding(2, 4)` may yield `OOB3, OOB2`.
//!
//! ## Usage
//!
//! ```
//! use layered_features::{CoveredText, Document, Span};
//! use layered_window::{Direction, Orientation, WindowNgramExtractor};
//!
//! let mut builder = Document::builder("doc", "The quick brown fox");
//! builder.add_whitespace_tokens("Token");
//! let doc = builder.build();
//! let sentence = Span::new("Sentence", 0, 19);
//!
//! let extractor = WindowNgramExtractor::new(
//!     "Token",
//!     CoveredText::new(),
//!     Orientation::Left,
//!     Direction::RightToLeft,
//!     " ",
//!     0,
//!     3,
//! )
//! .unwrap();
//! let feature = extractor.extract(&doc, &Span::new("Token", 4, 9), &sentence).unwrap();
//! assert_eq!(feature.name, "Window_L0_3gram_R2L");
//! assert_eq!(feature.value.to_string(), "The OOB1 OOB2");
//! ```

mod distance;
mod orientation;
mod window;
mod window_ngram;

#[cfg(test)]
mod fixtures;

pub use distance::{directed_distance, DirectedDistanceExtractor, DistanceExtractor};
pub use orientation::{Direction, Orientation};
pub use window::WindowExtractor;
pub use window_ngram::WindowNgramExtractor;
