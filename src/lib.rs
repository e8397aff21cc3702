#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Contextual feature extraction over layered span annotations.
//!
//! A [`Document`] holds text plus ordered layers of typed [`Span`]s
//! (tokens, chunks, sentences). Given a focus span, a [`Context`] locates
//! other spans relative to it and a [`BaseExtractor`] turns each of them
//! into named [`Feature`]s for a classifier.
//!
//! ## Building blocks
//!
//! - [`Document`] / [`DocumentBuilder`] - text and span layers, with
//!   preceding/following/covered queries
//! - [`BaseExtractor`] - [`CoveredText`], [`TypePath`], [`CharNgram`],
//!   [`CharPattern`], [`Combined`]
//! - [`Context`] - `Focus`, `Preceding`, `Following`, `Covered`,
//!   `FirstCovered`, `LastCovered` and the aggregating `Bag`, `Count`,
//!   `Ngram`, `Ngrams`
//! - [`ContextExtractor`] - a base extractor plus contexts for one target type
//! - [`FeaturesConfig`] - the same, loaded from TOML
//! - [`Instance`], [`NameNumberEncoder`], [`Classifier`] - handing features
//!   to a learner
//!
//! ## Example
//!
//! ```
//! use layered_features::{Context, ContextExtractor, CoveredText, Document, Span};
//!
//! let mut builder = Document::builder("doc", "The quick brown fox jumped");
//! builder.add_whitespace_tokens("Token");
//! let doc = builder.build();
//! let fox = Span::new("Token", 16, 19);
//!
//! let extractor = ContextExtractor::new(
//!     "Token",
//!     CoveredText::new(),
//!     vec![Context::bag(vec![Context::preceding(2).unwrap()])],
//! );
//! let values: Vec<String> = extractor
//!     .extract(&doc, &fox)
//!     .unwrap()
//!     .iter()
//!     .map(|f| f.value.to_string())
//!     .collect();
//! assert_eq!(values, vec!["quick", "brown"]);
//! ```

mod config;
mod context;
mod document;
mod encoder;
mod errors;
mod extractor;
pub mod extractors;
mod feature;
mod schema;
mod span;

pub use config::{BaseConfig, ContextConfig, ExtractorConfig, FeaturesConfig};
pub use context::{Context, Range};
pub use document::{AttrValue, Document, DocumentBuilder, DocumentDisplay, Layer};
pub use encoder::{
    Classifier, DataWriter, Instance, JsonLinesWriter, NameNumber, NameNumberEncoder,
};
pub use errors::{ConfigError, ConfigResult, ExtractionError, ExtractionResult};
pub use extractor::{ContextExtractor, GAP_TYPE};
pub use extractors::{
    BaseExtractor, CharNgram, CharPattern, CharSide, Combined, CoveredText, PatternType, TypePath,
};
pub use feature::{feature_name, Feature, FeatureListDisplay, FeatureValue};
pub use schema::{FieldKind, ResolvedPath, Schema};
pub use span::{Bounds, Span, SpanType};
