//! Error types for feature extraction.
//!
//! Configuration errors are detected while building contexts and extractors
//! and should stop a pipeline from starting. Extraction errors are raised
//! while examining one focus span; apart from a `Focus` type mismatch they
//! concern a single instance and callers may log and skip it.

use thiserror::Error;

use crate::{Span, SpanType};

/// Errors detected while building extractor configurations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A ranged context was given something other than `0 <= begin < end`.
    #[error("{context}: invalid range [{begin}, {end}), expected begin < end")]
    InvalidRange {
        context: &'static str,
        begin: usize,
        end: usize,
    },

    #[error("{context}: n-gram width must be at least 1")]
    InvalidNgramWidth { context: &'static str },

    #[error("span type `{0}` is not declared in the schema")]
    UnknownType(SpanType),

    /// A type path that does not resolve against the schema.
    #[error("type path `{path}` does not resolve from `{span_type}`: {reason}")]
    UnresolvedPath {
        span_type: SpanType,
        path: String,
        reason: String,
    },

    /// A `Focus` context applied to a focus span of another layer.
    #[error("focus span {focus} is not of type `{expected}`")]
    FocusTypeMismatch { expected: SpanType, focus: Span },

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

/// Errors raised while extracting features for one focus span.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// A configuration problem that only shows up once a focus is known.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A base extractor failed on a particular span.
    #[error("extractor `{extractor}` failed on {span}: {message}")]
    Extractor {
        extractor: String,
        span: Span,
        message: String,
    },

    /// Any non-configuration failure, tagged with where it happened.
    #[error("document `{document}`, focus {focus}: {source}")]
    Fault {
        document: String,
        focus: Span,
        #[source]
        source: Box<ExtractionError>,
    },

    /// No gap focus can be built between two spans that overlap or are
    /// given in reverse order.
    #[error("no gap between {first} and {second}")]
    InvalidGap { first: Span, second: Span },

    #[error("feature `{name}` has non-finite value {value}")]
    NonFiniteValue { name: String, value: f64 },

    #[error("failed to serialize instance: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write instance: {0}")]
    Io(#[from] std::io::Error),
}

impl ExtractionError {
    /// True for errors that will recur on every instance and should be fatal.
    pub fn is_config(&self) -> bool {
        match self {
            ExtractionError::Config(_) => true,
            ExtractionError::Fault { source, .. } => source.is_config(),
            _ => false,
        }
    }

    /// Attach document identity and focus span, unless already attached.
    pub(crate) fn at(self, document: &str, focus: &Span) -> Self {
        match self {
            err @ ExtractionError::Fault { .. } | err @ ExtractionError::Config(_) => err,
            err => ExtractionError::Fault {
                document: document.to_string(),
                focus: focus.clone(),
                source: Box::new(err),
            },
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

pub type ExtractionResult<T> = Result<T, ExtractionError>;
