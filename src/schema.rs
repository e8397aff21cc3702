//! Attribute schema for span layers.
//!
//! Typed attribute paths (`pos`, `head/lemma`) are checked against the
//! schema once, when an extractor is configured, so extraction never has to
//! interpret field names it cannot follow.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::{ConfigError, SpanType};

/// The kind of value a span attribute holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Str,
    Int,
    Bool,
    Float,
    /// A reference to another span of the given type.
    Span(SpanType),
}

/// Declared attributes per span type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    types: HashMap<SpanType, BTreeMap<String, FieldKind>>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a type with its fields.
    pub fn with_type<I, S>(mut self, span_type: impl Into<SpanType>, fields: I) -> Self
    where
        I: IntoIterator<Item = (S, FieldKind)>,
        S: Into<String>,
    {
        let entry = self.types.entry(span_type.into()).or_default();
        for (name, kind) in fields {
            entry.insert(name.into(), kind);
        }
        self
    }

    pub fn has_type(&self, span_type: &str) -> bool {
        self.types.contains_key(span_type)
    }

    pub fn field(&self, span_type: &str, field: &str) -> Option<&FieldKind> {
        self.types.get(span_type).and_then(|fields| fields.get(field))
    }

    /// Resolve a `/`-separated attribute path starting at `span_type`.
    pub fn resolve_path(&self, span_type: &SpanType, path: &str) -> Result<ResolvedPath, ConfigError> {
        let unresolved = |reason: String| ConfigError::UnresolvedPath {
            span_type: span_type.clone(),
            path: path.to_string(),
            reason,
        };

        if !self.has_type(span_type.as_str()) {
            return Err(ConfigError::UnknownType(span_type.clone()));
        }

        let steps: Vec<String> = path.split('/').map(str::to_string).collect();
        if steps.iter().any(|s| s.is_empty()) {
            return Err(unresolved("empty path segment".to_string()));
        }

        let mut current = span_type.clone();
        let mut leaf = None;
        for (i, step) in steps.iter().enumerate() {
            let kind = self
                .field(current.as_str(), step)
                .ok_or_else(|| unresolved(format!("`{}` has no field `{}`", current, step)))?;
            let is_last = i + 1 == steps.len();
            match kind {
                FieldKind::Span(target) if !is_last => {
                    if !self.has_type(target.as_str()) {
                        return Err(ConfigError::UnknownType(target.clone()));
                    }
                    current = target.clone();
                }
                _ if !is_last => {
                    return Err(unresolved(format!(
                        "`{}.{}` is not a span reference",
                        current, step
                    )));
                }
                kind => leaf = Some(kind.clone()),
            }
        }

        Ok(ResolvedPath {
            root: span_type.clone(),
            steps,
            leaf: leaf.ok_or_else(|| unresolved("empty path".to_string()))?,
        })
    }
}

/// A type path already checked against a [`Schema`].
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPath {
    root: SpanType,
    steps: Vec<String>,
    leaf: FieldKind,
}

impl ResolvedPath {
    pub fn root(&self) -> &SpanType {
        &self.root
    }

    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    /// The kind of the final field.
    pub fn leaf(&self) -> &FieldKind {
        &self.leaf
    }
}
