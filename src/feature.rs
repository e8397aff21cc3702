//! Named feature values handed to classifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A primitive feature value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Str(String),
    Int(i64),
    Bool(bool),
    Float(f64),
}

impl FeatureValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FeatureValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            FeatureValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// False only for floats that are NaN or infinite.
    pub fn is_finite(&self) -> bool {
        match self {
            FeatureValue::Float(f) => f.is_finite(),
            _ => true,
        }
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Str(s) => f.write_str(s),
            FeatureValue::Int(i) => write!(f, "{}", i),
            FeatureValue::Bool(b) => write!(f, "{}", b),
            FeatureValue::Float(x) => write!(f, "{}", x),
        }
    }
}

impl From<&str> for FeatureValue {
    fn from(value: &str) -> Self {
        FeatureValue::Str(value.to_string())
    }
}

impl From<String> for FeatureValue {
    fn from(value: String) -> Self {
        FeatureValue::Str(value)
    }
}

impl From<i64> for FeatureValue {
    fn from(value: i64) -> Self {
        FeatureValue::Int(value)
    }
}

impl From<bool> for FeatureValue {
    fn from(value: bool) -> Self {
        FeatureValue::Bool(value)
    }
}

impl From<f64> for FeatureValue {
    fn from(value: f64) -> Self {
        FeatureValue::Float(value)
    }
}

/// A `{name, value}` pair. The name is what training and inference key on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub name: String,
    pub value: FeatureValue,
}

impl Feature {
    pub fn new(name: impl Into<String>, value: impl Into<FeatureValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// A feature with no name of its own; contexts supply the prefix.
    pub fn unnamed(value: impl Into<FeatureValue>) -> Self {
        Self::new("", value)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.name, self.value)
    }
}

/// Join the non-empty parts of a feature name with `_`.
pub fn feature_name<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut name = String::new();
    for part in parts {
        let part = part.as_ref();
        if part.is_empty() {
            continue;
        }
        if !name.is_empty() {
            name.push('_');
        }
        name.push_str(part);
    }
    name
}

/// One feature per line, for logs and snapshots.
pub struct FeatureListDisplay<'a> {
    features: &'a [Feature],
}

impl<'a> FeatureListDisplay<'a> {
    pub fn new(features: &'a [Feature]) -> Self {
        Self { features }
    }
}

impl<'a> fmt::Display for FeatureListDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .features
            .iter()
            .map(|feature| feature.name.chars().count())
            .max()
            .unwrap_or(0);
        for (i, feature) in self.features.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{:<width$} = {}", feature.name, feature.value, width = width)?;
        }
        Ok(())
    }
}
