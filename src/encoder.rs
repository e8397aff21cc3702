//! Handing extracted features to a learner.
//!
//! The learning library itself stays opaque: instances are either written
//! out for training or passed to a [`Classifier`] at inference time.

use std::io;

use serde::{Deserialize, Serialize};

use crate::{feature_name, ExtractionError, ExtractionResult, Feature, FeatureValue};

/// The features of one focus span, plus its outcome when training.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    pub features: Vec<Feature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
}

impl Instance {
    pub fn training(features: Vec<Feature>, outcome: impl Into<String>) -> Self {
        Self {
            features,
            outcome: Some(outcome.into()),
        }
    }

    pub fn inference(features: Vec<Feature>) -> Self {
        Self {
            features,
            outcome: None,
        }
    }

    /// Refuse NaN and infinite values before they reach a learner.
    pub fn validate(&self) -> ExtractionResult<()> {
        for feature in &self.features {
            check_finite(feature)?;
        }
        Ok(())
    }

    /// The instance as one line of JSON, without the trailing newline.
    pub fn to_json_line(&self) -> ExtractionResult<String> {
        self.validate()?;
        Ok(serde_json::to_string(self)?)
    }
}

fn check_finite(feature: &Feature) -> ExtractionResult<()> {
    match feature.value {
        FeatureValue::Float(value) if !value.is_finite() => Err(ExtractionError::NonFiniteValue {
            name: feature.name.clone(),
            value,
        }),
        _ => Ok(()),
    }
}

/// An opaque trained model.
pub trait Classifier {
    type Error: std::error::Error + Send + Sync + 'static;

    fn classify(&self, features: &[Feature]) -> Result<String, Self::Error>;
}

/// Destination for training instances.
pub trait DataWriter {
    fn write(&mut self, instance: &Instance) -> ExtractionResult<()>;
}

/// Writes one JSON object per line.
#[derive(Debug)]
pub struct JsonLinesWriter<W> {
    writer: W,
    written: usize,
}

impl<W: io::Write> JsonLinesWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: io::Write> DataWriter for JsonLinesWriter<W> {
    fn write(&mut self, instance: &Instance) -> ExtractionResult<()> {
        let line = instance.to_json_line()?;
        writeln!(self.writer, "{}", line)?;
        self.written += 1;
        Ok(())
    }
}

/// A feature flattened to a numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameNumber {
    pub name: String,
    pub number: f64,
}

/// Encodes features for learners that only accept numbers.
///
/// Strings become indicator columns named after their value, booleans
/// become 1 or 0 and numbers pass through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameNumberEncoder;

impl NameNumberEncoder {
    pub fn encode(&self, feature: &Feature) -> ExtractionResult<NameNumber> {
        check_finite(feature)?;
        let (name, number) = match &feature.value {
            FeatureValue::Str(value) => (feature_name([feature.name.as_str(), value.as_str()]), 1.0),
            FeatureValue::Bool(value) => (feature.name.clone(), if *value { 1.0 } else { 0.0 }),
            FeatureValue::Int(value) => (feature.name.clone(), *value as f64),
            FeatureValue::Float(value) => (feature.name.clone(), *value),
        };
        Ok(NameNumber { name, number })
    }

    pub fn encode_all(&self, features: &[Feature]) -> ExtractionResult<Vec<NameNumber>> {
        features.iter().map(|f| self.encode(f)).collect()
    }
}
