//! Contexts that run child contexts and re-derive features from their
//! combined output.

use std::collections::HashMap;
use std::num::NonZeroUsize;

use super::{Context, Extraction, Located};
use crate::{feature_name, ExtractionResult, Feature, FeatureValue};

/// Child output in child order, positions and context names dropped.
fn base_features(
    extraction: &Extraction<'_>,
    children: &[Context],
) -> ExtractionResult<Vec<Feature>> {
    let mut features = Vec::new();
    for child in children {
        features.extend(child.locate(extraction)?.into_iter().map(|l| l.base));
    }
    Ok(features)
}

fn joined_values(features: &[Feature]) -> String {
    features
        .iter()
        .map(|f| f.value.to_string())
        .collect::<Vec<_>>()
        .join("_")
}

pub(crate) fn bag(
    extraction: &Extraction<'_>,
    context: &str,
    children: &[Context],
) -> ExtractionResult<Vec<Located>> {
    Ok(base_features(extraction, children)?
        .into_iter()
        .map(|feature| Located::unordered(context, feature))
        .collect())
}

/// One feature per distinct `(name, value)` pair, in first-seen order.
pub(crate) fn count(
    extraction: &Extraction<'_>,
    context: &str,
    children: &[Context],
) -> ExtractionResult<Vec<Located>> {
    let mut counts: Vec<(String, i64)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for feature in base_features(extraction, children)? {
        let key = feature_name([feature.name, feature.value.to_string()]);
        match index.get(&key) {
            Some(&idx) => counts[idx].1 += 1,
            None => {
                index.insert(key.clone(), counts.len());
                counts.push((key, 1));
            }
        }
    }

    Ok(counts
        .into_iter()
        .map(|(name, n)| Located::unordered(context, Feature::new(name, n)))
        .collect())
}

/// Exactly one feature joining every child value.
pub(crate) fn ngram(
    extraction: &Extraction<'_>,
    context: &str,
    children: &[Context],
) -> ExtractionResult<Vec<Located>> {
    let features = base_features(extraction, children)?;
    let value = FeatureValue::Str(joined_values(&features));
    Ok(vec![Located::unordered(
        context,
        Feature::new(extraction.extractor.name(), value),
    )])
}

pub(crate) fn ngrams(
    extraction: &Extraction<'_>,
    context: &str,
    n: NonZeroUsize,
    children: &[Context],
) -> ExtractionResult<Vec<Located>> {
    let features = base_features(extraction, children)?;
    let name = extraction.extractor.name();
    Ok(features
        .windows(n.get())
        .map(|window| Located::unordered(context, Feature::new(name, joined_values(window))))
        .collect())
}
