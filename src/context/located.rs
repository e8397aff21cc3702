//! Features as they travel between contexts, before their names are final.

use crate::{feature_name, Feature, FeatureValue};

/// Where a feature came from relative to the focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Slot {
    /// Aggregated or focus features carry no position.
    Unordered,
    At(usize),
    /// A requested position with no span behind it.
    OutOfBounds { position: usize, distance: usize },
}

/// A base feature tagged with the context that produced it.
///
/// Parent combinators read `base` to re-derive their own features; only
/// [`Located::into_feature`] builds the public composite name.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Located {
    pub context: String,
    pub slot: Slot,
    pub base: Feature,
}

impl Located {
    pub fn at(context: &str, position: usize, base: Feature) -> Self {
        Self {
            context: context.to_string(),
            slot: Slot::At(position),
            base,
        }
    }

    pub fn unordered(context: &str, base: Feature) -> Self {
        Self {
            context: context.to_string(),
            slot: Slot::Unordered,
            base,
        }
    }

    /// Placeholder for a position past the document edge or outside bounds.
    pub fn out_of_bounds(context: &str, position: usize, distance: usize, base_name: &str) -> Self {
        Self {
            context: context.to_string(),
            slot: Slot::OutOfBounds { position, distance },
            base: Feature::new(base_name, FeatureValue::Str(format!("OOB{}", distance))),
        }
    }

    pub fn into_feature(self) -> Feature {
        let position = match self.slot {
            Slot::Unordered => None,
            Slot::At(position) | Slot::OutOfBounds { position, .. } => Some(position.to_string()),
        };
        let name = feature_name(
            std::iter::once(self.context.as_str())
                .chain(position.as_deref())
                .chain(std::iter::once(self.base.name.as_str())),
        );
        Feature {
            name,
            value: self.base.value,
        }
    }
}
