use layered_features::{feature_name, Document, Feature, Span, SpanType};

/// Signed distance from `first` to `second` in `unit` spans.
///
/// Zero when the spans overlap. Otherwise the number of `unit` spans lying
/// strictly between them, plus one, positive when `first` comes first.
pub fn directed_distance(document: &Document, unit: &SpanType, first: &Span, second: &Span) -> i64 {
    let unit = unit.as_str();
    if first.overlaps(second) {
        0
    } else if first.end() <= second.begin() {
        document.count_covered_range(unit, first.end(), second.begin()) as i64 + 1
    } else {
        -(document.count_covered_range(unit, second.end(), first.begin()) as i64 + 1)
    }
}

/// `<name>_DirectedDistance_<unit>` between two spans.
#[derive(Debug, Clone)]
pub struct DirectedDistanceExtractor {
    unit: SpanType,
    name: String,
}

impl DirectedDistanceExtractor {
    pub fn new(unit: impl Into<SpanType>) -> Self {
        Self::named("", unit)
    }

    pub fn named(name: &str, unit: impl Into<SpanType>) -> Self {
        let unit = unit.into();
        Self {
            name: feature_name([name, "DirectedDistance", unit.as_str()]),
            unit,
        }
    }

    pub fn extract(&self, document: &Document, first: &Span, second: &Span) -> Feature {
        Feature::new(
            self.name.clone(),
            directed_distance(document, &self.unit, first, second),
        )
    }
}

/// Like [`DirectedDistanceExtractor`] but unsigned, `<name>_Distance_<unit>`.
#[derive(Debug, Clone)]
pub struct DistanceExtractor {
    unit: SpanType,
    name: String,
}

impl DistanceExtractor {
    pub fn new(unit: impl Into<SpanType>) -> Self {
        Self::named("", unit)
    }

    pub fn named(name: &str, unit: impl Into<SpanType>) -> Self {
        let unit = unit.into();
        Self {
            name: feature_name([name, "Distance", unit.as_str()]),
            unit,
        }
    }

    pub fn extract(&self, document: &Document, first: &Span, second: &Span) -> Feature {
        Feature::new(
            self.name.clone(),
            directed_distance(document, &self.unit, first, second).abs(),
        )
    }
}
