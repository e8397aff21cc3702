use std::sync::Arc;

use layered_features::{
    feature_name, BaseExtractor, ConfigError, ConfigResult, Document, ExtractionResult, Feature,
    Span, SpanType,
};

use crate::Orientation;

/// One feature per window position, named `Window_<O><position>`.
///
/// Positions are counted from the start span outwards. A position past the
/// edge of the document or the enclosing window span is missing, and so is
/// every position beyond it.
#[derive(Debug, Clone)]
pub struct WindowExtractor {
    target: SpanType,
    extractor: Arc<dyn BaseExtractor>,
    orientation: Orientation,
    begin: usize,
    end: usize,
}

impl WindowExtractor {
    pub fn new(
        target: impl Into<SpanType>,
        extractor: impl BaseExtractor + 'static,
        orientation: Orientation,
        begin: usize,
        end: usize,
    ) -> ConfigResult<Self> {
        if begin >= end {
            return Err(ConfigError::InvalidRange {
                context: "Window",
                begin,
                end,
            });
        }
        Ok(Self {
            target: target.into(),
            extractor: Arc::new(extractor),
            orientation,
            begin,
            end,
        })
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// See [`Orientation::start_span`].
    pub fn start_span(&self, document: &Document, focus: &Span) -> Option<Span> {
        self.orientation.start_span(document, &self.target, focus)
    }

    pub fn extract(
        &self,
        document: &Document,
        focus: &Span,
        window: &Span,
    ) -> ExtractionResult<Vec<Feature>> {
        let available = window_spans(
            self.orientation,
            document,
            &self.target,
            focus,
            window,
            self.end,
        );
        let tag = self.orientation.tag();

        let mut features = Vec::new();
        let mut oob = 0;
        for position in self.begin..self.end {
            match available.get(position) {
                Some(span) => {
                    let slot = format!("{}{}", tag, position);
                    for feature in self.extractor.extract(document, span)? {
                        features.push(Feature {
                            name: feature_name(["Window", slot.as_str(), feature.name.as_str()]),
                            value: feature.value,
                        });
                    }
                }
                None => {
                    oob += 1;
                    let slot = format!("{}{}OOB{}", tag, position, oob);
                    features.push(Feature::new(
                        feature_name(["Window", slot.as_str(), self.extractor.name()]),
                        "OOB",
                    ));
                }
            }
        }
        tracing::trace!(
            orientation = %self.orientation,
            focus = %focus,
            missing = oob,
            "extracted window"
        );
        Ok(features)
    }
}

/// Spans of the window in position order, stopping at the first one that
/// leaves `window`.
pub(crate) fn window_spans(
    orientation: Orientation,
    document: &Document,
    target: &SpanType,
    focus: &Span,
    window: &Span,
    end: usize,
) -> Vec<Span> {
    orientation
        .sequence(document, target, focus, end)
        .into_iter()
        .take_while(|span| window.contains(span))
        .collect()
}
