use std::sync::Arc;

use layered_features::{
    feature_name, BaseExtractor, ConfigError, ConfigResult, Document, ExtractionError,
    ExtractionResult, Feature, Span, SpanType,
};

use crate::window::window_spans;
use crate::{Direction, Orientation};

/// A single feature joining the values of a whole window, e.g.
/// `Window_L0_3gram_R2L = The OOB1 OOB2`.
#[derive(Debug, Clone)]
pub struct WindowNgramExtractor {
    target: SpanType,
    extractor: Arc<dyn BaseExtractor>,
    orientation: Orientation,
    direction: Direction,
    separator: String,
    begin: usize,
    end: usize,
    name: String,
}

impl WindowNgramExtractor {
    pub fn new(
        target: impl Into<SpanType>,
        extractor: impl BaseExtractor + 'static,
        orientation: Orientation,
        direction: Direction,
        separator: impl Into<String>,
        begin: usize,
        end: usize,
    ) -> ConfigResult<Self> {
        if begin >= end {
            return Err(ConfigError::InvalidRange {
                context: "WindowNgram",
                begin,
                end,
            });
        }
        let name = feature_name([
            "Window".to_string(),
            format!("{}{}", orientation.tag(), begin),
            format!("{}gram", end - begin),
            direction.tag().to_string(),
            extractor.name().to_string(),
        ]);
        Ok(Self {
            target: target.into(),
            extractor: Arc::new(extractor),
            orientation,
            direction,
            separator: separator.into(),
            begin,
            end,
            name,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Values are collected outward from the focus, then reversed when that
    /// disagrees with the requested reading direction.
    fn reversed(&self) -> bool {
        match self.direction {
            Direction::LeftToRight => self.orientation.is_backward(),
            Direction::RightToLeft => !self.orientation.is_backward(),
        }
    }

    /// `window` is the enclosing span, usually the sentence.
    pub fn extract(
        &self,
        document: &Document,
        focus: &Span,
        window: &Span,
    ) -> ExtractionResult<Feature> {
        let available = window_spans(
            self.orientation,
            document,
            &self.target,
            focus,
            window,
            self.end,
        );

        let mut values = Vec::with_capacity(self.end - self.begin);
        let mut oob = 0;
        for position in self.begin..self.end {
            match available.get(position) {
                Some(span) => {
                    let feature = self
                        .extractor
                        .extract(document, span)?
                        .into_iter()
                        .next()
                        .ok_or_else(|| ExtractionError::Extractor {
                            extractor: self.name.clone(),
                            span: span.clone(),
                            message: "base extractor produced no value".to_string(),
                        })?;
                    values.push(feature.value.to_string());
                }
                None => {
                    oob += 1;
                    values.push(format!("OOB{}", oob));
                }
            }
        }

        if self.reversed() {
            values.reverse();
        }
        Ok(Feature::new(self.name.clone(), values.join(&self.separator)))
    }
}
