use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use super::{text_of, BaseExtractor};
use crate::{ConfigError, ConfigResult, Document, ExtractionResult, Feature, Span};

/// Which end of the text character n-grams are counted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharSide {
    Prefix,
    Suffix,
}

/// Characters `[begin, end)` counted from the start (prefix) or from the
/// end (suffix) of the covered text.
///
/// Characters are extended grapheme clusters, so combining marks stay with
/// their base character. Text shorter than `end` characters yields nothing.
#[derive(Debug, Clone)]
pub struct CharNgram {
    side: CharSide,
    begin: usize,
    end: usize,
    lowercase: bool,
    name: String,
}

impl CharNgram {
    pub fn new(side: CharSide, begin: usize, end: usize) -> ConfigResult<Self> {
        let tag = match side {
            CharSide::Prefix => "Prefix",
            CharSide::Suffix => "Suffix",
        };
        if begin >= end {
            return Err(ConfigError::InvalidRange {
                context: tag,
                begin,
                end,
            });
        }
        Ok(Self {
            side,
            begin,
            end,
            lowercase: false,
            name: format!("{}_{}_{}", tag, begin, end),
        })
    }

    pub fn prefix(len: usize) -> ConfigResult<Self> {
        Self::new(CharSide::Prefix, 0, len)
    }

    pub fn suffix(len: usize) -> ConfigResult<Self> {
        Self::new(CharSide::Suffix, 0, len)
    }

    pub fn lowercase(mut self) -> Self {
        self.lowercase = true;
        self
    }
}

impl BaseExtractor for CharNgram {
    fn name(&self) -> &str {
        &self.name
    }

    fn extract(&self, document: &Document, span: &Span) -> ExtractionResult<Vec<Feature>> {
        let text = text_of(&self.name, document, span)?;
        let graphemes: Vec<&str> = text.graphemes(true).collect();
        let len = graphemes.len();
        if len < self.end {
            return Ok(Vec::new());
        }

        let selected = match self.side {
            CharSide::Prefix => &graphemes[self.begin..self.end],
            CharSide::Suffix => &graphemes[len - self.end..len - self.begin],
        };
        let mut value = selected.concat();
        if self.lowercase {
            value = value.to_lowercase();
        }

        Ok(vec![Feature::new(self.name.clone(), value)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(extractor: &CharNgram, text: &str) -> Vec<Feature> {
        let doc = Document::builder("doc", text).build();
        extractor
            .extract(&doc, &Span::new("Token", 0, text.chars().count()))
            .unwrap()
    }

    #[test]
    fn test_prefix_and_suffix() {
        let prefix = CharNgram::prefix(3).unwrap();
        assert_eq!(run(&prefix, "Jumped"), vec![Feature::new("Prefix_0_3", "Jum")]);

        let suffix = CharNgram::suffix(2).unwrap().lowercase();
        assert_eq!(run(&suffix, "JUMPED"), vec![Feature::new("Suffix_0_2", "ed")]);
    }

    #[test]
    fn test_offset_suffix() {
        // characters 1..3 counted from the right: "pe" of "jumped"
        let extractor = CharNgram::new(CharSide::Suffix, 1, 3).unwrap();
        assert_eq!(run(&extractor, "jumped"), vec![Feature::new("Suffix_1_3", "pe")]);
    }

    #[test]
    fn test_short_text_yields_nothing() {
        let extractor = CharNgram::prefix(4).unwrap();
        assert!(run(&extractor, "fox").is_empty());
    }

    #[test]
    fn test_graphemes_are_single_characters() {
        // "e" + combining acute accent
        let extractor = CharNgram::suffix(1).unwrap();
        assert_eq!(
            run(&extractor, "cafe\u{301}"),
            vec![Feature::new("Suffix_0_1", "e\u{301}")]
        );
    }

    #[test]
    fn test_empty_range_is_rejected() {
        assert!(matches!(
            CharNgram::new(CharSide::Prefix, 2, 2),
            Err(ConfigError::InvalidRange { .. })
        ));
    }
}
