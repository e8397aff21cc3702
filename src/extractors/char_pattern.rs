use serde::{Deserialize, Serialize};

use super::{text_of, BaseExtractor};
use crate::{Document, ExtractionResult, Feature, Span};

/// How runs of the same character category are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternType {
    /// `Hello` → `LuLlLlLlLl`
    OnePerChar,
    /// `Hello` → `LuLl`
    RepeatsMerged,
    /// `Hello` → `LuLl+`
    #[default]
    RepeatsAsKleenePlus,
}

/// The sequence of coarse Unicode categories of the covered text, e.g.
/// `Lu Ll+ Nd` for `Room42` (written without spaces).
#[derive(Debug, Clone, Default)]
pub struct CharPattern {
    pattern: PatternType,
}

impl CharPattern {
    pub fn new(pattern: PatternType) -> Self {
        Self { pattern }
    }
}

/// Coarse general category: letters and digits keep their Unicode
/// abbreviation, everything else collapses to its major class.
fn category(c: char) -> &'static str {
    if c.is_uppercase() {
        "Lu"
    } else if c.is_lowercase() {
        "Ll"
    } else if c.is_alphabetic() {
        "Lo"
    } else if c.is_ascii_digit() || c.to_digit(10).is_some() {
        "Nd"
    } else if c.is_numeric() {
        "No"
    } else if c.is_whitespace() {
        "Zs"
    } else if c.is_control() {
        "Cc"
    } else if c.is_ascii_punctuation() {
        if "$+<=>^`|~".contains(c) {
            "S"
        } else {
            "P"
        }
    } else if ('\u{2010}'..='\u{205E}').contains(&c) || ('\u{3000}'..='\u{303F}').contains(&c) {
        "P"
    } else {
        "S"
    }
}

impl BaseExtractor for CharPattern {
    fn name(&self) -> &str {
        "CharPattern"
    }

    fn extract(&self, document: &Document, span: &Span) -> ExtractionResult<Vec<Feature>> {
        let text = text_of("CharPattern", document, span)?;

        let mut value = String::new();
        let mut previous: Option<&str> = None;
        let mut repeated = false;
        for c in text.chars() {
            let cat = category(c);
            if self.pattern != PatternType::OnePerChar && previous == Some(cat) {
                if self.pattern == PatternType::RepeatsAsKleenePlus && !repeated {
                    value.push('+');
                }
                repeated = true;
                continue;
            }
            value.push_str(cat);
            previous = Some(cat);
            repeated = false;
        }

        Ok(vec![Feature::new("CharPattern", value)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(pattern: PatternType, text: &str) -> String {
        let doc = Document::builder("doc", text).build();
        let features = CharPattern::new(pattern)
            .extract(&doc, &Span::new("Token", 0, text.chars().count()))
            .unwrap();
        features[0].value.to_string()
    }

    #[test]
    fn test_pattern_types() {
        assert_eq!(pattern(PatternType::OnePerChar, "Hello"), "LuLlLlLlLl");
        assert_eq!(pattern(PatternType::RepeatsMerged, "Hello"), "LuLl");
        assert_eq!(pattern(PatternType::RepeatsAsKleenePlus, "Hello"), "LuLl+");
    }

    #[test]
    fn test_mixed_categories() {
        assert_eq!(pattern(PatternType::RepeatsAsKleenePlus, "Room42!"), "LuLl+Nd+P");
        assert_eq!(pattern(PatternType::RepeatsMerged, "$3.50"), "SNdPNd");
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(pattern(PatternType::RepeatsMerged, ""), "");
    }
}
