//! Extractor configuration loaded from TOML.
//!
//! ```toml
//! [schema.Token]
//! pos = "str"
//!
//! [[extractor]]
//! target = "Token"
//! base = { kind = "type_path", path = "pos" }
//! contexts = [
//!     { kind = "preceding", end = 2 },
//!     { kind = "bag", contexts = [{ kind = "following", begin = 1, end = 3 }] },
//! ]
//! ```
//!
//! Every range, n-gram width and type path is checked by
//! [`FeaturesConfig::build`], before any document is seen.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::extractors::{
    BaseExtractor, CharNgram, CharPattern, CharSide, Combined, CoveredText, PatternType, TypePath,
};
use crate::{ConfigError, ConfigResult, Context, ContextExtractor, Schema, SpanType};

/// A complete feature configuration: the attribute schema plus the
/// extractors built against it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeaturesConfig {
    #[serde(default)]
    pub schema: Schema,
    #[serde(default, rename = "extractor")]
    pub extractors: Vec<ExtractorConfig>,
}

/// One [`ContextExtractor`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    pub target: SpanType,
    pub base: BaseConfig,
    pub contexts: Vec<ContextConfig>,
}

/// A base extractor description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BaseConfig {
    CoveredText {
        #[serde(default)]
        lowercase: bool,
        #[serde(default)]
        name: Option<String>,
    },
    TypePath {
        path: String,
    },
    CharNgram {
        side: CharSide,
        #[serde(default)]
        begin: usize,
        end: usize,
        #[serde(default)]
        lowercase: bool,
    },
    CharPattern {
        #[serde(default)]
        pattern: PatternType,
    },
    Combined {
        extractors: Vec<BaseConfig>,
    },
}

/// A context tree node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContextConfig {
    Focus,
    Preceding {
        #[serde(default)]
        begin: usize,
        end: usize,
    },
    Following {
        #[serde(default)]
        begin: usize,
        end: usize,
    },
    Covered,
    FirstCovered {
        #[serde(default)]
        begin: usize,
        end: usize,
    },
    LastCovered {
        #[serde(default)]
        begin: usize,
        end: usize,
    },
    Bag {
        contexts: Vec<ContextConfig>,
    },
    Count {
        contexts: Vec<ContextConfig>,
    },
    Ngram {
        contexts: Vec<ContextConfig>,
    },
    Ngrams {
        n: usize,
        contexts: Vec<ContextConfig>,
    },
}

impl FeaturesConfig {
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate everything and build the extractors, in declaration order.
    pub fn build(&self) -> ConfigResult<Vec<ContextExtractor>> {
        if self.extractors.is_empty() {
            return Err(ConfigError::Validation(
                "no [[extractor]] tables configured".to_string(),
            ));
        }
        self.extractors
            .iter()
            .map(|config| config.build(&self.schema))
            .collect()
    }
}

impl ExtractorConfig {
    pub fn build(&self, schema: &Schema) -> ConfigResult<ContextExtractor> {
        let extractor = self.base.build(schema, &self.target)?;
        let contexts = self
            .contexts
            .iter()
            .map(ContextConfig::build)
            .collect::<ConfigResult<Vec<_>>>()?;
        tracing::debug!(
            target_type = %self.target,
            extractor = extractor.name(),
            contexts = contexts.len(),
            "built context extractor"
        );
        Ok(ContextExtractor::from_shared(
            self.target.clone(),
            extractor,
            contexts,
        ))
    }
}

impl BaseConfig {
    pub fn build(&self, schema: &Schema, target: &SpanType) -> ConfigResult<Arc<dyn BaseExtractor>> {
        let extractor: Arc<dyn BaseExtractor> = match self {
            BaseConfig::CoveredText { lowercase, name } => {
                let mut extractor = CoveredText::new();
                if *lowercase {
                    extractor = extractor.lowercase();
                }
                if let Some(name) = name {
                    extractor = extractor.named(name.clone());
                }
                Arc::new(extractor)
            }
            BaseConfig::TypePath { path } => Arc::new(TypePath::new(schema, target.clone(), path)?),
            BaseConfig::CharNgram {
                side,
                begin,
                end,
                lowercase,
            } => {
                let extractor = CharNgram::new(*side, *begin, *end)?;
                if *lowercase {
                    Arc::new(extractor.lowercase())
                } else {
                    Arc::new(extractor)
                }
            }
            BaseConfig::CharPattern { pattern } => Arc::new(CharPattern::new(*pattern)),
            BaseConfig::Combined { extractors } => {
                if extractors.is_empty() {
                    return Err(ConfigError::Validation(
                        "combined extractor needs at least one child".to_string(),
                    ));
                }
                let children = extractors
                    .iter()
                    .map(|child| child.build(schema, target))
                    .collect::<ConfigResult<Vec<_>>>()?;
                Arc::new(Combined::new(children))
            }
        };
        Ok(extractor)
    }
}

impl ContextConfig {
    pub fn build(&self) -> ConfigResult<Context> {
        fn children(contexts: &[ContextConfig]) -> ConfigResult<Vec<Context>> {
            contexts.iter().map(ContextConfig::build).collect()
        }

        match self {
            ContextConfig::Focus => Ok(Context::focus()),
            ContextConfig::Preceding { begin, end } => Context::preceding_range(*begin, *end),
            ContextConfig::Following { begin, end } => Context::following_range(*begin, *end),
            ContextConfig::Covered => Ok(Context::covered()),
            ContextConfig::FirstCovered { begin, end } => {
                Context::first_covered_range(*begin, *end)
            }
            ContextConfig::LastCovered { begin, end } => Context::last_covered_range(*begin, *end),
            ContextConfig::Bag { contexts } => Ok(Context::bag(children(contexts)?)),
            ContextConfig::Count { contexts } => Ok(Context::count(children(contexts)?)),
            ContextConfig::Ngram { contexts } => Ok(Context::ngram(children(contexts)?)),
            ContextConfig::Ngrams { n, contexts } => Context::ngrams(*n, children(contexts)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::tests::fixtures;
    use crate::{FeatureListDisplay, FieldKind};

    const CONFIG: &str = r#"
[schema.Token]
pos = "str"

[[extractor]]
target = "Token"
base = { kind = "type_path", path = "pos" }
contexts = [
    { kind = "preceding", end = 2 },
    { kind = "bag", contexts = [{ kind = "following", begin = 1, end = 3 }] },
]

[[extractor]]
target = "Token"
base = { kind = "char_ngram", side = "suffix", end = 2, lowercase = true }
contexts = [{ kind = "ngrams", n = 2, contexts = [{ kind = "covered" }] }]
"#;

    #[test]
    fn test_parse_config() {
        let config = FeaturesConfig::from_toml_str(CONFIG).unwrap();
        assert_eq!(config.schema.field("Token", "pos"), Some(&FieldKind::Str));
        assert_eq!(config.extractors.len(), 2);
        assert_eq!(
            config.extractors[0].contexts[1],
            ContextConfig::Bag {
                contexts: vec![ContextConfig::Following { begin: 1, end: 3 }]
            }
        );
        assert_eq!(
            config.extractors[1].base,
            BaseConfig::CharNgram {
                side: CharSide::Suffix,
                begin: 0,
                end: 2,
                lowercase: true
            }
        );
    }

    #[test]
    fn test_built_extractors_run() {
        let extractors = FeaturesConfig::from_toml_str(CONFIG)
            .unwrap()
            .build()
            .unwrap();
        let (doc, focus) = fixtures::sentence();

        let mut features = Vec::new();
        for extractor in &extractors {
            features.extend(extractor.extract(&doc, &focus).unwrap());
        }
        insta::assert_snapshot!(FeatureListDisplay::new(&features), @r###"
        Preceding_0_2_1_TypePath(Pos)   = JJ
        Preceding_0_2_0_TypePath(Pos)   = NN
        Bag_Following_1_3_TypePath(Pos) = JJ
        Bag_Following_1_3_TypePath(Pos) = NN
        Ngrams_2_Covered_Suffix_0_2     = ed_er
        "###);
    }

    #[test]
    fn test_invalid_range_is_reported() {
        let err = FeaturesConfig::from_toml_str(
            r#"
            [[extractor]]
            target = "Token"
            base = { kind = "covered_text" }
            contexts = [{ kind = "following", begin = 3, end = 3 }]
            "#,
        )
        .unwrap()
        .build()
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidRange {
                context: "Following",
                begin: 3,
                end: 3
            }
        ));
    }

    #[test]
    fn test_unresolved_type_path_is_reported() {
        let err = FeaturesConfig::from_toml_str(
            r#"
            [schema.Token]
            pos = "str"

            [[extractor]]
            target = "Token"
            base = { kind = "type_path", path = "lemma" }
            contexts = [{ kind = "focus" }]
            "#,
        )
        .unwrap()
        .build()
        .unwrap_err();
        assert!(matches!(err, ConfigError::UnresolvedPath { .. }));
    }

    #[test]
    fn test_zero_width_ngrams_is_reported() {
        let err = ContextConfig::Ngrams {
            n: 0,
            contexts: vec![ContextConfig::Covered],
        }
        .build()
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNgramWidth { .. }));
    }

    #[test]
    fn test_empty_config_is_rejected() {
        let err = FeaturesConfig::default().build().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_unknown_kind_is_a_parse_error() {
        let err = FeaturesConfig::from_toml_str(
            r#"
            [[extractor]]
            target = "Token"
            base = { kind = "covered_text" }
            contexts = [{ kind = "sideways", end = 2 }]
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CONFIG.as_bytes()).unwrap();

        let config = FeaturesConfig::load(file.path()).unwrap();
        assert_eq!(config.build().unwrap().len(), 2);

        let missing = FeaturesConfig::load(Path::new("/nonexistent/features.toml"));
        assert!(matches!(missing, Err(ConfigError::Io(_))));
    }
}
