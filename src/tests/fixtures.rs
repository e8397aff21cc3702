use tracing_subscriber::EnvFilter;

use crate::{AttrValue, Document, Feature, FieldKind, Schema, Span, TypePath};

pub const TEXT: &str = "The quick brown fox jumped over the lazy dog.";

const TOKENS: [(usize, usize, &str); 10] = [
    (0, 3, "DT"),
    (4, 9, "JJ"),
    (10, 15, "JJ"),
    (16, 19, "NN"),
    (20, 26, "VBD"),
    (27, 31, "IN"),
    (32, 35, "DT"),
    (36, 40, "JJ"),
    (41, 44, "NN"),
    (44, 45, "."),
];

/// POS-tagged tokens, one `Sentence`, and the `Chunk` "jumped over", which
/// is returned as the focus.
pub fn sentence() -> (Document, Span) {
    let focus = Span::new("Chunk", 20, 31);
    let mut builder = Document::builder("fox", TEXT);
    for &(begin, end, pos) in TOKENS.iter() {
        builder.add_annotated(
            Span::new("Token", begin, end),
            vec![("pos", AttrValue::from(pos))],
        );
    }
    builder
        .add_span(Span::new("Sentence", 0, TEXT.len()))
        .add_span(focus.clone());
    (builder.build(), focus)
}

/// Two sentences, for bounds tests: "The cat sat." and "It purred."
pub fn two_sentences() -> Document {
    let mut builder = Document::builder("cat", "The cat sat. It purred.");
    builder
        .add_span(Span::new("Token", 0, 3))
        .add_span(Span::new("Token", 4, 7))
        .add_span(Span::new("Token", 8, 11))
        .add_span(Span::new("Token", 11, 12))
        .add_span(Span::new("Token", 13, 15))
        .add_span(Span::new("Token", 16, 22))
        .add_span(Span::new("Token", 22, 23))
        .add_span(Span::new("Sentence", 0, 12))
        .add_span(Span::new("Sentence", 13, 23));
    builder.build()
}

pub fn token(doc: &Document, idx: usize) -> Span {
    doc.spans("Token")[idx].clone()
}

pub fn schema() -> Schema {
    Schema::new().with_type("Token", vec![("pos", FieldKind::Str)])
}

pub fn pos() -> TypePath {
    TypePath::new(&schema(), "Token", "pos").unwrap()
}

pub fn values(features: &[Feature]) -> Vec<String> {
    features.iter().map(|f| f.value.to_string()).collect()
}

/// Capture tracing output in test logs; `RUST_LOG` overrides the level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace")),
        )
        .with_test_writer()
        .try_init();
}
