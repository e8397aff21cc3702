use layered_features::{AttrValue, Document, FieldKind, Schema, Span, TypePath};

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

pub fn document() -> Document {
    let mut builder = Document::builder("fox", TEXT);
    for &(begin, end, pos) in TOKENS.iter() {
        builder.add_annotated(
            Span::new("Token", begin, end),
            vec![("pos", AttrValue::from(pos))],
        );
    }
    builder.build()
}

/// The whole sentence and the chunk "jumped over".
pub fn sentence_and_chunk() -> (Span, Span) {
    (Span::new("Sentence", 0, TEXT.len()), Span::new("Chunk", 20, 31))
}

pub fn token(doc: &Document, idx: usize) -> Span {
    doc.spans("Token")[idx].clone()
}

pub fn pos() -> TypePath {
    let schema = Schema::new().with_type("Token", vec![("pos", FieldKind::Str)]);
    TypePath::new(&schema, "Token", "pos").unwrap()
}
