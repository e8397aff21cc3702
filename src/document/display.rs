use std::fmt::{self, Write};

use unicode_width::UnicodeWidthChar;

use super::Document;
use crate::{AttrValue, Span};

/// Renders a document with the spans of selected layers drawn under it.
///
/// ```text
/// The quick brown fox
///           ╰───╯Token pos=JJ
///                 ╰─╯Token pos=NN
/// ```
pub struct DocumentDisplay<'a> {
    document: &'a Document,
    include_types: Vec<String>,
    show_attrs: bool,
}

impl<'a> DocumentDisplay<'a> {
    pub fn new(document: &'a Document) -> Self {
        Self {
            document,
            include_types: Vec::new(),
            show_attrs: true,
        }
    }

    /// Draw every span of this type.
    pub fn include(&mut self, span_type: &str) -> &mut Self {
        self.include_types.push(span_type.to_string());
        self
    }

    pub fn hide_attrs(&mut self) -> &mut Self {
        self.show_attrs = false;
        self
    }

    /// Display column of a character offset.
    fn column(text: &str, offset: usize) -> usize {
        let (seen, width) = text
            .chars()
            .take(offset)
            .fold((0, 0), |(seen, width), c| (seen + 1, width + c.width().unwrap_or(0)));
        width + (offset - seen)
    }

    fn label(&self, span: &Span) -> String {
        let mut label = span.span_type().to_string();
        if !self.show_attrs {
            return label;
        }
        if let Some(attrs) = self.document.attrs(span) {
            for (name, value) in attrs {
                let value = match value {
                    AttrValue::Str(s) => s.clone(),
                    AttrValue::Int(i) => i.to_string(),
                    AttrValue::Bool(b) => b.to_string(),
                    AttrValue::Float(f) => f.to_string(),
                    AttrValue::Span(target) => format!("{:?}", target),
                };
                let _ = write!(label, " {}={}", name, value);
            }
        }
        label
    }
}

impl<'a> fmt::Display for DocumentDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // one space per control character, so character offsets still line up
        let text: String = self
            .document
            .text()
            .chars()
            .map(|c| if c.is_control() { ' ' } else { c })
            .collect();
        f.write_str(text.trim_end())?;

        for span_type in &self.include_types {
            for span in self.document.spans(span_type) {
                f.write_char('\n')?;

                let start_col = Self::column(&text, span.begin());
                let end_col = Self::column(&text, span.end());
                for _ in 0..start_col {
                    f.write_char(' ')?;
                }

                f.write_char('╰')?;
                let char_len = end_col.saturating_sub(start_col);
                for _ in (start_col + 1)..end_col.saturating_sub(1) {
                    f.write_char('─')?;
                }
                if char_len > 1 {
                    f.write_char('╯')?;
                }

                f.write_str(&self.label(span))?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_tokens_with_attrs() {
        let mut builder = Document::builder("doc", "The quick fox");
        builder
            .add_annotated(Span::new("Token", 0, 3), vec![("pos", AttrValue::from("DT"))])
            .add_annotated(Span::new("Token", 4, 9), vec![("pos", AttrValue::from("JJ"))])
            .add_annotated(Span::new("Token", 10, 13), vec![("pos", AttrValue::from("NN"))]);
        let doc = builder.build();

        let mut display = DocumentDisplay::new(&doc);
        display.include("Token");

        insta::assert_snapshot!(display, @r###"
        The quick fox
        ╰─╯Token pos=DT
            ╰───╯Token pos=JJ
                  ╰─╯Token pos=NN
        "###);
    }

    #[test]
    fn test_display_after_multibyte_characters() {
        let mut builder = Document::builder("doc", "naïve\u{85}cat");
        builder
            .add_span(Span::new("Token", 0, 5))
            .add_span(Span::new("Token", 6, 9));
        let doc = builder.build();

        let mut display = DocumentDisplay::new(&doc);
        display.include("Token").hide_attrs();

        insta::assert_snapshot!(display, @r###"
        naïve cat
        ╰───╯Token
              ╰─╯Token
        "###);
    }

    #[test]
    fn test_display_zero_width_and_hidden_attrs() {
        let mut builder = Document::builder("doc", "ab cd");
        builder
            .add_annotated(Span::new("Marker", 2, 2), vec![("kind", AttrValue::from("gap"))])
            .add_span(Span::new("Chunk", 0, 5));
        let doc = builder.build();

        let mut display = DocumentDisplay::new(&doc);
        display.include("Chunk").include("Marker").hide_attrs();

        insta::assert_snapshot!(display, @r###"
        ab cd
        ╰───╯Chunk
          ╰Marker
        "###);
    }
}
