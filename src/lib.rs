//! # markup
//!
//!     A parser for a lightweight, indentation-sensitive plain text markup
//!     language. Turns a `&str` into a tree of tagged [`Element`]s that a
//!     renderer can walk; this crate does not render.
//!
//! Parser Architecture
//!
//!     The parser is a three-stage pipeline, leaves first:
//!
//!     1. [`cleaner`] - Unicode scalars to position-tagged characters
//!        (tab expansion, line-ending normalization, trailing-whitespace trim).
//!     2. [`tokenizer`] - characters to semantic tokens (blank/newline
//!        collapsing, indentation-driven blockquote/verbatim open/close).
//!     3. [`parser`] - a stack of small cooperating parser states walks the
//!        token stream and builds the [`element`] tree.
//!
//!     A post-pass in [`element`] resolves link definitions against link
//!     occurrences.
//!
//! Getting Started
//!
//!     - [`parse`] is the entry point.
//!     - [`Element`] is the tree the parser produces.
//!     - [`Visitor`] is the interface a renderer implements to walk it.

pub mod cleaner;
pub mod element;
pub mod error;
pub mod options;
pub mod parser;
pub mod tokenizer;
pub mod visitor;

pub use element::Element;
pub use error::ParseError;
pub use options::{MarkupOptions, RenderOptions};
pub use visitor::Visitor;

/// Parse `input` into an element tree, resolving link definitions.
///
/// The returned tree's outermost element is tagged `body`. Any `link_def`
/// children are removed and substituted into matching `link` occurrences
/// (see [`element::link_defs_mut`]).
pub fn parse(input: &str, options: &MarkupOptions) -> Result<Element, ParseError> {
    let mut doc = parser::parse_document(input, options)?;
    let defs = element::link_defs_mut(&mut doc);
    element::resolve_links(&mut doc, &defs);
    Ok(doc)
}

/// Byte-oriented entry point for callers that haven't already validated
/// UTF-8 (e.g. raw file contents). Fails fast with [`ParseError::InvalidUtf8`]
/// before any parsing begins if `input` isn't valid UTF-8; otherwise behaves
/// exactly like [`parse`].
pub fn parse_bytes(input: &[u8], options: &MarkupOptions) -> Result<Element, ParseError> {
    let text = std::str::from_utf8(input).map_err(|_| {
        log::error!("input is not valid UTF-8");
        ParseError::InvalidUtf8
    })?;
    parse(text, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_two_paragraphs() {
        let doc = parse("abc\n\nefg", &MarkupOptions::default()).unwrap();
        assert_eq!(doc.to_sexpr_string(), r#"[body, [p, "abc"], [p, "efg"]]"#);
    }

    #[test]
    fn scenario_tab_opens_verbatim() {
        let mut opts = MarkupOptions::default();
        opts.tabwidth = 4;
        let doc = parse("\tabc", &opts).unwrap();
        assert_eq!(doc.to_sexpr_string(), r#"[body, [pre, " abc"]]"#);
    }

    #[test]
    fn scenario_unordered_list() {
        let doc = parse("- one\n- two\n", &MarkupOptions::default()).unwrap();
        assert_eq!(
            doc.to_sexpr_string(),
            r#"[body, [ul, [li, [p, "one"]], [li, [p, "two"]]]]"#
        );
    }

    #[test]
    fn scenario_header_and_paragraph() {
        let doc = parse("* Title\n\nBody.\n", &MarkupOptions::default()).unwrap();
        assert_eq!(
            doc.to_sexpr_string(),
            r#"[body, [h1, "Title"], [p, "Body."]]"#
        );
    }

    #[test]
    fn scenario_crlf_normalizes() {
        let doc = parse("abc\r\n\r\nefg", &MarkupOptions::default()).unwrap();
        assert_eq!(doc.to_sexpr_string(), r#"[body, [p, "abc"], [p, "efg"]]"#);
    }

    #[test]
    fn parse_bytes_rejects_invalid_utf8() {
        let invalid = [b'a', b'b', 0xff, 0xfe];
        let err = parse_bytes(&invalid, &MarkupOptions::default()).unwrap_err();
        assert_eq!(err, ParseError::InvalidUtf8);
    }

    #[test]
    fn parse_bytes_accepts_valid_utf8() {
        let doc = parse_bytes("abc\n\nefg".as_bytes(), &MarkupOptions::default()).unwrap();
        assert_eq!(doc.to_sexpr_string(), r#"[body, [p, "abc"], [p, "efg"]]"#);
    }
}
