//! Table-driven scenario tests (spec.md §8 scenarios, plus additional
//! link/list/verbatim/section cases).

use markup::{parse, MarkupOptions};
use rstest::rstest;

#[rstest]
#[case::two_paragraphs("abc\n\nefg", r#"[body, [p, "abc"], [p, "efg"]]"#)]
#[case::unordered_list(
    "- one\n- two\n",
    r#"[body, [ul, [li, [p, "one"]], [li, [p, "two"]]]]"#
)]
#[case::header_and_paragraph(
    "* Title\n\nBody.\n",
    r#"[body, [h1, "Title"], [p, "Body."]]"#
)]
#[case::crlf_normalizes("abc\r\n\r\nefg", r#"[body, [p, "abc"], [p, "efg"]]"#)]
// An ordered/definition list is only reachable nested one indentation
// level deep (`BlockquoteOrListParser` is pushed in reaction to
// `OpenBlockquote`); at true document top level `#`/`%` have no list
// meaning of their own (`#` opens/closes a named section instead).
#[case::nested_ordered_list(
    "abc\n\n  # one\n  # two\n",
    r#"[body, [p, "abc"], [ol, [li, [p, "one"]], [li, [p, "two"]]]]"#
)]
#[case::blockquote(
    "abc\n\n  def\n",
    r#"[body, [p, "abc"], [blockquote, [p, "def"]]]"#
)]
#[case::nested_definition_list(
    "abc\n\n  % term\n    definition\n",
    r#"[body, [p, "abc"], [dl, [dt, "term"], [dd, [p, "definition"]]]]"#
)]
#[case::list_then_paragraph(
    "- one\n\npara after\n",
    r#"[body, [ul, [li, [p, "one"]]], [p, "para after"]]"#
)]
#[case::named_section(
    "## greeting\n\nhi\n\n##.\n",
    r#"[body, [greeting, [p, "hi"]]]"#
)]
#[case::link_resolution(
    "[Foo|foo]\n\n[foo] <http://x>\n\n",
    r#"[body, [p, [link, "Foo", [url, "http://x"]]]]"#
)]
#[case::escaped_literal("\\*not a header\n", r#"[body, [p, "*not a header"]]"#)]
#[case::verbatim_block(
    "abc\n\n   line one\n   line two\n",
    "[body, [p, \"abc\"], [pre, \"line one\\nline two\"]]"
)]
// A single interior blank line inside a verbatim block tokenizes to one
// `Blank` (blank_count = 1) and must survive as a literal empty line: k
// pending blanks flush as k+1 newlines, not k.
#[case::verbatim_block_with_interior_blank_line(
    "abc\n\n   line one\n\n   line two\n",
    "[body, [p, \"abc\"], [pre, \"line one\\n\\nline two\"]]"
)]
#[case::modeline_discarded(
    "-*- mode: text -*-\n\nabc\n",
    r#"[body, [p, "abc"]]"#
)]
fn scenario(#[case] input: &str, #[case] expected: &str) {
    let doc = parse(input, &MarkupOptions::default()).unwrap();
    assert_eq!(doc.to_sexpr_string(), expected);
}
