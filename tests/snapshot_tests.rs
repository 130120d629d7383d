//! Snapshot tests for the s-expression serialization of representative
//! documents: headers, nested lists, blockquote/verbatim interaction, named
//! sections, and link resolution (both resolved and left dangling).
//!
//! Snapshots are inline (`@"..."`) rather than `.snap` files on disk, so
//! there's nothing to review out of band — the expected tree lives right
//! next to the input that produces it.

use insta::assert_snapshot;
use markup::{parse, MarkupOptions};

fn sexpr(input: &str) -> String {
    parse(input, &MarkupOptions::default())
        .unwrap()
        .to_sexpr_string()
}

#[test]
fn headers_at_multiple_levels() {
    assert_snapshot!(
        sexpr("* A\n\n** B\n\n* C\n"),
        @r#"[body, [h1, "A"], [h2, "B"], [h1, "C"]]"#
    );
}

#[test]
fn list_item_containing_a_nested_list() {
    assert_snapshot!(
        sexpr("abc\n\n  - one\n\n      - nested\n  - two\n"),
        @r#"[body, [p, "abc"], [ul, [li, [p, "one"], [ul, [li, [p, "nested"]]]], [li, [p, "two"]]]]"#
    );
}

#[test]
fn blockquote_dedent_by_one_opens_verbatim() {
    // Indenting one column past an open blockquote's own level closes the
    // blockquote and opens a verbatim block instead of nesting deeper
    // (spec's documented surprising-but-preserved indentation rule).
    assert_snapshot!(
        sexpr("abc\n\n  quoted\n\n   code\n"),
        @r#"[body, [p, "abc"], [blockquote, [p, "quoted"]], [pre, "code"]]"#
    );
}

#[test]
fn named_section() {
    assert_snapshot!(
        sexpr("## greeting\n\nhi\n\n##.\n"),
        @r#"[body, [greeting, [p, "hi"]]]"#
    );
}

#[test]
fn link_resolves_against_a_definition() {
    assert_snapshot!(
        sexpr("[Foo|foo]\n\n[foo] <http://x>\n\n"),
        @r#"[body, [p, [link, "Foo", [url, "http://x"]]]]"#
    );
}

#[test]
fn link_with_no_matching_definition_stays_unresolved() {
    assert_snapshot!(sexpr("[Bar]\n\n"), @r#"[body, [p, [link, "Bar"]]]"#);
}
