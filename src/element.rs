//! The parsed element tree, and the link-definition resolution pass.
//!
//! An [`Element`] is a rose tree: a tag plus an ordered sequence of child
//! elements or text. Adjacent text children are always coalesced (spec §3).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A node in the parsed tree: `(tag, children)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub tag: String,
    pub children: Vec<Content>,
}

/// A child of an [`Element`]: either a nested element or a text run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    Element(Element),
    Text(String),
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Element {
            tag: tag.into(),
            children: Vec::new(),
        }
    }

    /// Append `text`, extending the last child if it is already text
    /// (spec §3 "adjacent string children are coalesced").
    pub fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(Content::Text(last)) = self.children.last_mut() {
            last.push_str(text);
        } else {
            self.children.push(Content::Text(text.to_string()));
        }
    }

    pub fn push_child(&mut self, child: Element) {
        self.children.push(Content::Element(child));
    }

    /// The concatenated text of every `Text` child, recursing into nested
    /// elements (used as a link's fallback key, and to read a `url` node's
    /// content).
    pub fn concat_text(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            match child {
                Content::Text(s) => out.push_str(s),
                Content::Element(e) => out.push_str(&e.concat_text()),
            }
        }
        out
    }

    /// Remove and return the first child element tagged `tag`, if any.
    pub fn take_child_tagged(&mut self, tag: &str) -> Option<Element> {
        let idx = self.children.iter().position(|c| match c {
            Content::Element(e) => e.tag == tag,
            Content::Text(_) => false,
        })?;
        match self.children.remove(idx) {
            Content::Element(e) => Some(e),
            Content::Text(_) => unreachable!(),
        }
    }

    /// Serialize as the s-expression-like list form from spec §6:
    /// `[tag, child, child, ...]` where a text child is a quoted string.
    pub fn to_sexpr_string(&self) -> String {
        let mut out = String::new();
        self.write_sexpr(&mut out);
        out
    }

    fn write_sexpr(&self, out: &mut String) {
        out.push('[');
        out.push_str(&self.tag);
        for child in &self.children {
            out.push_str(", ");
            match child {
                Content::Text(s) => {
                    out.push('"');
                    for c in s.chars() {
                        match c {
                            '"' => out.push_str("\\\""),
                            '\\' => out.push_str("\\\\"),
                            '\n' => out.push_str("\\n"),
                            other => out.push(other),
                        }
                    }
                    out.push('"');
                }
                Content::Element(e) => e.write_sexpr(out),
            }
        }
        out.push(']');
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = String::new();
        self.write_sexpr(&mut s);
        f.write_str(&s)
    }
}

/// Extract an explicit `key` child's text (removing it), falling back to
/// the element's own concatenated text if it has none (spec §4.4
/// `link_key!`).
pub fn link_key_mut(element: &mut Element) -> String {
    if let Some(key) = element.take_child_tagged("key") {
        key.concat_text()
    } else {
        element.concat_text()
    }
}

/// Destructively extract every top-level `link_def` child of `doc` into a
/// `key -> url` mapping (spec §4.4 `link_defs!`). `link_def` nodes are only
/// ever children of the outermost document (spec §3), so this only looks at
/// `doc`'s direct children.
pub fn link_defs_mut(doc: &mut Element) -> HashMap<String, String> {
    let mut defs = HashMap::new();
    let mut i = 0;
    while i < doc.children.len() {
        let is_link_def = matches!(&doc.children[i], Content::Element(e) if e.tag == "link_def");
        if !is_link_def {
            i += 1;
            continue;
        }
        let mut def = match doc.children.remove(i) {
            Content::Element(e) => e,
            Content::Text(_) => unreachable!(),
        };
        let url = def
            .take_child_tagged("url")
            .map(|u| u.concat_text())
            .unwrap_or_default();
        let key = link_key_mut(&mut def);
        defs.insert(key, url);
    }
    defs
}

/// Substitute every `link` occurrence in the tree with the URL looked up by
/// its key (spec §4.4, §8 invariant 6). A `link` whose key has no matching
/// definition is left as-is (see SPEC_FULL.md Open Questions) and logged.
pub fn resolve_links(element: &mut Element, defs: &HashMap<String, String>) {
    for child in &mut element.children {
        if let Content::Element(e) = child {
            if e.tag == "link" {
                let key = link_key_mut(e);
                match defs.get(&key) {
                    Some(url) => {
                        let mut url_el = Element::new("url");
                        url_el.push_text(url);
                        e.push_child(url_el);
                    }
                    None => {
                        log::warn!("unresolved link key {:?}", key);
                        // Leave the text content as-is (the key we just
                        // removed carried no display text of its own).
                    }
                }
            }
            resolve_links(e, defs);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coalesces_adjacent_text() {
        let mut e = Element::new("p");
        e.push_text("a");
        e.push_text("b");
        assert_eq!(e.children, vec![Content::Text("ab".to_string())]);
    }

    #[test]
    fn sexpr_serializes_nested_shape() {
        let mut body = Element::new("body");
        let mut p = Element::new("p");
        p.push_text("abc");
        body.push_child(p);
        assert_eq!(body.to_sexpr_string(), r#"[body, [p, "abc"]]"#);
    }

    /// Round-trip (spec.md §8): JSON ser/de recovers an equal tree. This
    /// crate has no s-expression parser to invert `to_sexpr_string`, so the
    /// property is grounded in the `serde` round trip instead.
    #[test]
    fn json_roundtrip_recovers_tree() {
        let mut body = Element::new("body");
        let mut p = Element::new("p");
        p.push_text("abc");
        body.push_child(p);
        let json = serde_json::to_string(&body).unwrap();
        let restored: Element = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, body);
    }

    #[test]
    fn link_resolution_substitutes_url() {
        let mut doc = Element::new("body");
        let mut def = Element::new("link_def");
        def.push_text("foo");
        let mut url = Element::new("url");
        url.push_text("http://x");
        def.push_child(url);
        doc.push_child(def);

        let mut p = Element::new("p");
        let mut link = Element::new("link");
        link.push_text("Foo");
        let mut key = Element::new("key");
        key.push_text("foo");
        link.push_child(key);
        p.push_child(link);
        doc.push_child(p);

        let defs = link_defs_mut(&mut doc);
        resolve_links(&mut doc, &defs);

        assert_eq!(
            doc.to_sexpr_string(),
            r#"[body, [p, [link, "Foo", [url, "http://x"]]]]"#
        );
    }

    #[test]
    fn unresolved_link_left_in_place() {
        let mut doc = Element::new("body");
        let mut link = Element::new("link");
        link.push_text("Foo");
        doc.push_child(link);
        let defs = link_defs_mut(&mut doc);
        resolve_links(&mut doc, &defs);
        assert_eq!(doc.to_sexpr_string(), r#"[body, [link, "Foo"]]"#);
    }
}
