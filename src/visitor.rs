//! The tree-walk interface a renderer implements (spec §4.5).
//!
//! This crate performs no rendering itself: `divs`/`spans`/block-vs-inline
//! policy is entirely the renderer's call, driven by whatever options it
//! chooses to read out of [`crate::RenderOptions`].

use crate::element::{Content, Element};

/// Implemented by a renderer to walk an [`Element`] tree in pre-order.
pub trait Visitor {
    fn open_tag(&mut self, tag: &str, attrs: &[(String, String)]);
    fn text(&mut self, text: &str);
    fn close_tag(&mut self, tag: &str);
}

/// Walk `element` in pre-order, calling back into `visitor`.
///
/// A `link` element's `url` child (added during link resolution) is
/// consumed as the `href` attribute on `open_tag` rather than visited as a
/// child node.
pub fn walk(element: &Element, visitor: &mut dyn Visitor) {
    let mut attrs = Vec::new();
    if element.tag == "link" {
        if let Some(url) = find_child_tagged(element, "url") {
            attrs.push(("href".to_string(), url.concat_text()));
        }
    }
    visitor.open_tag(&element.tag, &attrs);
    for child in &element.children {
        match child {
            Content::Text(s) => visitor.text(s),
            Content::Element(e) => {
                if element.tag == "link" && e.tag == "url" {
                    continue;
                }
                walk(e, visitor);
            }
        }
    }
    visitor.close_tag(&element.tag);
}

fn find_child_tagged<'a>(element: &'a Element, tag: &str) -> Option<&'a Element> {
    element.children.iter().find_map(|c| match c {
        Content::Element(e) if e.tag == tag => Some(e),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<String>);

    impl Visitor for Recorder {
        fn open_tag(&mut self, tag: &str, attrs: &[(String, String)]) {
            if attrs.is_empty() {
                self.0.push(format!("open {}", tag));
            } else {
                self.0.push(format!("open {} {:?}", tag, attrs));
            }
        }
        fn text(&mut self, text: &str) {
            self.0.push(format!("text {:?}", text));
        }
        fn close_tag(&mut self, tag: &str) {
            self.0.push(format!("close {}", tag));
        }
    }

    #[test]
    fn walks_paragraph() {
        let mut body = Element::new("body");
        let mut p = Element::new("p");
        p.push_text("hi");
        body.push_child(p);

        let mut rec = Recorder::default();
        walk(&body, &mut rec);
        assert_eq!(
            rec.0,
            vec!["open body", "open p", "text \"hi\"", "close p", "close body"]
        );
    }

    #[test]
    fn link_url_becomes_href_attribute() {
        let mut link = Element::new("link");
        link.push_text("Foo");
        let mut url = Element::new("url");
        url.push_text("http://x");
        link.push_child(url);

        let mut rec = Recorder::default();
        walk(&link, &mut rec);
        assert_eq!(
            rec.0,
            vec![
                "open link [(\"href\", \"http://x\")]".to_string(),
                "text \"Foo\"".to_string(),
                "close link".to_string(),
            ]
        );
    }
}
