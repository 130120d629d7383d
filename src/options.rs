//! Constructor options for the parser and for host renderers.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Options controlling how [`crate::parse`] behaves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkupOptions {
    /// Tags that, when opened via `\name{...}`, run a nested block parser
    /// (a [`crate::parser::DocumentParser`]) instead of an inline-only one.
    #[serde(default)]
    pub subdocs: HashSet<String>,
    /// Number of spaces a tab expands to. Default 8.
    #[serde(default = "default_tabwidth")]
    pub tabwidth: usize,
}

fn default_tabwidth() -> usize {
    8
}

impl Default for MarkupOptions {
    fn default() -> Self {
        MarkupOptions {
            subdocs: HashSet::new(),
            tabwidth: default_tabwidth(),
        }
    }
}

/// Options a host renderer may use when walking the tree via [`crate::Visitor`].
///
/// This crate performs no rendering; `RenderOptions` exists only as a
/// convenience carrier for the policy spec.md §6 says a renderer owns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Tags that should be surrounded by newlines (block-level) rather than
    /// flowed inline.
    #[serde(default)]
    pub block_elements: HashSet<String>,
    /// Tags that should be rewritten as `<div class="name">`.
    #[serde(default)]
    pub divs: HashSet<String>,
    /// Tags that should be rewritten as `<span class="name">`.
    #[serde(default)]
    pub spans: HashSet<String>,
}
