//! Stage 3: the parser driver — a stack of small cooperating parser states.
//!
//! [`Markup`] owns the element stack and the parser stack (spec §4.3). Each
//! incoming [`PositionedToken`] is delivered to the top-of-stack state's
//! `grok`; that state mutates the tree via `Markup` and may push, pop, or
//! replace states, optionally re-delivering the same (or buffered) tokens
//! to whatever ends up on top.

mod inline;
mod link;
mod list;
mod modeline;
mod section;
mod state;
mod verbatim;

pub use list::ListParser;
pub use state::ParserState;

use std::collections::VecDeque;

use once_cell::sync::Lazy;
use std::collections::HashSet;

use crate::cleaner::{Position, TextCleaner};
use crate::element::{Content, Element};
use crate::error::ParseError;
use crate::options::MarkupOptions;
use crate::tokenizer::{HighToken, IndentControl, PositionedToken, Tokenizer};

/// Sigils escapable after a `\` (spec §6 "Escaped literal").
pub(crate) static ESCAPABLE: Lazy<HashSet<char>> = Lazy::new(|| {
    ['\\', '{', '}', '*', '-', '#', '[', ']', '<', '|', '%']
        .into_iter()
        .collect()
});

/// What a `grok` call asks the driver to do with the parser stack next.
pub(crate) enum GrokAction {
    /// Keep the current state on top; token fully consumed.
    Continue,
    /// Keep the current state beneath, push a new state on top of it.
    Push(ParserState),
    /// Same as `Push`, but re-deliver this same token to the new top.
    PushAndRedeliver(ParserState, PositionedToken),
    /// This state is finished; do not restore it (it already closed its
    /// element, if any).
    Pop,
    /// Same as `Pop`, but re-deliver the token to whatever is now on top.
    PopAndRedeliver(PositionedToken),
    /// Swap the current state out for a new one (same position in the
    /// stack).
    Replace(ParserState),
    /// Swap out for a new state, then re-deliver buffered tokens (oldest
    /// first) to it.
    ReplaceAndRedeliver(ParserState, Vec<PositionedToken>),
    /// Pop `n` states off the stack without restoring any of them (closing
    /// a named section also terminates the nested document it opened).
    PopN(usize),
}

/// Owns the element stack and the parser stack for a single parse.
pub struct Markup<'a> {
    element_stack: Vec<Element>,
    parser_stack: Vec<ParserState>,
    tokenizer: Tokenizer,
    options: &'a MarkupOptions,
}

impl<'a> Markup<'a> {
    fn new(tokenizer: Tokenizer, options: &'a MarkupOptions) -> Self {
        Markup {
            element_stack: vec![Element::new("body")],
            parser_stack: vec![ParserState::Document(state::DocumentParser {
                brace_is_eof: false,
                is_nested_section: false,
            })],
            tokenizer,
            options,
        }
    }

    pub(crate) fn options(&self) -> &MarkupOptions {
        self.options
    }

    pub(crate) fn add_indentation(&mut self, delta: i64) {
        self.tokenizer.add_indentation(delta);
    }

    pub(crate) fn open_element(&mut self, tag: impl Into<String>) {
        self.element_stack.push(Element::new(tag));
    }

    pub(crate) fn current_element_tag(&self) -> &str {
        &self.element_stack.last().expect("element stack never empty").tag
    }

    /// Close the top-of-stack element, asserting it is tagged `expected_tag`
    /// (spec §3 "an element is closed exactly once; closing a non-top-of-
    /// stack element is an error").
    pub(crate) fn close_element(
        &mut self,
        expected_tag: &str,
        position: Position,
    ) -> Result<(), ParseError> {
        if self.element_stack.len() < 2 {
            return Err(ParseError::structural(
                position,
                "cannot close the document root",
            ));
        }
        let top_tag = self.element_stack.last().unwrap().tag.clone();
        if top_tag != expected_tag {
            return Err(ParseError::structural(
                position,
                format!(
                    "attempted to close `{}` but `{}` is on top of the element stack",
                    expected_tag, top_tag
                ),
            ));
        }
        let closed = self.element_stack.pop().unwrap();
        log::debug!("closed element `{}`", closed.tag);
        self.element_stack.last_mut().unwrap().push_child(closed);
        Ok(())
    }

    pub(crate) fn push_text(&mut self, text: &str) {
        self.element_stack.last_mut().unwrap().push_text(text);
    }

    /// Collapse `p > link` into `link_def` (used by
    /// [`link::AmbiguousLinkParser`] once a trailing `<url>` confirms this
    /// provisional paragraph was actually a link definition): the `link`
    /// child built so far becomes the `link_def` element itself, since a
    /// link definition's key/text live directly on it rather than behind a
    /// nested `link` wrapper.
    pub(crate) fn retag_wrapping_link_as_def(&mut self) {
        let top = self.element_stack.last_mut().unwrap();
        top.tag = "link_def".to_string();
        if let Some(Content::Element(link)) = top.children.pop() {
            top.children = link.children;
        }
    }

    fn deliver(&mut self, token: PositionedToken) -> Result<(), ParseError> {
        let mut pending: VecDeque<PositionedToken> = VecDeque::new();
        pending.push_back(token);
        while let Some(tok) = pending.pop_front() {
            let mut state = self.parser_stack.pop().ok_or_else(|| {
                ParseError::structural(tok.position, "parser stack underflow")
            })?;
            log::trace!("grok: {:?} <- {:?}", state, tok.token);
            let action = state.grok(self, tok)?;
            match action {
                GrokAction::Continue => self.parser_stack.push(state),
                GrokAction::Push(new_state) => {
                    self.parser_stack.push(state);
                    log::debug!("push parser {:?}", new_state);
                    self.parser_stack.push(new_state);
                }
                GrokAction::PushAndRedeliver(new_state, t) => {
                    self.parser_stack.push(state);
                    log::debug!("push parser {:?}", new_state);
                    self.parser_stack.push(new_state);
                    pending.push_front(t);
                }
                GrokAction::Pop => {}
                GrokAction::PopAndRedeliver(t) => {
                    pending.push_front(t);
                }
                GrokAction::Replace(new_state) => {
                    log::debug!("replace parser with {:?}", new_state);
                    self.parser_stack.push(new_state);
                }
                GrokAction::ReplaceAndRedeliver(new_state, tokens) => {
                    log::debug!("replace parser with {:?}", new_state);
                    self.parser_stack.push(new_state);
                    for t in tokens.into_iter().rev() {
                        pending.push_front(t);
                    }
                }
                GrokAction::PopN(n) => {
                    for _ in 1..n {
                        self.parser_stack.pop();
                    }
                }
            }
        }
        Ok(())
    }

    fn run(&mut self) -> Result<Element, ParseError> {
        loop {
            let next = self.tokenizer.next();
            match next {
                Some(tok) => self.deliver(tok)?,
                None => break,
            }
        }
        if self.element_stack.len() != 1 {
            return Err(ParseError::structural(
                Position::new(0, 0),
                format!(
                    "{} element(s) left open at end of input",
                    self.element_stack.len() - 1
                ),
            ));
        }
        Ok(self.element_stack.pop().unwrap())
    }
}

/// Parse `input`, without link resolution (see [`crate::parse`] for the
/// full pipeline including link resolution).
pub fn parse_document(input: &str, options: &MarkupOptions) -> Result<Element, ParseError> {
    let cleaned = TextCleaner::new(input.chars().collect::<Vec<_>>().into_iter(), options.tabwidth);
    let tokenizer = Tokenizer::new(cleaned);
    let mut markup = Markup::new(tokenizer, options);
    markup.run()
}

/// The block-level dispatch shared by `DocumentParser` and
/// `IndentedElementParser` (spec §4.3: "mirrors DocumentParser's block-level
/// dispatch").
pub(crate) fn dispatch_block_start(
    markup: &mut Markup,
    token: PositionedToken,
    brace_is_eof: bool,
    section_aware: bool,
    is_nested_section: bool,
) -> Result<GrokAction, ParseError> {
    use state::*;

    match token.token {
        HighToken::Blank | HighToken::Newline => Ok(GrokAction::Continue),
        HighToken::Char('*') => Ok(GrokAction::Push(ParserState::Header(HeaderParser {
            level: 1,
            brace_is_eof,
        }))),
        HighToken::Char('-') => Ok(GrokAction::Push(ParserState::PossibleModeline(
            modeline::PossibleModelineParser {
                buffer: vec![token],
                star_count: 1,
            },
        ))),
        HighToken::OpenBlockquote => Ok(GrokAction::Push(ParserState::BlockquoteOrList(
            list::BlockquoteOrListParser,
        ))),
        HighToken::OpenVerbatim => {
            markup.open_element("pre");
            Ok(GrokAction::Push(ParserState::Verbatim(
                verbatim::VerbatimParser { blank_count: 0 },
            )))
        }
        HighToken::Char('[') => {
            markup.open_element("p"); // provisional tag; AmbiguousLinkParser retags it
            markup.open_element("link");
            Ok(GrokAction::Push(ParserState::AmbiguousLink(
                link::AmbiguousLinkParser {
                    brace_is_eof,
                    phase: link::AmbiguousLinkPhase::InBrackets { in_key: false },
                },
            )))
        }
        HighToken::Char('}') if brace_is_eof => {
            let tag = markup.current_element_tag().to_string();
            markup.close_element(&tag, token.position)?;
            Ok(GrokAction::Pop)
        }
        HighToken::Char('#') if section_aware && !is_nested_section => Ok(GrokAction::Push(
            ParserState::SectionStart(section::SectionStartParser {
                brace_is_eof,
                buffer: vec![token],
            }),
        )),
        HighToken::Char('#') if section_aware && is_nested_section => Ok(GrokAction::Push(
            ParserState::SectionEnd(section::SectionEndParser {
                brace_is_eof,
                buffer: vec![token],
                phase: 0,
            }),
        )),
        _ => {
            markup.open_element("p");
            Ok(GrokAction::PushAndRedeliver(
                ParserState::Paragraph(state::ParagraphParser {
                    brace_is_eof,
                    pending_space: false,
                }),
                token,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_closes_cleanly() {
        let doc = parse_document("hello", &MarkupOptions::default()).unwrap();
        assert_eq!(doc.tag, "body");
    }
}
