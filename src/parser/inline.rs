//! Inline escapes and brace-delimited elements (spec §4.3, §6).

use crate::error::ParseError;
use crate::tokenizer::{HighToken, PositionedToken};

use super::state::ParserState;
use super::{GrokAction, Markup, ESCAPABLE};

/// Sees exactly one token after a `\`: either a literal escaped sigil, or
/// the first character of a brace-tag name.
#[derive(Debug)]
pub struct SlashParser;

impl SlashParser {
    pub(crate) fn grok(
        &mut self,
        markup: &mut Markup,
        token: PositionedToken,
    ) -> Result<GrokAction, ParseError> {
        match token.token {
            HighToken::Char(c) if ESCAPABLE.contains(&c) => {
                markup.push_text(&c.to_string());
                Ok(GrokAction::Pop)
            }
            HighToken::Char(c) => Ok(GrokAction::Replace(ParserState::Name(NameParser {
                buffer: c.to_string(),
            }))),
            other => Err(ParseError::structural(
                token.position,
                format!("`\\` must be followed by a character, got {:?}", other),
            )),
        }
    }
}

/// Accumulates a tag name until `{`, then opens the element — a nested
/// document if the name is a registered subdoc tag, otherwise an ordinary
/// brace-delimited inline element.
#[derive(Debug)]
pub struct NameParser {
    pub buffer: String,
}

impl NameParser {
    pub(crate) fn grok(
        &mut self,
        markup: &mut Markup,
        token: PositionedToken,
    ) -> Result<GrokAction, ParseError> {
        match token.token {
            HighToken::Char('{') => {
                let tag = std::mem::take(&mut self.buffer);
                let is_subdoc = markup.options().subdocs.contains(&tag);
                markup.open_element(tag);
                if is_subdoc {
                    Ok(GrokAction::Replace(ParserState::Document(
                        super::state::DocumentParser {
                            brace_is_eof: true,
                            is_nested_section: false,
                        },
                    )))
                } else {
                    Ok(GrokAction::Replace(ParserState::BraceDelimited(
                        BraceDelimitedParser,
                    )))
                }
            }
            HighToken::Char(c) => {
                self.buffer.push(c);
                Ok(GrokAction::Continue)
            }
            other => Err(ParseError::structural(
                token.position,
                format!("expected `{{` to end tag name, got {:?}", other),
            )),
        }
    }
}

/// Body of an inline brace-delimited element: same escapes and link syntax
/// as a paragraph, but no block-level constructs, closing on `}`.
#[derive(Debug)]
pub struct BraceDelimitedParser;

impl BraceDelimitedParser {
    pub(crate) fn grok(
        &mut self,
        markup: &mut Markup,
        token: PositionedToken,
    ) -> Result<GrokAction, ParseError> {
        match token.token {
            HighToken::Char('}') => {
                let tag = markup.current_element_tag().to_string();
                markup.close_element(&tag, token.position)?;
                Ok(GrokAction::Pop)
            }
            HighToken::Char('\\') => Ok(GrokAction::Push(ParserState::Slash(SlashParser))),
            HighToken::Char('[') => {
                markup.open_element("link");
                Ok(GrokAction::Push(ParserState::Link(
                    super::link::LinkParser { in_key: false },
                )))
            }
            HighToken::Newline => {
                markup.push_text(" ");
                Ok(GrokAction::Continue)
            }
            HighToken::Space => {
                markup.push_text(" ");
                Ok(GrokAction::Continue)
            }
            HighToken::Char(c) => {
                markup.push_text(&c.to_string());
                Ok(GrokAction::Continue)
            }
            other => Err(ParseError::structural(
                token.position,
                format!("unexpected {:?} inside brace-delimited element", other),
            )),
        }
    }
}
