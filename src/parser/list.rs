//! Blockquotes, unordered/ordered lists, and definition lists — everything
//! pushed in reaction to an `OpenBlockquote` token (spec §4.3).

use crate::error::ParseError;
use crate::tokenizer::{HighToken, PositionedToken};

use super::state::{IndentedElementParser, ParserState};
use super::{GrokAction, Markup};

/// The first token after `OpenBlockquote` decides what kind of indented
/// construct this is.
#[derive(Debug)]
pub struct BlockquoteOrListParser;

impl BlockquoteOrListParser {
    pub(crate) fn grok(
        &mut self,
        markup: &mut Markup,
        token: PositionedToken,
    ) -> Result<GrokAction, ParseError> {
        match token.token {
            HighToken::Char('#') => {
                markup.open_element("ol");
                Ok(GrokAction::ReplaceAndRedeliver(
                    ParserState::List(ListParser { marker: '#' }),
                    vec![token],
                ))
            }
            HighToken::Char('-') => {
                markup.open_element("ul");
                Ok(GrokAction::ReplaceAndRedeliver(
                    ParserState::List(ListParser { marker: '-' }),
                    vec![token],
                ))
            }
            HighToken::Char('%') => {
                markup.open_element("dl");
                Ok(GrokAction::ReplaceAndRedeliver(
                    ParserState::DefinitionList(DefinitionListParser),
                    vec![token],
                ))
            }
            _ => {
                markup.open_element("blockquote");
                Ok(GrokAction::ReplaceAndRedeliver(
                    ParserState::IndentedElement(IndentedElementParser { started: false }),
                    vec![token],
                ))
            }
        }
    }
}

/// An unordered (`-`) or ordered (`#`) list.
#[derive(Debug)]
pub struct ListParser {
    pub marker: char,
}

impl ListParser {
    pub(crate) fn grok(
        &mut self,
        markup: &mut Markup,
        token: PositionedToken,
    ) -> Result<GrokAction, ParseError> {
        match token.token {
            HighToken::Char(c) if c == self.marker => {
                Ok(GrokAction::Push(ParserState::TokenEater(TokenEater {
                    expected: HighToken::Space,
                    continuation: TokenEaterContinuation::OpenListItem {
                        tag: "li",
                        indent_bump: 2,
                    },
                })))
            }
            HighToken::Blank => {
                let tag = markup.current_element_tag().to_string();
                markup.close_element(&tag, token.position)?;
                Ok(GrokAction::Pop)
            }
            // A dedent past the list's own enclosing level: this
            // `CloseBlockquote` already represents the list's own
            // container closing (it was opened via the single
            // `OpenBlockquote` that pushed `BlockquoteOrListParser`), so
            // it is consumed here, not redelivered — mirrors
            // `IndentedElementParser`'s own `CloseBlockquote` handling.
            HighToken::CloseBlockquote => {
                let tag = markup.current_element_tag().to_string();
                markup.close_element(&tag, token.position)?;
                Ok(GrokAction::Pop)
            }
            // End of input, or the start of an unrelated next block at the
            // same level: there is no next item, but the token itself still
            // needs to reach whatever is now exposed.
            _ => {
                let tag = markup.current_element_tag().to_string();
                markup.close_element(&tag, token.position)?;
                Ok(GrokAction::PopAndRedeliver(token))
            }
        }
    }
}

/// A definition list (`%`).
#[derive(Debug)]
pub struct DefinitionListParser;

impl DefinitionListParser {
    pub(crate) fn grok(
        &mut self,
        markup: &mut Markup,
        token: PositionedToken,
    ) -> Result<GrokAction, ParseError> {
        match token.token {
            HighToken::Char('%') => Ok(GrokAction::Push(ParserState::TokenEater(TokenEater {
                expected: HighToken::Space,
                continuation: TokenEaterContinuation::OpenDefinitionTerm,
            }))),
            HighToken::Blank => {
                markup.close_element("dl", token.position)?;
                Ok(GrokAction::Pop)
            }
            // See `ListParser`'s identical arm: this `CloseBlockquote` is
            // the definition list's own container closing.
            HighToken::CloseBlockquote => {
                markup.close_element("dl", token.position)?;
                Ok(GrokAction::Pop)
            }
            _ => {
                markup.close_element("dl", token.position)?;
                Ok(GrokAction::PopAndRedeliver(token))
            }
        }
    }
}

/// The term (`dt`) of a definition; a newline hands off to the definition
/// body (`dd`), an indented element body indented 2 further.
#[derive(Debug)]
pub struct DefinitionTermParser;

impl DefinitionTermParser {
    pub(crate) fn grok(
        &mut self,
        markup: &mut Markup,
        token: PositionedToken,
    ) -> Result<GrokAction, ParseError> {
        match token.token {
            HighToken::Newline => {
                markup.close_element("dt", token.position)?;
                markup.add_indentation(2);
                markup.open_element("dd");
                Ok(GrokAction::Replace(ParserState::IndentedElement(
                    IndentedElementParser { started: false },
                )))
            }
            HighToken::Char(c) => {
                markup.push_text(&c.to_string());
                Ok(GrokAction::Continue)
            }
            HighToken::Space => {
                markup.push_text(" ");
                Ok(GrokAction::Continue)
            }
            other => Err(ParseError::structural(
                token.position,
                format!("unexpected {:?} in definition term", other),
            )),
        }
    }
}

/// What a [`TokenEater`] does once it has seen its expected token.
#[derive(Debug)]
pub enum TokenEaterContinuation {
    /// Bump indentation, open `tag`, and push a fresh indented-element body
    /// on it (list items).
    OpenListItem { tag: &'static str, indent_bump: i64 },
    /// Open `dt` and start reading a definition term.
    OpenDefinitionTerm,
}

/// A generic one-shot parser: requires the next token to equal `expected`,
/// then runs `continuation`. Any mismatch is a fatal syntax error (spec
/// §4.3 "any mismatch is a syntax error").
#[derive(Debug)]
pub struct TokenEater {
    pub expected: HighToken,
    pub continuation: TokenEaterContinuation,
}

impl TokenEater {
    pub(crate) fn grok(
        &mut self,
        markup: &mut Markup,
        token: PositionedToken,
    ) -> Result<GrokAction, ParseError> {
        if token.token != self.expected {
            return Err(ParseError::structural(
                token.position,
                format!("expected {:?}, got {:?}", self.expected, token.token),
            ));
        }
        match self.continuation {
            TokenEaterContinuation::OpenListItem { tag, indent_bump } => {
                markup.add_indentation(indent_bump);
                markup.open_element(tag);
                Ok(GrokAction::Replace(ParserState::IndentedElement(
                    IndentedElementParser { started: false },
                )))
            }
            TokenEaterContinuation::OpenDefinitionTerm => {
                markup.open_element("dt");
                Ok(GrokAction::Replace(ParserState::DefinitionTerm(
                    DefinitionTermParser,
                )))
            }
        }
    }
}
