//! `[text]`, `[text|key]`, and `[key] <url>` link definitions (spec §4.3,
//! scenario 5).

use crate::error::ParseError;
use crate::tokenizer::{HighToken, PositionedToken};

use super::state::ParagraphParser;
use super::state::ParserState;
use super::GrokAction;
use super::Markup;

/// Body of `[...]`. A `|` opens a `key` child for the second half of
/// `[text|key]`; `]` closes whatever is open and pops back to whatever
/// pushed this (a paragraph, brace-delimited element, or
/// [`AmbiguousLinkParser`]).
#[derive(Debug)]
pub struct LinkParser {
    pub in_key: bool,
}

impl LinkParser {
    pub(crate) fn grok(
        &mut self,
        markup: &mut Markup,
        token: PositionedToken,
    ) -> Result<GrokAction, ParseError> {
        match token.token {
            HighToken::Char('|') if !self.in_key => {
                markup.open_element("key");
                self.in_key = true;
                Ok(GrokAction::Continue)
            }
            HighToken::Char(']') => {
                if self.in_key {
                    markup.close_element("key", token.position)?;
                }
                markup.close_element("link", token.position)?;
                Ok(GrokAction::Pop)
            }
            HighToken::Char('\\') => Ok(GrokAction::Push(ParserState::Slash(
                super::inline::SlashParser,
            ))),
            HighToken::Char(c) => {
                markup.push_text(&c.to_string());
                Ok(GrokAction::Continue)
            }
            HighToken::Space => {
                markup.push_text(" ");
                Ok(GrokAction::Continue)
            }
            HighToken::Newline => {
                markup.push_text(" ");
                Ok(GrokAction::Continue)
            }
            other => Err(ParseError::structural(
                token.position,
                format!("unexpected {:?} inside link", other),
            )),
        }
    }
}

/// A `[` at block start is ambiguous: it may be an ordinary paragraph whose
/// first inline element happens to be a `[text]`/`[text|key]` link, or it
/// may be a `[key] <url>` link definition. Both start with identical
/// bracket syntax, so this parser runs the same bracket grammar as
/// [`LinkParser`] (building a `link` child of the provisional `p`) and only
/// disambiguates by peeking one space and one `<` past the closing `]`.
#[derive(Debug)]
pub struct AmbiguousLinkParser {
    pub brace_is_eof: bool,
    pub phase: AmbiguousLinkPhase,
}

#[derive(Debug)]
pub enum AmbiguousLinkPhase {
    /// Inside `[...]`, mirroring `LinkParser`.
    InBrackets { in_key: bool },
    /// `]` seen; buffering to look for `Space` then `<`.
    AfterBracket { buffer: Vec<PositionedToken> },
}

impl AmbiguousLinkParser {
    pub(crate) fn grok(
        &mut self,
        markup: &mut Markup,
        token: PositionedToken,
    ) -> Result<GrokAction, ParseError> {
        match &mut self.phase {
            AmbiguousLinkPhase::InBrackets { in_key } => match token.token {
                HighToken::Char('|') if !*in_key => {
                    markup.open_element("key");
                    *in_key = true;
                    Ok(GrokAction::Continue)
                }
                HighToken::Char(']') => {
                    if *in_key {
                        markup.close_element("key", token.position)?;
                    }
                    markup.close_element("link", token.position)?;
                    self.phase = AmbiguousLinkPhase::AfterBracket { buffer: Vec::new() };
                    Ok(GrokAction::Continue)
                }
                HighToken::Char('\\') => {
                    Ok(GrokAction::Push(ParserState::Slash(super::inline::SlashParser)))
                }
                HighToken::Char(c) => {
                    markup.push_text(&c.to_string());
                    Ok(GrokAction::Continue)
                }
                HighToken::Space | HighToken::Newline => {
                    markup.push_text(" ");
                    Ok(GrokAction::Continue)
                }
                other => Err(ParseError::structural(
                    token.position,
                    format!("unexpected {:?} inside link", other),
                )),
            },
            AmbiguousLinkPhase::AfterBracket { buffer } => {
                if buffer.is_empty() {
                    match token.token {
                        HighToken::Space => {
                            buffer.push(token);
                            Ok(GrokAction::Continue)
                        }
                        _ => {
                            let tokens = vec![token];
                            finish_as_paragraph(self.brace_is_eof, tokens)
                        }
                    }
                } else {
                    match token.token {
                        HighToken::Char('<') => {
                            markup.retag_wrapping_link_as_def();
                            Ok(GrokAction::ReplaceAndRedeliver(
                                ParserState::Linkdef(LinkdefParser),
                                vec![token],
                            ))
                        }
                        _ => {
                            let mut tokens = std::mem::take(buffer);
                            tokens.push(token);
                            finish_as_paragraph(self.brace_is_eof, tokens)
                        }
                    }
                }
            }
        }
    }
}

/// Not a link definition after all — the `link` child already built is
/// correct as-is; just resume ordinary paragraph parsing after it.
fn finish_as_paragraph(
    brace_is_eof: bool,
    tokens: Vec<PositionedToken>,
) -> Result<GrokAction, ParseError> {
    Ok(GrokAction::ReplaceAndRedeliver(
        ParserState::Paragraph(ParagraphParser {
            brace_is_eof,
            pending_space: false,
        }),
        tokens,
    ))
}

/// Body of a resolved `link_def`: an optional `<url>` then a blank line to
/// close it.
#[derive(Debug)]
pub struct LinkdefParser;

impl LinkdefParser {
    pub(crate) fn grok(
        &mut self,
        markup: &mut Markup,
        token: PositionedToken,
    ) -> Result<GrokAction, ParseError> {
        match token.token {
            HighToken::Char('<') => {
                markup.open_element("url");
                Ok(GrokAction::Push(ParserState::Url(UrlParser)))
            }
            HighToken::Blank => {
                markup.close_element("link_def", token.position)?;
                Ok(GrokAction::Pop)
            }
            HighToken::Newline | HighToken::Space => Ok(GrokAction::Continue),
            other => Err(ParseError::structural(
                token.position,
                format!("expected a blank line to close link definition, got {:?}", other),
            )),
        }
    }
}

/// `<...>` inside a link definition.
#[derive(Debug)]
pub struct UrlParser;

impl UrlParser {
    pub(crate) fn grok(
        &mut self,
        markup: &mut Markup,
        token: PositionedToken,
    ) -> Result<GrokAction, ParseError> {
        match token.token {
            HighToken::Char('>') => {
                markup.close_element("url", token.position)?;
                Ok(GrokAction::Pop)
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
                format!("unexpected {:?} inside url", other),
            )),
        }
    }
}
