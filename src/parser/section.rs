//! Named sections: `## name` opens a nested document under an element
//! tagged `name`; `##.` closes it (spec §4.3).

use crate::error::ParseError;
use crate::tokenizer::{HighToken, PositionedToken};

use super::state::{DocumentParser, ParagraphParser};
use super::state::ParserState;
use super::GrokAction;
use super::Markup;

/// Sees the token right after the first `#`. Confirms the second `#`, or
/// reverts to an ordinary paragraph (a literal `#` is common text, not
/// every such line is a section header).
#[derive(Debug)]
pub struct SectionStartParser {
    pub brace_is_eof: bool,
    pub buffer: Vec<PositionedToken>,
}

impl SectionStartParser {
    pub(crate) fn grok(
        &mut self,
        markup: &mut Markup,
        token: PositionedToken,
    ) -> Result<GrokAction, ParseError> {
        match token.token {
            HighToken::Char('#') => Ok(GrokAction::Replace(ParserState::SectionName(
                SectionNameParser {
                    name: String::new(),
                    seen_space: false,
                },
            ))),
            _ => self.revert(markup, token),
        }
    }

    fn revert(&mut self, markup: &mut Markup, token: PositionedToken) -> Result<GrokAction, ParseError> {
        let mut tokens: Vec<PositionedToken> = self.buffer.drain(..).collect();
        tokens.push(token);
        markup.open_element("p");
        Ok(GrokAction::ReplaceAndRedeliver(
            ParserState::Paragraph(ParagraphParser {
                brace_is_eof: self.brace_is_eof,
                pending_space: false,
            }),
            tokens,
        ))
    }
}

/// Reads the section name up to a newline, then opens the section element
/// and hands off to a nested, section-aware `DocumentParser` once a blank
/// line confirms the header.
#[derive(Debug)]
pub struct SectionNameParser {
    pub name: String,
    pub seen_space: bool,
}

impl SectionNameParser {
    pub(crate) fn grok(
        &mut self,
        markup: &mut Markup,
        token: PositionedToken,
    ) -> Result<GrokAction, ParseError> {
        match token.token {
            HighToken::Space if !self.seen_space && self.name.is_empty() => {
                self.seen_space = true;
                Ok(GrokAction::Continue)
            }
            HighToken::Char(c) => {
                self.name.push(c);
                Ok(GrokAction::Continue)
            }
            HighToken::Newline => Ok(GrokAction::Continue),
            HighToken::Blank => {
                markup.open_element(self.name.clone());
                Ok(GrokAction::Replace(ParserState::Document(DocumentParser {
                    brace_is_eof: false,
                    is_nested_section: true,
                })))
            }
            other => Err(ParseError::structural(
                token.position,
                format!("unexpected {:?} in section name", other),
            )),
        }
    }
}

/// Sees the token right after the first `#` of a closing `##.` while
/// inside a nested section's document. Closes the section and pops both
/// itself and the nested document it closes.
#[derive(Debug)]
pub struct SectionEndParser {
    pub brace_is_eof: bool,
    pub buffer: Vec<PositionedToken>,
    pub phase: usize,
}

impl SectionEndParser {
    pub(crate) fn grok(
        &mut self,
        markup: &mut Markup,
        token: PositionedToken,
    ) -> Result<GrokAction, ParseError> {
        match self.phase {
            0 => match token.token {
                HighToken::Char('#') => {
                    self.buffer.push(token);
                    self.phase = 1;
                    Ok(GrokAction::Continue)
                }
                _ => self.revert(markup, token),
            },
            1 => match token.token {
                HighToken::Char('.') => {
                    self.buffer.push(token);
                    self.phase = 2;
                    Ok(GrokAction::Continue)
                }
                _ => self.revert(markup, token),
            },
            _ => match token.token {
                HighToken::Blank | HighToken::Newline => {
                    let tag = markup.current_element_tag().to_string();
                    markup.close_element(&tag, token.position)?;
                    Ok(GrokAction::PopN(2))
                }
                other => Err(ParseError::structural(
                    token.position,
                    format!("expected a blank line to close section, got {:?}", other),
                )),
            },
        }
    }

    fn revert(&mut self, markup: &mut Markup, token: PositionedToken) -> Result<GrokAction, ParseError> {
        let mut tokens: Vec<PositionedToken> = self.buffer.drain(..).collect();
        tokens.push(token);
        markup.open_element("p");
        Ok(GrokAction::ReplaceAndRedeliver(
            ParserState::Paragraph(ParagraphParser {
                brace_is_eof: self.brace_is_eof,
                pending_space: false,
            }),
            tokens,
        ))
    }
}
