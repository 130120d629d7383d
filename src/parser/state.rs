//! Parser state data (spec §4.3) as a tagged-variant enum — see spec
//! Design Note "parser stack via dispatch": a dispatch over this enum
//! instead of heap polymorphism over a single-method parser trait.

use crate::error::ParseError;
use crate::tokenizer::{HighToken, PositionedToken};

use super::{dispatch_block_start, link, list, modeline, section, GrokAction, Markup};

#[derive(Debug)]
pub enum ParserState {
    Document(DocumentParser),
    Paragraph(ParagraphParser),
    Header(HeaderParser),
    BlockquoteOrList(list::BlockquoteOrListParser),
    IndentedElement(IndentedElementParser),
    Verbatim(super::verbatim::VerbatimParser),
    List(list::ListParser),
    DefinitionList(list::DefinitionListParser),
    DefinitionTerm(list::DefinitionTermParser),
    Slash(super::inline::SlashParser),
    Name(super::inline::NameParser),
    BraceDelimited(super::inline::BraceDelimitedParser),
    Link(link::LinkParser),
    AmbiguousLink(link::AmbiguousLinkParser),
    Linkdef(link::LinkdefParser),
    Url(link::UrlParser),
    PossibleModeline(modeline::PossibleModelineParser),
    SectionStart(section::SectionStartParser),
    SectionName(section::SectionNameParser),
    SectionEnd(section::SectionEndParser),
    TokenEater(list::TokenEater),
}

impl ParserState {
    pub(crate) fn grok(
        &mut self,
        markup: &mut Markup,
        token: PositionedToken,
    ) -> Result<GrokAction, ParseError> {
        match self {
            ParserState::Document(p) => p.grok(markup, token),
            ParserState::Paragraph(p) => p.grok(markup, token),
            ParserState::Header(p) => p.grok(markup, token),
            ParserState::BlockquoteOrList(p) => p.grok(markup, token),
            ParserState::IndentedElement(p) => p.grok(markup, token),
            ParserState::Verbatim(p) => p.grok(markup, token),
            ParserState::List(p) => p.grok(markup, token),
            ParserState::DefinitionList(p) => p.grok(markup, token),
            ParserState::DefinitionTerm(p) => p.grok(markup, token),
            ParserState::Slash(p) => p.grok(markup, token),
            ParserState::Name(p) => p.grok(markup, token),
            ParserState::BraceDelimited(p) => p.grok(markup, token),
            ParserState::Link(p) => p.grok(markup, token),
            ParserState::AmbiguousLink(p) => p.grok(markup, token),
            ParserState::Linkdef(p) => p.grok(markup, token),
            ParserState::Url(p) => p.grok(markup, token),
            ParserState::PossibleModeline(p) => p.grok(markup, token),
            ParserState::SectionStart(p) => p.grok(markup, token),
            ParserState::SectionName(p) => p.grok(markup, token),
            ParserState::SectionEnd(p) => p.grok(markup, token),
            ParserState::TokenEater(p) => p.grok(markup, token),
        }
    }
}

/// Top-level block parser: builds the `body` document, or a nested
/// subdocument opened via `\name{...}` for a tag in [`crate::MarkupOptions::subdocs`].
#[derive(Debug)]
pub struct DocumentParser {
    /// Closes (and pops) on an unescaped `}` instead of running to the end
    /// of the token stream.
    pub brace_is_eof: bool,
    /// Whether `#` should be read as the closing marker of a named section
    /// (`SectionEndParser`) instead of the opening one.
    pub is_nested_section: bool,
}

impl DocumentParser {
    pub(crate) fn grok(
        &mut self,
        markup: &mut Markup,
        token: PositionedToken,
    ) -> Result<GrokAction, ParseError> {
        if let HighToken::Eof = token.token {
            return if self.brace_is_eof || self.is_nested_section {
                Err(ParseError::structural(
                    token.position,
                    "unexpected end of input inside an unterminated subdocument or section",
                ))
            } else {
                Ok(GrokAction::Continue)
            };
        }
        dispatch_block_start(markup, token, self.brace_is_eof, true, self.is_nested_section)
    }
}

/// Block body of a blockquote or list item: mirrors `DocumentParser`'s
/// dispatch, but closes on `CloseBlockquote` instead of running to EOF, and
/// rejects a blank/newline as its very first token (spec §4.3).
#[derive(Debug)]
pub struct IndentedElementParser {
    pub started: bool,
}

impl IndentedElementParser {
    pub(crate) fn grok(
        &mut self,
        markup: &mut Markup,
        token: PositionedToken,
    ) -> Result<GrokAction, ParseError> {
        if let HighToken::Eof = token.token {
            return Err(ParseError::structural(
                token.position,
                "unexpected end of input inside an unclosed blockquote or list item",
            ));
        }
        if let HighToken::CloseBlockquote = token.token {
            let tag = markup.current_element_tag().to_string();
            markup.close_element(&tag, token.position)?;
            return Ok(GrokAction::Pop);
        }
        if !self.started {
            if matches!(token.token, HighToken::Blank | HighToken::Newline) {
                return Err(ParseError::structural(
                    token.position,
                    "indented block cannot start with a blank line",
                ));
            }
            self.started = true;
        }
        dispatch_block_start(markup, token, false, false, false)
    }
}

/// Accumulates one or more non-blank lines of text onto whatever element is
/// currently open (a `p`, or an `h{n}` when reused directly by
/// `HeaderParser` — closes whichever tag is actually on top rather than
/// assuming `p`). A line-wrap `Newline` is held as `pending_space` rather
/// than written immediately, so that a `Blank` or a dedent
/// (`CloseBlockquote`) arriving right after it closes the element cleanly
/// instead of leaving a trailing space.
#[derive(Debug)]
pub struct ParagraphParser {
    pub brace_is_eof: bool,
    pub pending_space: bool,
}

impl ParagraphParser {
    fn flush_pending_space(&mut self, markup: &mut Markup) {
        if self.pending_space {
            markup.push_text(" ");
            self.pending_space = false;
        }
    }

    pub(crate) fn grok(
        &mut self,
        markup: &mut Markup,
        token: PositionedToken,
    ) -> Result<GrokAction, ParseError> {
        match token.token {
            HighToken::Blank => {
                let tag = markup.current_element_tag().to_string();
                markup.close_element(&tag, token.position)?;
                Ok(GrokAction::Pop)
            }
            HighToken::CloseBlockquote => {
                let tag = markup.current_element_tag().to_string();
                markup.close_element(&tag, token.position)?;
                Ok(GrokAction::PopAndRedeliver(token))
            }
            HighToken::Newline => {
                self.pending_space = true;
                Ok(GrokAction::Continue)
            }
            HighToken::Char('\\') => {
                self.flush_pending_space(markup);
                Ok(GrokAction::Push(ParserState::Slash(
                    super::inline::SlashParser,
                )))
            }
            HighToken::Char('[') => {
                self.flush_pending_space(markup);
                markup.open_element("link");
                Ok(GrokAction::Push(ParserState::Link(link::LinkParser {
                    in_key: false,
                })))
            }
            HighToken::Char('}') if self.brace_is_eof => {
                let tag = markup.current_element_tag().to_string();
                markup.close_element(&tag, token.position)?;
                Ok(GrokAction::PopAndRedeliver(token))
            }
            HighToken::Char(c) => {
                self.flush_pending_space(markup);
                markup.push_text(&c.to_string());
                Ok(GrokAction::Continue)
            }
            HighToken::Space => {
                self.flush_pending_space(markup);
                markup.push_text(" ");
                Ok(GrokAction::Continue)
            }
            other => Err(ParseError::structural(
                token.position,
                format!("unexpected {:?} in paragraph", other),
            )),
        }
    }
}

/// Reads `*`{n} then one space, opening `h{n}` and handing off to a
/// [`ParagraphParser`] on it.
#[derive(Debug)]
pub struct HeaderParser {
    pub level: usize,
    pub brace_is_eof: bool,
}

impl HeaderParser {
    pub(crate) fn grok(
        &mut self,
        markup: &mut Markup,
        token: PositionedToken,
    ) -> Result<GrokAction, ParseError> {
        match token.token {
            HighToken::Char('*') => {
                self.level += 1;
                Ok(GrokAction::Continue)
            }
            HighToken::Space => {
                markup.open_element(format!("h{}", self.level));
                Ok(GrokAction::Replace(ParserState::Paragraph(ParagraphParser {
                    brace_is_eof: self.brace_is_eof,
                    pending_space: false,
                })))
            }
            _ => Err(ParseError::structural(
                token.position,
                "expected a space after header stars",
            )),
        }
    }
}
