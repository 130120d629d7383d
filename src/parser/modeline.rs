//! `-` at block start: either the one-line `-*- ... -*-` modeline comment
//! (dropped entirely from the tree), or, much more commonly, the start of
//! an unordered list (spec §4.3, §6).

use crate::error::ParseError;
use crate::tokenizer::{HighToken, PositionedToken};

use super::list::ListParser;
use super::state::ParserState;
use super::GrokAction;
use super::Markup;

/// While `star_count < 3`, still matching the opening `-*-` delimiter
/// (the first `-` is what caused this state to be pushed). Once matched,
/// the rest of the line is discarded up to the terminating newline.
/// Any mismatch means this was never a modeline — it's a list.
#[derive(Debug)]
pub struct PossibleModelineParser {
    pub buffer: Vec<PositionedToken>,
    pub star_count: usize,
}

impl PossibleModelineParser {
    pub(crate) fn grok(
        &mut self,
        markup: &mut Markup,
        token: PositionedToken,
    ) -> Result<GrokAction, ParseError> {
        if self.star_count < 3 {
            let expected = if self.star_count == 1 { '*' } else { '-' };
            match token.token {
                HighToken::Char(c) if c == expected => {
                    self.buffer.push(token);
                    self.star_count += 1;
                    Ok(GrokAction::Continue)
                }
                _ => self.revert_to_list(markup, token),
            }
        } else {
            match token.token {
                HighToken::Newline | HighToken::Blank => Ok(GrokAction::Pop),
                _ => Ok(GrokAction::Continue),
            }
        }
    }

    /// `-` wasn't followed by `*-`, so it was a list marker all along: open
    /// `ul` and hand every buffered token (the `-` itself, plus whatever we
    /// peeked) to a [`ListParser`].
    fn revert_to_list(&mut self, markup: &mut Markup, token: PositionedToken) -> Result<GrokAction, ParseError> {
        let mut tokens: Vec<PositionedToken> = self.buffer.drain(..).collect();
        tokens.push(token);
        markup.open_element("ul");
        Ok(GrokAction::ReplaceAndRedeliver(
            ParserState::List(ListParser { marker: '-' }),
            tokens,
        ))
    }
}
