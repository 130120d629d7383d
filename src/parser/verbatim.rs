//! Literal text block (spec §4.3 `VerbatimParser`): no escapes, no inline
//! markup, closes on dedent below the verbatim's indentation.

use crate::error::ParseError;
use crate::tokenizer::{HighToken, PositionedToken};

use super::GrokAction;
use super::Markup;

/// Buffers blank lines seen inside the block so they can be re-emitted as
/// literal newlines once more content arrives, instead of being collapsed
/// the way they are between ordinary paragraphs.
#[derive(Debug)]
pub struct VerbatimParser {
    pub blank_count: usize,
}

impl VerbatimParser {
    pub(crate) fn grok(
        &mut self,
        markup: &mut Markup,
        token: PositionedToken,
    ) -> Result<GrokAction, ParseError> {
        match token.token {
            HighToken::CloseVerbatim => {
                markup.close_element("pre", token.position)?;
                Ok(GrokAction::Pop)
            }
            HighToken::Blank => {
                self.blank_count += 1;
                Ok(GrokAction::Continue)
            }
            HighToken::Newline => {
                self.flush_pending(markup);
                markup.push_text("\n");
                Ok(GrokAction::Continue)
            }
            HighToken::Space => {
                self.flush_pending(markup);
                markup.push_text(" ");
                Ok(GrokAction::Continue)
            }
            HighToken::Char(c) => {
                self.flush_pending(markup);
                markup.push_text(&c.to_string());
                Ok(GrokAction::Continue)
            }
            other => Err(ParseError::structural(
                token.position,
                format!("unexpected {:?} in verbatim block", other),
            )),
        }
    }

    fn flush_pending(&mut self, markup: &mut Markup) {
        if self.blank_count > 0 {
            // k pending blanks plus the newline ending the line before them.
            for _ in 0..=self.blank_count {
                markup.push_text("\n");
            }
            self.blank_count = 0;
        }
    }
}
