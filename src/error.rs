//! Fatal parse errors.
//!
//! There is no error recovery in this grammar (see spec Non-goals): every
//! error is fatal and carries the position of the offending token.

use std::fmt;

use crate::cleaner::Position;

/// The single error type surfaced by [`crate::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Close-of-wrong-element, unexpected token in a parser state, or an
    /// indent delta that matches no rule.
    Structural { position: Position, message: String },
    /// Input was not valid UTF-8. Surfaced before parsing starts, so it
    /// carries no position.
    InvalidUtf8,
}

impl ParseError {
    pub fn structural(position: Position, message: impl Into<String>) -> Self {
        let message = message.into();
        log::error!("{} at {}:{}", message, position.line, position.column);
        ParseError::Structural { position, message }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Structural { position, message } => {
                write!(f, "{} at {}:{}", message, position.line, position.column)
            }
            ParseError::InvalidUtf8 => write!(f, "input is not valid UTF-8"),
        }
    }
}

impl std::error::Error for ParseError {}
