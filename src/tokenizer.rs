//! Stage 2: [`crate::cleaner::CharToken`]s to semantic [`HighToken`]s.
//!
//! Collapses runs of blank lines, and turns leading-indentation deltas into
//! explicit blockquote/verbatim open/close tokens. `current_indentation` is
//! the one piece of state shared with the parser stage, via [`IndentControl`]
//! (see [`crate::parser::ListParser`]).

use std::collections::VecDeque;

use crate::cleaner::{CharToken, Position, PositionedChar};

/// A semantic token produced by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighToken {
    /// Any character that is not whitespace-structural.
    Char(char),
    /// A single literal space, passed through inside a verbatim block (or
    /// mid-line).
    Space,
    /// Exactly one LF between two non-blank lines.
    Newline,
    /// Paragraph separator: one or more consecutive blank lines, or the
    /// single marker emitted at end of input.
    Blank,
    OpenBlockquote,
    CloseBlockquote,
    OpenVerbatim,
    CloseVerbatim,
    /// Emitted exactly once, after the final [`HighToken::Blank`] and any
    /// balancing close tokens. Lets a container state (a list, a section)
    /// that has no other way to hear "no more input" cascade its own
    /// closing down to the document root.
    Eof,
}

/// Position-tagged [`HighToken`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionedToken {
    pub token: HighToken,
    pub position: Position,
}

/// The control channel a parser uses to bump the expected indentation when
/// entering a list item (spec §4.2 "Control channel").
pub trait IndentControl {
    fn add_indentation(&mut self, delta: i64);
}

/// Consumes [`PositionedChar`]s and yields [`PositionedToken`]s.
pub struct Tokenizer {
    chars: Box<dyn Iterator<Item = PositionedChar>>,
    current_indentation: i64,
    in_verbatim: bool,
    pending_newlines: usize,
    pending_newline_pos: Position,
    /// `Some(n)` while at line start, having seen `n` leading spaces so
    /// far; `None` once a non-space character has committed the line.
    leading_spaces: Option<usize>,
    queue: VecDeque<PositionedToken>,
    last_pos: Position,
    eof_emitted: bool,
}

impl Tokenizer {
    pub fn new(chars: impl Iterator<Item = PositionedChar> + 'static) -> Self {
        Tokenizer {
            chars: Box::new(chars),
            current_indentation: 0,
            in_verbatim: false,
            pending_newlines: 0,
            pending_newline_pos: Position::new(0, 0),
            leading_spaces: Some(0),
            queue: VecDeque::new(),
            last_pos: Position::new(0, 0),
            eof_emitted: false,
        }
    }

    fn push(&mut self, token: HighToken, position: Position) {
        self.queue.push_back(PositionedToken { token, position });
    }

    fn flush_newlines(&mut self) {
        match self.pending_newlines {
            0 => {}
            1 => {
                self.push(HighToken::Newline, self.pending_newline_pos);
                self.leading_spaces = Some(0);
            }
            k => {
                for _ in 0..(k - 1) {
                    self.push(HighToken::Blank, self.pending_newline_pos);
                }
                self.leading_spaces = Some(0);
            }
        }
        self.pending_newlines = 0;
    }

    fn reconcile_indentation(&mut self, s: usize, pos: Position) {
        let s = s as i64;
        if s < self.current_indentation {
            if self.in_verbatim {
                self.push(HighToken::CloseVerbatim, pos);
                self.current_indentation -= 3;
                self.in_verbatim = false;
            }
            while s < self.current_indentation {
                self.push(HighToken::CloseBlockquote, pos);
                self.current_indentation -= 2;
            }
        } else if s > self.current_indentation {
            let d = s - self.current_indentation;
            if self.in_verbatim {
                for _ in 0..d {
                    self.push(HighToken::Space, pos);
                }
            } else if d == 2 {
                self.push(HighToken::OpenBlockquote, pos);
                self.current_indentation += 2;
            } else if d == 1 {
                // Surprising-but-preserved rule (spec §9 open question):
                // indenting by exactly one more than the current blockquote
                // level exits the blockquote and enters verbatim.
                self.push(HighToken::CloseBlockquote, pos);
                self.push(HighToken::OpenVerbatim, pos);
                self.current_indentation += 1; // -2 + 3
                self.in_verbatim = true;
            } else {
                // d >= 3
                self.push(HighToken::OpenVerbatim, pos);
                self.current_indentation += 3;
                self.in_verbatim = true;
                for _ in 0..(d - 3) {
                    self.push(HighToken::Space, pos);
                }
            }
        }
    }

    fn process(&mut self, pc: PositionedChar) {
        self.last_pos = pc.position;
        match pc.token {
            CharToken::Newline => {
                if self.pending_newlines == 0 {
                    self.pending_newline_pos = pc.position;
                }
                self.pending_newlines += 1;
            }
            CharToken::Space => {
                self.flush_newlines();
                match self.leading_spaces {
                    Some(n) => self.leading_spaces = Some(n + 1),
                    None => self.push(HighToken::Space, pc.position),
                }
            }
            CharToken::Char(c) => {
                self.flush_newlines();
                if let Some(s) = self.leading_spaces {
                    self.reconcile_indentation(s, pc.position);
                    self.leading_spaces = None;
                }
                self.push(HighToken::Char(c), pc.position);
            }
        }
    }

    fn finish(&mut self) {
        self.push(HighToken::Blank, self.last_pos);
        if self.in_verbatim {
            self.push(HighToken::CloseVerbatim, self.last_pos);
            self.current_indentation -= 3;
            self.in_verbatim = false;
        }
        while self.current_indentation > 0 {
            self.push(HighToken::CloseBlockquote, self.last_pos);
            self.current_indentation -= 2;
        }
        self.push(HighToken::Eof, self.last_pos);
    }
}

impl IndentControl for Tokenizer {
    fn add_indentation(&mut self, delta: i64) {
        self.current_indentation += delta;
    }
}

impl Iterator for Tokenizer {
    type Item = PositionedToken;

    fn next(&mut self) -> Option<PositionedToken> {
        loop {
            if let Some(tok) = self.queue.pop_front() {
                return Some(tok);
            }
            if self.eof_emitted {
                return None;
            }
            match self.chars.next() {
                Some(pc) => self.process(pc),
                None => {
                    self.eof_emitted = true;
                    self.finish();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cleaner::TextCleaner;

    fn tokenize(input: &str, tabwidth: usize) -> Vec<HighToken> {
        let chars = TextCleaner::new(input.chars().collect::<Vec<_>>().into_iter(), tabwidth);
        Tokenizer::new(chars).map(|t| t.token).collect()
    }

    #[test]
    fn plain_paragraph_forwards_chars() {
        let tokens = tokenize("ab", 8);
        assert!(tokens
            .iter()
            .take(2)
            .all(|t| matches!(t, HighToken::Char(_))));
    }

    #[test]
    fn blank_line_collapses_to_blank() {
        let tokens = tokenize("a\n\nb", 8);
        assert!(tokens.contains(&HighToken::Blank));
        assert!(!tokens
            .windows(2)
            .any(|w| w[0] == HighToken::Newline && w[1] == HighToken::Newline));
    }

    #[test]
    fn two_space_indent_opens_blockquote() {
        let tokens = tokenize("a\n  b", 8);
        assert!(tokens.contains(&HighToken::OpenBlockquote));
    }

    #[test]
    fn three_space_indent_opens_verbatim() {
        let tokens = tokenize("a\n   b", 8);
        assert!(tokens.contains(&HighToken::OpenVerbatim));
    }

    #[test]
    fn one_more_than_blockquote_closes_then_opens_verbatim() {
        let tokens = tokenize("a\n  b\n   c", 8);
        let oq = tokens
            .iter()
            .position(|t| *t == HighToken::OpenBlockquote)
            .unwrap();
        let cq = tokens
            .iter()
            .position(|t| *t == HighToken::CloseBlockquote)
            .unwrap();
        let ov = tokens
            .iter()
            .position(|t| *t == HighToken::OpenVerbatim)
            .unwrap();
        assert!(oq < cq);
        assert!(cq < ov);
    }

    #[test]
    fn opens_and_closes_balance() {
        let tokens = tokenize("a\n  b\n   c\nd\n", 8);
        let opens_q = tokens
            .iter()
            .filter(|t| **t == HighToken::OpenBlockquote)
            .count();
        let closes_q = tokens
            .iter()
            .filter(|t| **t == HighToken::CloseBlockquote)
            .count();
        let opens_v = tokens
            .iter()
            .filter(|t| **t == HighToken::OpenVerbatim)
            .count();
        let closes_v = tokens
            .iter()
            .filter(|t| **t == HighToken::CloseVerbatim)
            .count();
        assert_eq!(opens_q, closes_q);
        assert_eq!(opens_v, closes_v);
    }

    #[test]
    fn ends_with_blank_then_eof_marker() {
        let tokens = tokenize("a", 8);
        assert_eq!(tokens.last(), Some(&HighToken::Eof));
        assert!(tokens.contains(&HighToken::Blank));
    }

    #[test]
    fn tab_expands_inside_indentation() {
        // tabwidth 4: one tab -> 4 spaces -> opens verbatim (d>=3) with 1 extra space
        let tokens = tokenize("a\n\tb", 4);
        assert!(tokens.contains(&HighToken::OpenVerbatim));
        assert!(tokens.contains(&HighToken::Space));
    }
}
