//! Delimiter tokenizer with line and column tracking
//!
//! Splits an in-memory export into semicolon-terminated tokens. Newlines are
//! ordinary token content but advance the line counter, so every token knows
//! the line it ended on and the column range it covers on that line.
//! Columns count characters as lossy UTF-8 decoding would produce them.

use std::borrow::Cow;

use crate::constants::{DELIMITER, TRIM_CHARS};
use crate::error::Position;

/// One delimiter-bounded span of the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    bytes: &'a [u8],
    position: Position,
    is_final: bool,
}

impl<'a> Token<'a> {
    /// Raw bytes of the token, delimiter excluded
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Token text, with invalid UTF-8 replaced by U+FFFD
    pub fn text(&self) -> Cow<'a, str> {
        String::from_utf8_lossy(self.bytes)
    }

    /// Token text without surrounding spaces, tabs, CR or LF
    pub fn trimmed(&self) -> String {
        self.text().trim_matches(TRIM_CHARS).to_string()
    }

    pub fn is_blank(&self) -> bool {
        self.text().trim_matches(TRIM_CHARS).is_empty()
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// True for the token holding whatever followed the last delimiter
    pub fn is_final(&self) -> bool {
        self.is_final
    }
}

/// Forward-only cursor over the tokens of one document
///
/// Cloning is cheap and gives an independent lookahead cursor; the clone
/// never affects the original.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    input: &'a [u8],
    offset: usize,
    line: usize,
    column: usize,
    finished: bool,
    tokens_consumed: usize,
    last_position: Position,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            offset: 0,
            line: 1,
            column: 1,
            finished: false,
            tokens_consumed: 0,
            last_position: Position::new(1, 1, 1),
        }
    }

    /// Extract the next token, `None` once the final token has been handed out
    pub fn next_token(&mut self) -> Option<Token<'a>> {
        if self.finished {
            return None;
        }

        let input = self.input;
        let start = self.offset;
        let mut column_start = self.column;
        let mut continuations = 0;

        for (index, &byte) in input.iter().enumerate().skip(start) {
            if byte == DELIMITER {
                let position = Position::new(self.line, column_start, self.column);
                self.offset = index + 1;
                self.column += 1;
                return Some(self.emit(&input[start..index], position, false));
            }

            if byte == b'\n' {
                self.line += 1;
                self.column = 1;
                column_start = 1;
                continuations = 0;
            } else if is_utf8_continuation(byte) && continuations > 0 {
                continuations -= 1;
            } else {
                // Stray continuation bytes count as one replaced character each
                self.column += 1;
                continuations = expected_continuations(byte);
            }
        }

        // Whatever follows the last delimiter is delivered once, even if empty
        self.finished = true;
        self.offset = input.len();
        let position = Position::new(self.line, column_start, self.column);
        Some(self.emit(&input[start..], position, true))
    }

    fn emit(&mut self, bytes: &'a [u8], position: Position, is_final: bool) -> Token<'a> {
        self.tokens_consumed += 1;
        self.last_position = position;
        Token {
            bytes,
            position,
            is_final,
        }
    }

    /// Look at the next token without consuming it
    pub fn peek(&self) -> Option<Token<'a>> {
        self.clone().next_token()
    }

    /// True when no tokens remain, not even an empty final one
    pub fn is_exhausted(&self) -> bool {
        self.finished
    }

    /// True if at least `count` tokens remain from the cursor
    pub fn has_at_least(&self, count: usize) -> bool {
        self.clone().take(count).count() >= count
    }

    /// Position of the most recently extracted token
    pub fn last_position(&self) -> Position {
        self.last_position
    }

    pub fn tokens_consumed(&self) -> usize {
        self.tokens_consumed
    }

    /// Current line number (1-based)
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn input_len(&self) -> usize {
        self.input.len()
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

fn is_utf8_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

/// Continuation bytes that follow a valid UTF-8 lead byte
fn expected_continuations(lead: u8) -> usize {
    match lead {
        0xC2..=0xDF => 1,
        0xE0..=0xEF => 2,
        0xF0..=0xF4 => 3,
        _ => 0,
    }
}
