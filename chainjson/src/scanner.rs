// SPDX-License-Identifier: Apache-2.0

/// Error type for Scanner operations.
#[derive(Debug, PartialEq)]
pub enum Error {
    /// `push_back` was called without a preceding `advance`, or twice in a row.
    NothingToPushBack,
}

/// A one-character-lookahead cursor over buffered input.
///
/// Keeps the byte offset used for slicing separately from the character
/// position reported in diagnostics. A single push-back slot remembers the
/// width of the most recently advanced character.
#[derive(Debug)]
pub struct Scanner<'a> {
    input: &'a str,
    offset: usize,
    position: usize,
    last_width: Option<usize>,
}

/// JSON whitespace: space, tab, newline and carriage return.
pub fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r')
}

impl<'a> Scanner<'a> {
    /// Creates a new Scanner positioned at the start of `input`.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            offset: 0,
            position: 0,
            last_width: None,
        }
    }

    /// Number of characters consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_at_end(&self) -> bool {
        self.offset >= self.input.len()
    }

    /// Returns the next character without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.input.get(self.offset..)?.chars().next()
    }

    /// Consumes and returns the next character.
    pub fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.offset += ch.len_utf8();
        self.position += 1;
        self.last_width = Some(ch.len_utf8());
        Some(ch)
    }

    /// Un-reads the character returned by the last `advance`.
    pub fn push_back(&mut self) -> Result<(), Error> {
        let width = self.last_width.take().ok_or(Error::NothingToPushBack)?;
        self.offset -= width;
        self.position -= 1;
        Ok(())
    }

    /// Consumes whitespace and returns the following character, which is
    /// left unconsumed.
    pub fn skip_whitespace(&mut self) -> Option<char> {
        while let Some(ch) = self.peek() {
            if !is_whitespace(ch) {
                return Some(ch);
            }
            self.advance();
        }
        None
    }
}
