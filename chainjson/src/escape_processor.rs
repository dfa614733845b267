// SPDX-License-Identifier: Apache-2.0

use crate::parse_error::ParseError;

/// What went wrong inside an escape sequence, before a position is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeError {
    InvalidEscape,
    InvalidHex,
    InvalidCodepoint,
}

impl EscapeError {
    /// Attaches the character position at which the sequence failed.
    pub fn at(self, position: usize) -> ParseError {
        match self {
            EscapeError::InvalidEscape => ParseError::InvalidEscapeSequence { position },
            EscapeError::InvalidHex => ParseError::InvalidUnicodeHex { position },
            EscapeError::InvalidCodepoint => ParseError::InvalidUnicodeCodepoint { position },
        }
    }
}

/// Pure helpers for decoding and encoding JSON string escapes.
pub struct EscapeProcessor;

impl EscapeProcessor {
    /// Decodes the character following a backslash in a simple escape.
    ///
    /// Besides the standard JSON set this accepts `\'`. Returns `None` for
    /// `u` (handled by [`unicode_escape`](Self::unicode_escape)) and for any
    /// unknown escape.
    pub fn process_simple_escape(escape_char: char) -> Option<char> {
        match escape_char {
            'n' => Some('\n'),
            't' => Some('\t'),
            'r' => Some('\r'),
            '\\' => Some('\\'),
            '"' => Some('"'),
            '/' => Some('/'),
            '\'' => Some('\''),
            'b' => Some('\u{08}'), // Backspace
            'f' => Some('\u{0C}'), // Form feed
            _ => None,
        }
    }

    /// Whether `escape_char` may follow a backslash.
    pub fn is_escape_char(escape_char: char) -> bool {
        escape_char == 'u' || Self::process_simple_escape(escape_char).is_some()
    }

    /// The numeric value (0-15) of a hex digit.
    pub fn hex_digit_value(ch: char) -> Result<u32, EscapeError> {
        ch.to_digit(16).ok_or(EscapeError::InvalidHex)
    }

    /// Folds four hex digits into a UTF-16 code unit.
    pub fn hex4_value(digits: [char; 4]) -> Result<u32, EscapeError> {
        digits.iter().try_fold(0u32, |acc, &ch| {
            Self::hex_digit_value(ch).map(|digit| (acc << 4) | digit)
        })
    }

    /// Check if a Unicode codepoint is a high surrogate (0xD800-0xDBFF)
    pub fn is_high_surrogate(codepoint: u32) -> bool {
        (0xD800..=0xDBFF).contains(&codepoint)
    }

    /// Check if a Unicode codepoint is a low surrogate (0xDC00-0xDFFF)
    pub fn is_low_surrogate(codepoint: u32) -> bool {
        (0xDC00..=0xDFFF).contains(&codepoint)
    }

    /// Combine a high and low surrogate pair into a single Unicode codepoint
    pub fn combine_surrogate_pair(high: u32, low: u32) -> Result<u32, EscapeError> {
        if !Self::is_high_surrogate(high) || !Self::is_low_surrogate(low) {
            return Err(EscapeError::InvalidCodepoint);
        }
        Ok(0x10000 + ((high & 0x3FF) << 10) + (low & 0x3FF))
    }

    /// Resolves a `\uXXXX` code unit, plus the following one when the first is
    /// a high surrogate, into a character.
    pub fn unicode_escape(unit: u32, low: Option<u32>) -> Result<char, EscapeError> {
        let codepoint = match low {
            Some(low) => Self::combine_surrogate_pair(unit, low)?,
            None if Self::is_high_surrogate(unit) || Self::is_low_surrogate(unit) => {
                return Err(EscapeError::InvalidCodepoint)
            }
            None => unit,
        };
        char::from_u32(codepoint).ok_or(EscapeError::InvalidCodepoint)
    }

    /// The escaped form of `ch` when written inside a JSON string, or `None`
    /// if it is written as-is.
    pub fn escape_for_output(ch: char) -> Option<&'static str> {
        match ch {
            '"' => Some("\\\""),
            '\\' => Some("\\\\"),
            '\n' => Some("\\n"),
            '\r' => Some("\\r"),
            '\t' => Some("\\t"),
            '\u{08}' => Some("\\b"),
            '\u{0C}' => Some("\\f"),
            _ => None,
        }
    }
}
