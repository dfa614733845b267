// SPDX-License-Identifier: Apache-2.0

//! Recursive-descent JSON parser.
//!
//! Each [`Parser`] owns its [`Scanner`] and is consumed by
//! [`parse`](Parser::parse), so a cursor is never shared between parses.
//! Dispatch looks at a single lookahead character:
//!
//! | lookahead        | parsed as                         |
//! |------------------|-----------------------------------|
//! | `t`, `f`, `n`    | the literal `true`, `false`, `null` |
//! | `"`              | string                            |
//! | `[`              | array                             |
//! | `{`              | object                            |
//! | `]` `}` `,` `:`  | error                             |
//! | anything else    | number                            |

use log::{debug, trace};

use crate::config::{EscapeMode, ParserConfig, SeparatorMode};
use crate::escape_processor::{EscapeError, EscapeProcessor};
use crate::json_array::JsonArray;
use crate::json_hash::JsonHash;
use crate::json_number::JsonNumber;
use crate::json_string::JsonString;
use crate::parse_error::ParseError;
use crate::scanner::{is_whitespace, Scanner};
use crate::value::JsonValue;

/// Characters that end a number. The delimiter itself is pushed back.
fn is_number_delimiter(ch: char) -> bool {
    matches!(ch, ']' | ',' | '}') || is_whitespace(ch)
}

/// A single-use parser over one JSON document.
///
/// # Example
/// ```
/// use chainjson::{JsonValue, Parser};
///
/// let value = Parser::new(r#"{"a": [1, 2]}"#).parse().unwrap();
/// assert_eq!(value.get("a").and_then(|a| a.get_index(1)), Some(&JsonValue::from(2)));
/// ```
#[derive(Debug)]
pub struct Parser<'a> {
    scanner: Scanner<'a>,
    config: ParserConfig,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Creates a parser with the default (strict) configuration.
    pub fn new(input: &'a str) -> Self {
        Self::with_config(input, ParserConfig::default())
    }

    pub fn with_config(input: &'a str, config: ParserConfig) -> Self {
        Self {
            scanner: Scanner::new(input),
            config,
            depth: 0,
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses exactly one value; only whitespace may follow it.
    pub fn parse(mut self) -> Result<JsonValue, ParseError> {
        let value = self.parse_value()?;
        self.scanner.skip_whitespace();
        if !self.scanner.is_at_end() {
            return Err(ParseError::TrailingInput {
                position: self.scanner.position(),
            });
        }
        debug!(
            "parsed {} from {} characters",
            value.type_name(),
            self.scanner.position()
        );
        Ok(value)
    }

    fn end_of_input(&self) -> ParseError {
        ParseError::UnexpectedEndOfInput {
            position: self.scanner.position(),
        }
    }

    fn parse_value(&mut self) -> Result<JsonValue, ParseError> {
        let lookahead = self
            .scanner
            .skip_whitespace()
            .ok_or_else(|| self.end_of_input())?;
        match lookahead {
            't' => self.parse_literal("true", JsonValue::Bool(true)),
            'f' => self.parse_literal("false", JsonValue::Bool(false)),
            'n' => self.parse_literal("null", JsonValue::Null),
            '"' => {
                self.scanner.advance();
                self.parse_string().map(JsonValue::String)
            }
            '[' => self.parse_array(),
            '{' => self.parse_hash(),
            ']' | '}' | ',' | ':' => Err(ParseError::UnexpectedCharacter {
                found: lookahead,
                position: self.scanner.position(),
            }),
            _ => self.parse_number(),
        }
    }

    fn parse_literal(
        &mut self,
        literal: &'static str,
        value: JsonValue,
    ) -> Result<JsonValue, ParseError> {
        let position = self.scanner.position();
        for expected in literal.chars() {
            match self.scanner.advance() {
                Some(ch) if ch == expected => {}
                Some(_) => {
                    return Err(ParseError::InvalidLiteral {
                        expected: literal,
                        position,
                    })
                }
                None => return Err(self.end_of_input()),
            }
        }
        Ok(value)
    }

    /// Reads string contents; the opening quote is already consumed.
    fn parse_string(&mut self) -> Result<JsonString, ParseError> {
        let mut text = String::new();
        loop {
            match self.scanner.advance() {
                Some('"') => return Ok(JsonString::from(text)),
                Some('\\') => self.parse_escape(&mut text)?,
                Some(ch) => text.push(ch),
                None => return Err(self.end_of_input()),
            }
        }
    }

    /// Handles the escape after a backslash, appending to `text`.
    fn parse_escape(&mut self, text: &mut String) -> Result<(), ParseError> {
        let position = self.scanner.position();
        let escape = self.scanner.advance().ok_or_else(|| self.end_of_input())?;
        match self.config.escape_mode {
            EscapeMode::Decode if escape == 'u' => {
                text.push(self.read_unicode_escape()?);
            }
            EscapeMode::Decode => {
                let ch = EscapeProcessor::process_simple_escape(escape)
                    .ok_or_else(|| EscapeError::InvalidEscape.at(position))?;
                text.push(ch);
            }
            EscapeMode::Preserve => {
                if !EscapeProcessor::is_escape_char(escape) {
                    return Err(EscapeError::InvalidEscape.at(position));
                }
                text.push('\\');
                text.push(escape);
                if escape == 'u' {
                    text.extend(self.read_hex4()?);
                }
            }
        }
        Ok(())
    }

    fn read_hex4(&mut self) -> Result<[char; 4], ParseError> {
        let mut digits = ['0'; 4];
        for digit in &mut digits {
            let position = self.scanner.position();
            let ch = self.scanner.advance().ok_or_else(|| self.end_of_input())?;
            EscapeProcessor::hex_digit_value(ch).map_err(|e| e.at(position))?;
            *digit = ch;
        }
        Ok(digits)
    }

    /// Decodes `XXXX` after `\u`, consuming a second `\uXXXX` when the first
    /// is a high surrogate.
    fn read_unicode_escape(&mut self) -> Result<char, ParseError> {
        let start = self.scanner.position();
        let unit = EscapeProcessor::hex4_value(self.read_hex4()?).map_err(|e| e.at(start))?;

        let low = if EscapeProcessor::is_high_surrogate(unit) {
            for expected in ['\\', 'u'] {
                match self.scanner.advance() {
                    Some(ch) if ch == expected => {}
                    Some(_) => return Err(ParseError::InvalidUnicodeCodepoint { position: start }),
                    None => return Err(self.end_of_input()),
                }
            }
            let low_start = self.scanner.position();
            Some(EscapeProcessor::hex4_value(self.read_hex4()?).map_err(|e| e.at(low_start))?)
        } else {
            None
        };

        EscapeProcessor::unicode_escape(unit, low).map_err(|e| e.at(start))
    }

    /// Reads up to a delimiter, starting from the unconsumed lookahead.
    fn parse_number(&mut self) -> Result<JsonValue, ParseError> {
        let position = self.scanner.position();
        let mut text = String::new();
        while let Some(ch) = self.scanner.advance() {
            if is_number_delimiter(ch) {
                self.scanner.push_back()?;
                break;
            }
            text.push(ch);
        }
        JsonNumber::from_literal(&text)
            .map(JsonValue::Number)
            .ok_or(ParseError::InvalidNumber { position })
    }

    fn enter_container(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > self.config.max_depth {
            return Err(ParseError::NestingTooDeep {
                depth: self.depth,
                position: self.scanner.position(),
            });
        }
        Ok(())
    }

    /// Consumes the next non-whitespace character and returns whether it is
    /// `close`. Anything else must be a `,` unless separators are lenient.
    fn end_of_sequence(&mut self, close: char) -> Result<bool, ParseError> {
        let ch = self
            .scanner
            .skip_whitespace()
            .ok_or_else(|| self.end_of_input())?;
        let position = self.scanner.position();
        self.scanner.advance();
        if ch == close {
            return Ok(true);
        }
        match self.config.separator_mode {
            SeparatorMode::Strict if ch != ',' => Err(ParseError::ExpectedSeparator {
                expected: ',',
                found: ch,
                position,
            }),
            _ => Ok(false),
        }
    }

    fn expect_colon(&mut self) -> Result<(), ParseError> {
        let ch = self
            .scanner
            .skip_whitespace()
            .ok_or_else(|| self.end_of_input())?;
        let position = self.scanner.position();
        self.scanner.advance();
        match self.config.separator_mode {
            SeparatorMode::Strict if ch != ':' => Err(ParseError::ExpectedSeparator {
                expected: ':',
                found: ch,
                position,
            }),
            _ => Ok(()),
        }
    }

    fn parse_array(&mut self) -> Result<JsonValue, ParseError> {
        self.enter_container()?;
        trace!("array at {} (depth {})", self.scanner.position(), self.depth);
        self.scanner.advance();

        let mut array = JsonArray::new();
        if self.scanner.skip_whitespace() == Some(']') {
            self.scanner.advance();
        } else {
            loop {
                array.push(self.parse_value()?);
                if self.end_of_sequence(']')? {
                    break;
                }
            }
        }
        self.depth -= 1;
        Ok(JsonValue::Array(array))
    }

    fn parse_hash(&mut self) -> Result<JsonValue, ParseError> {
        self.enter_container()?;
        trace!("object at {} (depth {})", self.scanner.position(), self.depth);
        self.scanner.advance();

        let mut hash = JsonHash::new();
        if self.scanner.skip_whitespace() == Some('}') {
            self.scanner.advance();
        } else {
            loop {
                self.scanner.skip_whitespace();
                let key_position = self.scanner.position();
                let key = match self.parse_value()? {
                    JsonValue::String(key) => key,
                    _ => {
                        return Err(ParseError::ExpectedStringKey {
                            position: key_position,
                        })
                    }
                };
                self.expect_colon()?;
                let value = self.parse_value()?;
                hash.set(key, value);
                if self.end_of_sequence('}')? {
                    break;
                }
            }
        }
        self.depth -= 1;
        Ok(JsonValue::Hash(hash))
    }
}
