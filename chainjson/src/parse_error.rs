// SPDX-License-Identifier: Apache-2.0

use std::io;

/// Errors that can occur during JSON parsing
///
/// Every syntax error carries the character position at which it was
/// detected.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The input ended where more was required.
    UnexpectedEndOfInput { position: usize },
    /// Non-whitespace characters follow the first complete value.
    TrailingInput { position: usize },
    /// An object key position held a value that is not a string.
    ExpectedStringKey { position: usize },
    /// A structural character appeared where a value was expected.
    UnexpectedCharacter { found: char, position: usize },
    /// A `,` or `:` was required between elements.
    ExpectedSeparator {
        expected: char,
        found: char,
        position: usize,
    },
    /// `true`, `false` or `null` was misspelled.
    InvalidLiteral {
        expected: &'static str,
        position: usize,
    },
    /// The characters up to the next delimiter do not form a number.
    InvalidNumber { position: usize },
    /// Invalid escape sequence character.
    InvalidEscapeSequence { position: usize },
    /// Invalid hex digits in Unicode escape sequence.
    InvalidUnicodeHex { position: usize },
    /// Valid hex but invalid Unicode codepoint, including unpaired surrogates.
    InvalidUnicodeCodepoint { position: usize },
    /// Arrays and objects are nested deeper than the configured limit.
    NestingTooDeep { depth: usize, position: usize },
    /// The input bytes were not valid UTF-8.
    InvalidUtf8(core::str::Utf8Error),
    /// The parser entered an unexpected internal state.
    UnexpectedState(&'static str),
}

impl ParseError {
    /// Character position of a syntax error, if it has one.
    pub fn position(&self) -> Option<usize> {
        match self {
            ParseError::UnexpectedEndOfInput { position }
            | ParseError::TrailingInput { position }
            | ParseError::ExpectedStringKey { position }
            | ParseError::UnexpectedCharacter { position, .. }
            | ParseError::ExpectedSeparator { position, .. }
            | ParseError::InvalidLiteral { position, .. }
            | ParseError::InvalidNumber { position }
            | ParseError::InvalidEscapeSequence { position }
            | ParseError::InvalidUnicodeHex { position }
            | ParseError::InvalidUnicodeCodepoint { position }
            | ParseError::NestingTooDeep { position, .. } => Some(*position),
            ParseError::InvalidUtf8(_) | ParseError::UnexpectedState(_) => None,
        }
    }
}

impl From<core::str::Utf8Error> for ParseError {
    fn from(err: core::str::Utf8Error) -> Self {
        ParseError::InvalidUtf8(err)
    }
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParseError::UnexpectedEndOfInput { position } => {
                write!(f, "unexpected end of input at position {position}")
            }
            ParseError::TrailingInput { position } => {
                write!(f, "characters remain after the value at position {position}")
            }
            ParseError::ExpectedStringKey { position } => {
                write!(f, "expected a string key at position {position}")
            }
            ParseError::UnexpectedCharacter { found, position } => {
                write!(f, "expected a value but found {found:?} at position {position}")
            }
            ParseError::ExpectedSeparator {
                expected,
                found,
                position,
            } => write!(
                f,
                "expected {expected:?} but found {found:?} at position {position}"
            ),
            ParseError::InvalidLiteral { expected, position } => {
                write!(f, "expected literal `{expected}` at position {position}")
            }
            ParseError::InvalidNumber { position } => {
                write!(f, "invalid number starting at position {position}")
            }
            ParseError::InvalidEscapeSequence { position } => {
                write!(f, "invalid escape sequence at position {position}")
            }
            ParseError::InvalidUnicodeHex { position } => {
                write!(f, "invalid hex digit in unicode escape at position {position}")
            }
            ParseError::InvalidUnicodeCodepoint { position } => {
                write!(f, "invalid unicode codepoint in escape at position {position}")
            }
            ParseError::NestingTooDeep { depth, position } => {
                write!(f, "nesting depth {depth} exceeded at position {position}")
            }
            ParseError::InvalidUtf8(e) => write!(f, "Invalid UTF-8: {e}"),
            ParseError::UnexpectedState(state) => write!(f, "unexpected parser state: {state}"),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::InvalidUtf8(e) => Some(e),
            _ => None,
        }
    }
}

/// Errors from the reader and file entry points: either the source could not
/// be read, or what was read did not parse.
#[derive(Debug)]
pub enum LoadError {
    Io(io::Error),
    Parse(ParseError),
}

impl From<io::Error> for LoadError {
    fn from(err: io::Error) -> Self {
        LoadError::Io(err)
    }
}

impl From<ParseError> for LoadError {
    fn from(err: ParseError) -> Self {
        LoadError::Parse(err)
    }
}

impl From<core::str::Utf8Error> for LoadError {
    fn from(err: core::str::Utf8Error) -> Self {
        LoadError::Parse(err.into())
    }
}

impl core::fmt::Display for LoadError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "failed to read JSON source: {e}"),
            LoadError::Parse(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Parse(e) => Some(e),
        }
    }
}
