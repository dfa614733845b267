// SPDX-License-Identifier: Apache-2.0

use core::ops::Deref;
use core::str::FromStr;

/// Represents the parsed result of a JSON number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberResult {
    /// Integer that fits in an `i64`
    Integer(i64),
    /// Integer too large for `i64` (use raw string for exact representation)
    IntegerOverflow,
    /// Finite real number
    Real(f64),
}

/// A JSON number holding both its exact literal text and its parsed value.
///
/// A literal is an integer if it contains none of `.`, `e` or `E`; anything
/// else is a real. Printing always reproduces the literal text.
#[derive(Debug, Clone)]
pub struct JsonNumber {
    raw: String,
    parsed: NumberResult,
}

impl JsonNumber {
    /// Builds a number from literal text, or `None` if the text is not a
    /// JSON number.
    ///
    /// ```
    /// use chainjson::{JsonNumber, NumberResult};
    ///
    /// let n = JsonNumber::from_literal("-12").unwrap();
    /// assert_eq!(n.parsed(), &NumberResult::Integer(-12));
    /// assert!(JsonNumber::from_literal("12abc").is_none());
    /// ```
    pub fn from_literal(text: &str) -> Option<Self> {
        if !is_number_literal(text) {
            return None;
        }
        let parsed = if is_integer(text) {
            parse_integer(text)
        } else {
            parse_real(text)?
        };
        Some(Self {
            raw: text.to_string(),
            parsed,
        })
    }

    pub fn from_i64(value: i64) -> Self {
        Self {
            raw: value.to_string(),
            parsed: NumberResult::Integer(value),
        }
    }

    /// Builds a real number. Returns `None` for NaN and infinities, which
    /// JSON cannot represent.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        // `{:?}` always keeps a fractional part or exponent, so the text
        // re-parses as a real.
        Some(Self {
            raw: format!("{value:?}"),
            parsed: NumberResult::Real(value),
        })
    }

    /// Get the parsed NumberResult.
    pub fn parsed(&self) -> &NumberResult {
        &self.parsed
    }

    /// The value as an `i64` if it is an integer that fits.
    pub fn as_i64(&self) -> Option<i64> {
        match self.parsed {
            NumberResult::Integer(val) => Some(val),
            _ => None,
        }
    }

    /// The value as an `f64`. Integers are converted; overflowing integers
    /// yield `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self.parsed {
            NumberResult::Real(val) => Some(val),
            NumberResult::Integer(val) => Some(val as f64),
            NumberResult::IntegerOverflow => None,
        }
    }

    /// Get the exact literal text.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Parse the number as a custom type using the exact string representation.
    pub fn parse<T: FromStr>(&self) -> Result<T, T::Err> {
        T::from_str(self.as_str())
    }

    /// Check if this number represents an integer (no decimal point or exponent).
    pub fn is_integer(&self) -> bool {
        matches!(
            self.parsed,
            NumberResult::Integer(_) | NumberResult::IntegerOverflow
        )
    }

    pub fn is_real(&self) -> bool {
        !self.is_integer()
    }
}

/// Numbers compare by parsed value, so `1.0` equals `1.00`. Overflowing
/// integers have no parsed value and compare by literal text.
impl PartialEq for JsonNumber {
    fn eq(&self, other: &Self) -> bool {
        match (&self.parsed, &other.parsed) {
            (NumberResult::IntegerOverflow, NumberResult::IntegerOverflow) => {
                self.raw == other.raw
            }
            (a, b) => a == b,
        }
    }
}

impl From<i64> for JsonNumber {
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

impl AsRef<str> for JsonNumber {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Deref for JsonNumber {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl core::fmt::Display for JsonNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Detects if number text represents an integer (no decimal point or exponent).
pub fn is_integer(text: &str) -> bool {
    !text.contains(['.', 'e', 'E'])
}

/// Checks `-?digits(.digits)?([eE][+-]?digits)?`.
fn is_number_literal(text: &str) -> bool {
    fn digits(bytes: &[u8], mut at: usize) -> usize {
        while bytes.get(at).is_some_and(u8::is_ascii_digit) {
            at += 1;
        }
        at
    }

    let bytes = text.as_bytes();
    let mut at = usize::from(bytes.first() == Some(&b'-'));

    let end = digits(bytes, at);
    if end == at {
        return false;
    }
    at = end;

    if bytes.get(at) == Some(&b'.') {
        let end = digits(bytes, at + 1);
        if end == at + 1 {
            return false;
        }
        at = end;
    }

    if matches!(bytes.get(at), Some(b'e' | b'E')) {
        at += 1;
        if matches!(bytes.get(at), Some(b'+' | b'-')) {
            at += 1;
        }
        let end = digits(bytes, at);
        if end == at {
            return false;
        }
        at = end;
    }

    at == bytes.len()
}

fn parse_integer(text: &str) -> NumberResult {
    // Literals are validated first, so overflow is the only way to fail.
    match text.parse::<i64>() {
        Ok(val) => NumberResult::Integer(val),
        Err(_) => NumberResult::IntegerOverflow,
    }
}

fn parse_real(text: &str) -> Option<NumberResult> {
    match f64::from_str(text) {
        Ok(val) if val.is_finite() => Some(NumberResult::Real(val)),
        _ => None,
    }
}
