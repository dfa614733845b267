// SPDX-License-Identifier: Apache-2.0

use core::borrow::Borrow;
use core::fmt::{self, Write};
use core::ops::Deref;

use crate::escape_processor::EscapeProcessor;

/// An immutable JSON string payload.
///
/// Hashes and compares by its text, so it can key a table that is queried
/// with plain `&str`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JsonString {
    value: String,
}

impl JsonString {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Get the underlying text, without quotes or escapes.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

impl Borrow<str> for JsonString {
    fn borrow(&self) -> &str {
        &self.value
    }
}

impl AsRef<str> for JsonString {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl Deref for JsonString {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl From<&str> for JsonString {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for JsonString {
    fn from(value: String) -> Self {
        Self { value }
    }
}

/// Writes the text in double quotes, escaping quotes, backslashes and control
/// characters.
impl fmt::Display for JsonString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('"')?;
        for ch in self.value.chars() {
            match EscapeProcessor::escape_for_output(ch) {
                Some(escaped) => f.write_str(escaped)?,
                None if (ch as u32) < 0x20 => {
                    write!(f, "\\u{:04x}", ch as u32)?
                }
                None => f.write_char(ch)?,
            }
        }
        f.write_char('"')
    }
}
