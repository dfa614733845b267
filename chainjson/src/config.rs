// SPDX-License-Identifier: Apache-2.0

//! Parse-time options.

/// Nesting depth allowed by [`ParserConfig::default`].
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// How backslash escapes in strings are stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EscapeMode {
    /// Store the character the escape stands for (`\n` becomes a newline).
    #[default]
    Decode,
    /// Store the escape as written: a backslash followed by the escape
    /// letter. Such strings print with the backslash doubled, so they do not
    /// survive a write/parse round trip.
    Preserve,
}

/// What may appear between array elements and around object member colons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SeparatorMode {
    /// Only `,` between elements and `:` between a key and its value.
    #[default]
    Strict,
    /// Any single non-whitespace character is taken as a separator.
    Lenient,
}

/// Options controlling a [`Parser`](crate::Parser).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    pub escape_mode: EscapeMode,
    pub separator_mode: SeparatorMode,
    /// Maximum nesting of arrays and objects.
    pub max_depth: usize,
}

impl ParserConfig {
    /// Standard JSON: decoded escapes, strict separators.
    pub const fn strict() -> Self {
        Self {
            escape_mode: EscapeMode::Decode,
            separator_mode: SeparatorMode::Strict,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Accepts loosely separated input and keeps escapes as written.
    pub const fn lenient() -> Self {
        Self {
            escape_mode: EscapeMode::Preserve,
            separator_mode: SeparatorMode::Lenient,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub const fn with_escape_mode(mut self, escape_mode: EscapeMode) -> Self {
        self.escape_mode = escape_mode;
        self
    }

    pub const fn with_separator_mode(mut self, separator_mode: SeparatorMode) -> Self {
        self.separator_mode = separator_mode;
        self
    }

    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::strict()
    }
}
