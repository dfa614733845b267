// SPDX-License-Identifier: Apache-2.0

//! A separate-chaining hash table and a small JSON parser built on it.
//!
//! [`ChainedHashTable`] is a generic associative container that grows by
//! roughly doubling, with a little random jitter, whenever it is more than
//! half full. [`parse`] turns text into a [`JsonValue`] tree whose objects are
//! stored in such a table.
//!
//! ```
//! use chainjson::{parse, JsonValue, WriteJson};
//!
//! let value = parse(r#"{"a": 1, "b": [true, false, null]}"#).unwrap();
//! assert_eq!(value.get("a"), Some(&JsonValue::from(1)));
//!
//! let mut out = Vec::new();
//! value.get("b").unwrap().write_json(&mut out).unwrap();
//! assert_eq!(out, b"[true, false, null]");
//! ```

mod config;
pub use config::{EscapeMode, ParserConfig, SeparatorMode, DEFAULT_MAX_DEPTH};

mod escape_processor;

mod hash_table;
pub use hash_table::{
    ChainedHashTable, Iter, KeyNotFound, DEFAULT_CAPACITY, EXPANSION_JITTER, LOAD_FACTOR,
};

mod kv_pair;
pub use kv_pair::KvPair;

mod reporter;
pub use reporter::{LogReporter, Reporter};

mod scanner;

mod parse_error;
pub use parse_error::{LoadError, ParseError};

mod json_number;
pub use json_number::{JsonNumber, NumberResult};

mod json_string;
pub use json_string::JsonString;

mod json_array;
pub use json_array::{IndexOutOfBounds, JsonArray};

mod json_hash;
pub use json_hash::JsonHash;

mod value;
pub use value::{JsonValue, WriteJson};

mod parser;
pub use parser::Parser;

mod loader;
pub use loader::{parse_file, parse_file_with_config, parse_reader, parse_reader_with_config};

impl From<scanner::Error> for ParseError {
    fn from(err: scanner::Error) -> Self {
        match err {
            scanner::Error::NothingToPushBack => {
                ParseError::UnexpectedState("push-back without a preceding read")
            }
        }
    }
}

/// Parses one JSON value from `source` with the default configuration.
pub fn parse(source: &str) -> Result<JsonValue, ParseError> {
    Parser::new(source).parse()
}

pub fn parse_with_config(source: &str, config: ParserConfig) -> Result<JsonValue, ParseError> {
    Parser::with_config(source, config).parse()
}
