// SPDX-License-Identifier: Apache-2.0

//! The tree produced by the parser.

use core::fmt;
use std::io;

use crate::json_array::JsonArray;
use crate::json_hash::JsonHash;
use crate::json_number::JsonNumber;
use crate::json_string::JsonString;

/// Writes a value in its canonical JSON form.
///
/// The canonical form is the `Display` output: arrays as `[v, v]`, objects as
/// `{k: v, k: v}` in table order, strings quoted and escaped, numbers by their
/// literal text. No trailing newline is written.
pub trait WriteJson: fmt::Display {
    fn write_json<W: io::Write + ?Sized>(&self, sink: &mut W) -> io::Result<()> {
        write!(sink, "{self}")
    }
}

/// Any JSON value.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum JsonValue {
    #[default]
    Null,
    Bool(bool),
    Number(JsonNumber),
    String(JsonString),
    Array(JsonArray),
    Hash(JsonHash),
}

impl JsonValue {
    /// Name of the variant, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            JsonValue::Null => "null",
            JsonValue::Bool(_) => "boolean",
            JsonValue::Number(_) => "number",
            JsonValue::String(_) => "string",
            JsonValue::Array(_) => "array",
            JsonValue::Hash(_) => "object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&JsonNumber> {
        match self {
            JsonValue::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().and_then(JsonNumber::as_i64)
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().and_then(JsonNumber::as_f64)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&JsonArray> {
        match self {
            JsonValue::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut JsonArray> {
        match self {
            JsonValue::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_hash(&self) -> Option<&JsonHash> {
        match self {
            JsonValue::Hash(h) => Some(h),
            _ => None,
        }
    }

    pub fn as_hash_mut(&mut self) -> Option<&mut JsonHash> {
        match self {
            JsonValue::Hash(h) => Some(h),
            _ => None,
        }
    }

    /// Looks up an object member; `None` for missing keys and non-objects.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.as_hash().and_then(|hash| hash.get(key).ok())
    }

    /// Looks up an array element; `None` out of range and for non-arrays.
    pub fn get_index(&self, index: usize) -> Option<&JsonValue> {
        self.as_array().and_then(|array| array.get(index))
    }
}

impl fmt::Display for JsonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonValue::Null => f.write_str("null"),
            JsonValue::Bool(b) => write!(f, "{b}"),
            JsonValue::Number(n) => write!(f, "{n}"),
            JsonValue::String(s) => write!(f, "{s}"),
            JsonValue::Array(a) => write!(f, "{a}"),
            JsonValue::Hash(h) => write!(f, "{h}"),
        }
    }
}

impl WriteJson for JsonValue {}
impl WriteJson for JsonNumber {}
impl WriteJson for JsonString {}
impl WriteJson for JsonArray {}
impl WriteJson for JsonHash {}

impl From<()> for JsonValue {
    fn from(_: ()) -> Self {
        JsonValue::Null
    }
}

impl From<bool> for JsonValue {
    fn from(value: bool) -> Self {
        JsonValue::Bool(value)
    }
}

impl From<i32> for JsonValue {
    fn from(value: i32) -> Self {
        JsonValue::Number(JsonNumber::from_i64(value.into()))
    }
}

impl From<i64> for JsonValue {
    fn from(value: i64) -> Self {
        JsonValue::Number(JsonNumber::from_i64(value))
    }
}

impl From<JsonNumber> for JsonValue {
    fn from(value: JsonNumber) -> Self {
        JsonValue::Number(value)
    }
}

impl From<&str> for JsonValue {
    fn from(value: &str) -> Self {
        JsonValue::String(value.into())
    }
}

impl From<String> for JsonValue {
    fn from(value: String) -> Self {
        JsonValue::String(value.into())
    }
}

impl From<JsonString> for JsonValue {
    fn from(value: JsonString) -> Self {
        JsonValue::String(value)
    }
}

impl From<JsonArray> for JsonValue {
    fn from(value: JsonArray) -> Self {
        JsonValue::Array(value)
    }
}

impl From<Vec<JsonValue>> for JsonValue {
    fn from(value: Vec<JsonValue>) -> Self {
        JsonValue::Array(value.into())
    }
}

impl From<JsonHash> for JsonValue {
    fn from(value: JsonHash) -> Self {
        JsonValue::Hash(value)
    }
}
