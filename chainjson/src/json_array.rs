// SPDX-License-Identifier: Apache-2.0

use core::fmt;

use crate::value::JsonValue;

/// Assignment to an index past the end of a [`JsonArray`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexOutOfBounds {
    pub index: usize,
    pub len: usize,
}

impl fmt::Display for IndexOutOfBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "index {} out of bounds for length {}", self.index, self.len)
    }
}

impl std::error::Error for IndexOutOfBounds {}

/// An ordered, index-addressable sequence of values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonArray {
    values: Vec<JsonValue>,
}

impl JsonArray {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value.
    pub fn push(&mut self, value: impl Into<JsonValue>) {
        self.values.push(value.into());
    }

    pub fn get(&self, index: usize) -> Option<&JsonValue> {
        self.values.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut JsonValue> {
        self.values.get_mut(index)
    }

    /// Replaces the value at `index`, returning the old one.
    ///
    /// # Errors
    ///
    /// [`IndexOutOfBounds`] if `index >= len()`; the array is left unchanged.
    pub fn set(
        &mut self,
        index: usize,
        value: impl Into<JsonValue>,
    ) -> Result<JsonValue, IndexOutOfBounds> {
        let len = self.values.len();
        let slot = self
            .values
            .get_mut(index)
            .ok_or(IndexOutOfBounds { index, len })?;
        Ok(core::mem::replace(slot, value.into()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, JsonValue> {
        self.values.iter()
    }

    pub fn as_slice(&self) -> &[JsonValue] {
        &self.values
    }
}

impl From<Vec<JsonValue>> for JsonArray {
    fn from(values: Vec<JsonValue>) -> Self {
        Self { values }
    }
}

impl<V: Into<JsonValue>> FromIterator<V> for JsonArray {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl IntoIterator for JsonArray {
    type Item = JsonValue;
    type IntoIter = std::vec::IntoIter<JsonValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a JsonArray {
    type Item = &'a JsonValue;
    type IntoIter = core::slice::Iter<'a, JsonValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl fmt::Display for JsonArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str("]")
    }
}
