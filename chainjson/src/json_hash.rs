// SPDX-License-Identifier: Apache-2.0

use core::fmt;

use crate::hash_table::{ChainedHashTable, Iter, KeyNotFound};
use crate::json_string::JsonString;
use crate::kv_pair::KvPair;
use crate::value::JsonValue;

/// A JSON object backed by a [`ChainedHashTable`].
///
/// Iteration and printing follow the table's bucket order, not insertion
/// order. Equality ignores order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonHash {
    table: ChainedHashTable<JsonString, JsonValue>,
}

impl JsonHash {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value stored under `key`.
    ///
    /// # Errors
    ///
    /// [`KeyNotFound`] if the object has no such member.
    pub fn get(&self, key: &str) -> Result<&JsonValue, KeyNotFound> {
        self.table.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Result<&mut JsonValue, KeyNotFound> {
        self.table.get_mut(key)
    }

    /// Stores a member, returning the value it replaced. The last write for a
    /// key wins.
    pub fn set(
        &mut self,
        key: impl Into<JsonString>,
        value: impl Into<JsonValue>,
    ) -> Option<JsonValue> {
        self.table.set(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<JsonValue> {
        self.table.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.table.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, JsonString, JsonValue> {
        self.table.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &JsonString> + '_ {
        self.table.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &JsonValue> + '_ {
        self.table.values()
    }

    /// The backing table, e.g. for [`dump`](ChainedHashTable::dump).
    pub fn table(&self) -> &ChainedHashTable<JsonString, JsonValue> {
        &self.table
    }

    /// Mutable access to the backing table, e.g. to attach a reporter.
    pub fn table_mut(&mut self) -> &mut ChainedHashTable<JsonString, JsonValue> {
        &mut self.table
    }
}

impl<K, V> FromIterator<(K, V)> for JsonHash
where
    K: Into<JsonString>,
    V: Into<JsonValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut hash = Self::new();
        for (key, value) in iter {
            hash.set(key, value);
        }
        hash
    }
}

impl<'a> IntoIterator for &'a JsonHash {
    type Item = &'a KvPair<JsonString, JsonValue>;
    type IntoIter = Iter<'a, JsonString, JsonValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.table.iter()
    }
}

impl fmt::Display for JsonHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, pair) in self.table.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{pair}")?;
        }
        f.write_str("}")
    }
}
