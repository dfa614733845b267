// SPDX-License-Identifier: Apache-2.0

use core::fmt;

/// A key/value cell stored in a bucket chain.
///
/// Pairs are not mutable through the public API; `set` on a table replaces
/// the whole pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KvPair<K, V> {
    key: K,
    value: V,
}

impl<K, V> KvPair<K, V> {
    /// Creates a new pair.
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub(crate) fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// Splits the pair back into its key and value.
    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }

    pub fn into_value(self) -> V {
        self.value
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for KvPair<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.value)
    }
}
