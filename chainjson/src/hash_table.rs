// SPDX-License-Identifier: Apache-2.0

//! A hash table that resolves collisions by separate chaining.
//!
//! The table is an array of buckets, each holding an ordered chain of
//! [`KvPair`]s. A key always lives in the bucket at `hash(key) % capacity`
//! and appears at most once in that chain.
//!
//! Before every insertion the load factor is checked; once more than
//! [`LOAD_FACTOR`] of the buckets' worth of pairs are stored, the table grows
//! to `2 * capacity + jitter` buckets, with `jitter` drawn from
//! `0..EXPANSION_JITTER`.
//!
//! # Examples
//!
//! ```
//! use chainjson::ChainedHashTable;
//!
//! let mut table = ChainedHashTable::new();
//! assert_eq!(table.set("alpha", 1), None);
//! assert_eq!(table.set("alpha", 2), Some(1));
//! assert_eq!(table.get("alpha"), Ok(&2));
//! assert!(table.get("beta").is_err());
//! assert_eq!(table.remove("alpha"), Some(2));
//! assert_eq!(table.remove("alpha"), None);
//! ```

use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::iter::FusedIterator;
use std::io;
use std::sync::Arc;

use log::{debug, trace};
use rand::Rng;

use crate::kv_pair::KvPair;
use crate::reporter::Reporter;

/// Number of buckets in a new or cleared table.
pub const DEFAULT_CAPACITY: usize = 10;

/// Fraction of the capacity that may be filled before the table expands.
pub const LOAD_FACTOR: f64 = 0.5;

/// Exclusive upper bound of the random number of buckets added on expansion.
pub const EXPANSION_JITTER: usize = 10;

type Chain<K, V> = Vec<KvPair<K, V>>;

/// Lookup of a key that is not stored in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyNotFound;

impl fmt::Display for KeyNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("key not found")
    }
}

impl std::error::Error for KeyNotFound {}

/// Maps a hash to a bucket index.
///
/// Hashes are unsigned, so the two's-complement minimum (`1 << 63` viewed as
/// `u64`) needs no special casing: the plain remainder is always in range.
pub(crate) fn slot_index(hash: u64, capacity: usize) -> usize {
    (hash % capacity as u64) as usize
}

fn empty_buckets<K, V>(capacity: usize) -> Vec<Chain<K, V>> {
    core::iter::repeat_with(Vec::new).take(capacity).collect()
}

/// A separate-chaining hash table with randomized expansion.
///
/// Generic over the [`BuildHasher`] so callers can pick the hash function;
/// the default is [`ahash::RandomState`].
///
/// The table performs no internal locking. Share it between threads only
/// behind external synchronization.
#[derive(Clone)]
pub struct ChainedHashTable<K, V, S = ahash::RandomState> {
    buckets: Vec<Chain<K, V>>,
    size: usize,
    hash_builder: S,
    reporter: Option<Arc<dyn Reporter>>,
    report_basic_calls: bool,
}

impl<K, V> ChainedHashTable<K, V, ahash::RandomState> {
    /// Creates an empty table with [`DEFAULT_CAPACITY`] buckets.
    pub fn new() -> Self {
        Self::with_hasher(ahash::RandomState::new())
    }
}

impl<K, V, S> ChainedHashTable<K, V, S> {
    /// Creates an empty table that hashes keys with `hash_builder`.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            buckets: empty_buckets(DEFAULT_CAPACITY),
            size: 0,
            hash_builder,
            reporter: None,
            report_basic_calls: false,
        }
    }

    /// Attaches a reporter, consuming and returning the table.
    pub fn with_reporter<R: Reporter + 'static>(mut self, reporter: R) -> Self {
        self.set_reporter(reporter);
        self
    }

    /// Attaches a reporter that is told about expansions and, when
    /// [`report_basic_calls`](Self::report_basic_calls) is enabled, about
    /// individual insertions, removals and failed lookups.
    pub fn set_reporter<R: Reporter + 'static>(&mut self, reporter: R) {
        self.reporter = Some(Arc::new(reporter));
    }

    /// Detaches the reporter, if any.
    pub fn clear_reporter(&mut self) {
        self.reporter = None;
    }

    /// Enables or disables reporting of basic calls.
    pub fn report_basic_calls(&mut self, report: bool) {
        self.report_basic_calls = report;
    }

    /// Number of pairs currently stored.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the table to a fresh, empty state with the default capacity.
    pub fn clear(&mut self) {
        self.buckets = empty_buckets(DEFAULT_CAPACITY);
        self.size = 0;
    }

    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Iterates over all pairs, bucket by bucket and in chain order within a
    /// bucket.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: self.buckets.iter(),
            chain: <&[KvPair<K, V>]>::default().iter(),
            remaining: self.size,
        }
    }

    /// Iterates over the keys in [`iter`](Self::iter) order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|pair| pair.key())
    }

    /// Iterates over the values in [`iter`](Self::iter) order.
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|pair| pair.value())
    }

    fn report(&self, message: impl FnOnce() -> String) {
        if let Some(reporter) = &self.reporter {
            reporter.report(&message());
        }
    }

    fn report_basic(&self, message: impl FnOnce() -> String) {
        if self.report_basic_calls {
            let message = message();
            trace!("{message}");
            self.report(|| message);
        }
    }
}

impl<K, V, S> ChainedHashTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Returns the value stored for `key`.
    ///
    /// # Errors
    ///
    /// [`KeyNotFound`] if no pair with an equal key is stored.
    pub fn get<Q>(&self, key: &Q) -> Result<&V, KeyNotFound>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.lookup(key) {
            Some(value) => Ok(value),
            None => {
                self.report_basic(|| format!("get failed in bucket {}", self.find(key)));
                Err(KeyNotFound)
            }
        }
    }

    /// Returns a mutable reference to the value stored for `key`.
    ///
    /// # Errors
    ///
    /// [`KeyNotFound`] if no pair with an equal key is stored.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V, KeyNotFound>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.find(key);
        let position = self.buckets[index]
            .iter()
            .position(|pair| pair.key().borrow() == key)
            .ok_or(KeyNotFound)?;
        Ok(self.buckets[index][position].value_mut())
    }

    /// Whether a pair with this key is stored. Never fails, never mutates.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.lookup(key).is_some()
    }

    /// Stores `value` under `key`, returning the value it replaced.
    ///
    /// The load factor is checked first, so an insertion into a full table
    /// expands it before the new pair is placed.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        if self.size as f64 > self.buckets.len() as f64 * LOAD_FACTOR {
            self.expand();
        }

        let (index, previous) = self.place(key, value);
        if previous.is_none() {
            self.size += 1;
            self.report_basic(|| format!("adding entry to bucket {index}"));
        }
        previous
    }

    /// Removes the pair stored under `key` and returns its value.
    ///
    /// Absence is not an error; it yields `None`.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.find(key);
        let chain = &mut self.buckets[index];
        let position = chain.iter().position(|pair| pair.key().borrow() == key)?;
        let pair = chain.remove(position);
        self.size -= 1;
        self.report_basic(|| format!("removing entry from bucket {index}"));
        Some(pair.into_value())
    }

    /// Writes the capacity, the size and every pair with its bucket and hash.
    ///
    /// ```text
    /// Capacity: 10, Size: 2
    ///   3: <alpha(8821930401):1>
    ///   7: <beta(1203940217):2>
    /// ```
    pub fn dump<W: io::Write + ?Sized>(&self, pen: &mut W) -> io::Result<()>
    where
        K: fmt::Display,
        V: fmt::Display,
    {
        writeln!(pen, "Capacity: {}, Size: {}", self.buckets.len(), self.size)?;
        for (index, chain) in self.buckets.iter().enumerate() {
            for pair in chain {
                writeln!(
                    pen,
                    "  {index}: <{}({}):{}>",
                    pair.key(),
                    self.hash_builder.hash_one(pair.key()),
                    pair.value()
                )?;
            }
        }
        Ok(())
    }

    fn find<Q>(&self, key: &Q) -> usize
    where
        Q: Hash + ?Sized,
    {
        slot_index(self.hash_builder.hash_one(key), self.buckets.len())
    }

    fn lookup<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.buckets[self.find(key)]
            .iter()
            .find(|pair| pair.key().borrow() == key)
            .map(KvPair::value)
    }

    /// Puts a pair into its bucket, replacing a pair with an equal key.
    ///
    /// Shared by `set` and `expand`; leaves `size` untouched.
    fn place(&mut self, key: K, value: V) -> (usize, Option<V>) {
        let index = self.find(&key);
        let chain = &mut self.buckets[index];
        match chain.iter().position(|pair| pair.key() == &key) {
            Some(position) => {
                let old = core::mem::replace(&mut chain[position], KvPair::new(key, value));
                (index, Some(old.into_value()))
            }
            None => {
                chain.push(KvPair::new(key, value));
                (index, None)
            }
        }
    }

    fn expand(&mut self) {
        let old_capacity = self.buckets.len();
        let new_capacity = 2 * old_capacity + rand::thread_rng().gen_range(0..EXPANSION_JITTER);
        debug!(
            "expanding table from {old_capacity} to {new_capacity} buckets ({} pairs)",
            self.size
        );
        self.report(|| format!("Expanding to {new_capacity} elements."));

        let old_buckets = core::mem::replace(&mut self.buckets, empty_buckets(new_capacity));
        for pair in old_buckets.into_iter().flatten() {
            let (key, value) = pair.into_parts();
            self.place(key, value);
        }
    }
}

impl<K, V> Default for ChainedHashTable<K, V, ahash::RandomState> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> fmt::Debug for ChainedHashTable<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|pair| (pair.key(), pair.value())))
            .finish()
    }
}

/// Two tables are equal when they hold the same number of pairs and every
/// pair of one is found, with an equal value, in the other. Bucket layout and
/// iteration order do not matter.
impl<K, V, S> PartialEq for ChainedHashTable<K, V, S>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size
            && self
                .iter()
                .all(|pair| other.lookup(pair.key()) == Some(pair.value()))
    }
}

impl<K, V, S> Eq for ChainedHashTable<K, V, S>
where
    K: Hash + Eq,
    V: Eq,
    S: BuildHasher,
{
}

impl<K, V, S> Extend<(K, V)> for ChainedHashTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for ChainedHashTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::with_hasher(S::default());
        table.extend(iter);
        table
    }
}

impl<'a, K, V, S> IntoIterator for &'a ChainedHashTable<K, V, S> {
    type Item = &'a KvPair<K, V>;
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Single-pass iterator over the pairs of a [`ChainedHashTable`].
#[derive(Debug)]
pub struct Iter<'a, K, V> {
    buckets: core::slice::Iter<'a, Chain<K, V>>,
    chain: core::slice::Iter<'a, KvPair<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = &'a KvPair<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(pair) = self.chain.next() {
                self.remaining -= 1;
                return Some(pair);
            }
            self.chain = self.buckets.next()?.iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

#[cfg(test)]
mod tests {
    use super::*;
    use core::hash::{BuildHasherDefault, Hasher};
    use std::collections::HashMap;
    use std::sync::Mutex;
    use test_log::test;

    /// Hashes every key to the same constant.
    #[derive(Default)]
    struct ConstHasher<const HASH: u64>;

    impl<const HASH: u64> Hasher for ConstHasher<HASH> {
        fn finish(&self) -> u64 {
            HASH
        }

        fn write(&mut self, _bytes: &[u8]) {}
    }

    type MinIntState = BuildHasherDefault<ConstHasher<{ 1 << 63 }>>;
    type MaxState = BuildHasherDefault<ConstHasher<{ u64::MAX }>>;

    fn pairs<K, V, S>(table: &ChainedHashTable<K, V, S>) -> HashMap<K, V>
    where
        K: Clone + Hash + Eq,
        V: Clone,
    {
        table
            .iter()
            .map(|pair| (pair.key().clone(), pair.value().clone()))
            .collect()
    }

    #[test]
    fn test_new_table_is_empty() {
        let table: ChainedHashTable<String, i32> = ChainedHashTable::new();
        assert_eq!(table.len(), 0);
        assert!(table.is_empty());
        assert_eq!(table.capacity(), DEFAULT_CAPACITY);
        assert_eq!(table.iter().next(), None);
    }

    #[test]
    fn test_set_get_overwrite() {
        let mut table = ChainedHashTable::new();
        assert_eq!(table.set("k".to_string(), 1), None);
        assert_eq!(table.get("k"), Ok(&1));
        assert_eq!(table.set("k".to_string(), 2), Some(1));
        assert_eq!(table.get("k"), Ok(&2));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_get_missing_key_fails() {
        let mut table: ChainedHashTable<i32, &str> = ChainedHashTable::new();
        assert_eq!(table.get(&7), Err(KeyNotFound));
        table.set(3, "three");
        assert_eq!(table.get(&7), Err(KeyNotFound));
        assert!(!table.contains_key(&7));
        assert!(table.contains_key(&3));
    }

    #[test]
    fn test_get_mut_updates_in_place() {
        let mut table = ChainedHashTable::new();
        table.set("count", 1);
        *table.get_mut("count").unwrap() += 41;
        assert_eq!(table.get("count"), Ok(&42));
        assert_eq!(table.get_mut("missing"), Err(KeyNotFound));
    }

    #[test]
    fn test_remove_twice() {
        let mut table: ChainedHashTable<i32, char> = ChainedHashTable::new();
        table.set(1, 'a');
        assert_eq!(table.remove(&1), Some('a'));
        assert_eq!(table.get(&1), Err(KeyNotFound));
        assert_eq!(table.remove(&1), None);
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn test_expansion_threshold() {
        let mut table: ChainedHashTable<i32, i32> = ChainedHashTable::new();
        // 10 buckets hold up to 5 pairs plus the one inserted at the threshold.
        for key in 0..6 {
            table.set(key, key);
        }
        assert_eq!(table.capacity(), DEFAULT_CAPACITY);

        table.set(6, 6);
        assert!(table.capacity() >= 2 * DEFAULT_CAPACITY);
        assert!(table.capacity() < 2 * DEFAULT_CAPACITY + EXPANSION_JITTER);
        assert_eq!(table.len(), 7);
    }

    #[test]
    fn test_expand_preserves_pairs_and_size() {
        let mut table = ChainedHashTable::new();
        for key in 0..5 {
            table.set(format!("key{key}"), key);
        }
        let before = pairs(&table);

        table.expand();

        assert!(table.capacity() >= 2 * DEFAULT_CAPACITY);
        assert_eq!(table.len(), 5);
        assert_eq!(pairs(&table), before);
    }

    #[test]
    fn test_every_key_sits_in_its_slot() {
        let mut table: ChainedHashTable<i32, i32> = ChainedHashTable::new();
        for key in 0..200 {
            table.set(key, key * 2);
        }
        for (index, chain) in table.buckets.iter().enumerate() {
            for pair in chain {
                assert_eq!(table.find(pair.key()), index);
            }
        }
        let chained: usize = table.buckets.iter().map(Vec::len).sum();
        assert_eq!(chained, table.len());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut table: ChainedHashTable<i32, ()> = ChainedHashTable::new();
        for key in 0..50 {
            table.set(key, ());
        }
        table.clear();
        assert_eq!(table.len(), 0);
        assert_eq!(table.capacity(), DEFAULT_CAPACITY);
        table.clear();
        assert_eq!(table.len(), 0);
        assert_eq!(table.capacity(), DEFAULT_CAPACITY);
        assert_eq!(table.get(&3), Err(KeyNotFound));
    }

    #[test]
    fn test_slot_index_extreme_hashes() {
        let min_int_hash = i64::MIN as u64;
        assert_eq!(min_int_hash, 1 << 63);
        assert_eq!(slot_index(min_int_hash, 10), 8);
        assert_eq!(slot_index(u64::MAX, 10), 5);
        for capacity in [1, 7, 10, 29, 61] {
            assert!(slot_index(min_int_hash, capacity) < capacity);
            assert!(slot_index(u64::MAX, capacity) < capacity);
        }
    }

    #[test]
    fn test_min_int_hash_collisions_share_one_chain() {
        let mut table: ChainedHashTable<i32, i32, _> =
            ChainedHashTable::with_hasher(MinIntState::default());
        for key in 0..4 {
            table.set(key, key * 10);
        }
        assert_eq!(table.buckets[8].len(), 4);
        for key in 0..4 {
            assert_eq!(table.get(&key), Ok(&(key * 10)));
        }
        assert_eq!(table.remove(&2), Some(20));
        assert_eq!(table.buckets[8].len(), 3);
        let keys: Vec<_> = table.keys().copied().collect();
        assert_eq!(keys, vec![0, 1, 3]);
    }

    #[test]
    fn test_max_hash_survives_expansion() {
        let mut table: ChainedHashTable<i32, i32, _> =
            ChainedHashTable::with_hasher(MaxState::default());
        for key in 0..30 {
            table.set(key, key);
        }
        assert_eq!(table.len(), 30);
        let index = slot_index(u64::MAX, table.capacity());
        assert_eq!(table.buckets[index].len(), 30);
    }

    #[test]
    fn test_iterator_has_exact_size_and_fuses() {
        let mut table: ChainedHashTable<i32, ()> = ChainedHashTable::new();
        for key in 0..12 {
            table.set(key, ());
        }
        let mut iter = table.iter();
        assert_eq!(iter.len(), 12);
        for expected in (0..12).rev() {
            assert!(iter.next().is_some());
            assert_eq!(iter.len(), expected);
        }
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_keys_and_values_follow_iteration_order() {
        let table: ChainedHashTable<i32, i32> = (0..8).map(|k| (k, k + 100)).collect();
        let keys: Vec<_> = table.keys().copied().collect();
        let values: Vec<_> = table.values().copied().collect();
        let projected: Vec<_> = keys.iter().map(|k| k + 100).collect();
        assert_eq!(values, projected);
    }

    #[test]
    fn test_equality_ignores_layout() {
        let mut left: ChainedHashTable<i32, String> = ChainedHashTable::new();
        let mut right: ChainedHashTable<i32, String> = ChainedHashTable::new();
        for key in 0..20 {
            left.set(key, key.to_string());
        }
        for key in (0..20).rev() {
            right.set(key, key.to_string());
        }
        assert_eq!(left, right);

        right.set(5, "five".to_string());
        assert_ne!(left, right);
        right.set(5, "5".to_string());
        right.remove(&0);
        assert_ne!(left, right);
    }

    #[test]
    fn test_dump_lists_every_pair() {
        let mut table = ChainedHashTable::with_hasher(MinIntState::default());
        table.set("a", 1);
        table.set("b", 2);

        let mut out = Vec::new();
        table.dump(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let hash = 1u64 << 63;
        assert_eq!(
            text,
            format!("Capacity: 10, Size: 2\n  8: <a({hash}):1>\n  8: <b({hash}):2>\n")
        );
    }

    #[test]
    fn test_reporter_sees_expansion_and_basic_calls() {
        let messages = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&messages);
        let mut table: ChainedHashTable<i32, i32, _> =
            ChainedHashTable::with_hasher(MinIntState::default())
                .with_reporter(move |message: &str| sink.lock().unwrap().push(message.to_string()));

        for key in 0..7 {
            table.set(key, key);
        }
        {
            let seen = messages.lock().unwrap();
            assert_eq!(seen.len(), 1);
            assert!(seen[0].starts_with("Expanding to "));
        }

        table.report_basic_calls(true);
        table.set(100, 0);
        let _ = table.get(&999);
        table.remove(&100);

        let seen = messages.lock().unwrap();
        let index = slot_index(1 << 63, table.capacity());
        assert_eq!(
            seen[1..],
            [
                format!("adding entry to bucket {index}"),
                format!("get failed in bucket {index}"),
                format!("removing entry from bucket {index}"),
            ]
        );
    }

    #[test]
    fn test_debug_renders_as_map() {
        let mut table = ChainedHashTable::new();
        table.set("only", 1);
        assert_eq!(format!("{table:?}"), r#"{"only": 1}"#);
    }
}
