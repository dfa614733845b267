// SPDX-License-Identifier: Apache-2.0

// Model-based checks of ChainedHashTable against std's HashMap

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chainjson::{ChainedHashTable, KeyNotFound, DEFAULT_CAPACITY, EXPANSION_JITTER};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Set(u8, i32),
    Remove(u8),
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (any::<u8>(), any::<i32>()).prop_map(|(k, v)| Op::Set(k, v)),
        3 => any::<u8>().prop_map(Op::Remove),
        1 => Just(Op::Clear),
    ]
}

proptest! {
    /// Every operation agrees with HashMap, and afterwards the size equals the
    /// number of keys for which `get` succeeds.
    #[test]
    fn test_matches_hashmap_model(ops in prop::collection::vec(op_strategy(), 0..200)) {
        let mut table = ChainedHashTable::new();
        let mut model = HashMap::new();

        for op in ops {
            match op {
                Op::Set(k, v) => prop_assert_eq!(table.set(k, v), model.insert(k, v)),
                Op::Remove(k) => prop_assert_eq!(table.remove(&k), model.remove(&k)),
                Op::Clear => {
                    table.clear();
                    model.clear();
                    prop_assert_eq!(table.capacity(), DEFAULT_CAPACITY);
                }
            }
            prop_assert_eq!(table.len(), model.len());
        }

        let found = (0..=u8::MAX).filter(|k| table.get(k).is_ok()).count();
        prop_assert_eq!(found, table.len());
        for (k, v) in &model {
            prop_assert_eq!(table.get(k), Ok(v));
            prop_assert!(table.contains_key(k));
        }
        prop_assert_eq!(table.iter().len(), model.len());
    }

    #[test]
    fn test_set_then_get(pairs in prop::collection::vec((any::<String>(), any::<i64>()), 1..100)) {
        let mut table = ChainedHashTable::new();
        for (k, v) in &pairs {
            table.set(k.clone(), *v);
            prop_assert_eq!(table.get(k.as_str()), Ok(v));
        }
    }

    #[test]
    fn test_remove_then_get_fails(keys in prop::collection::hash_set(any::<u16>(), 1..60)) {
        let mut table: ChainedHashTable<u16, u16> = keys.iter().map(|&k| (k, k)).collect();
        for k in &keys {
            prop_assert_eq!(table.remove(k), Some(*k));
            prop_assert_eq!(table.get(k), Err(KeyNotFound));
            prop_assert_eq!(table.remove(k), None);
        }
        prop_assert!(table.is_empty());
    }
}

#[test]
fn test_expansion_preserves_pairs() {
    let mut table = ChainedHashTable::new();
    let mut capacities = vec![table.capacity()];
    for i in 0..500 {
        table.set(i, i * 2);
        if *capacities.last().unwrap() != table.capacity() {
            capacities.push(table.capacity());
        }
    }

    assert_eq!(table.len(), 500);
    for i in 0..500 {
        assert_eq!(table.get(&i), Ok(&(i * 2)));
    }

    // Each expansion lands in [2c, 2c + jitter)
    for window in capacities.windows(2) {
        let (old, new) = (window[0], window[1]);
        assert!(new >= 2 * old && new < 2 * old + EXPANSION_JITTER, "{old} -> {new}");
    }
    assert!(table.len() as f64 <= table.capacity() as f64 * 0.5 + 1.0);
}

#[test]
fn test_expansion_is_reported() {
    let messages = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&messages);
    let mut table = ChainedHashTable::new()
        .with_reporter(move |message: &str| sink.lock().unwrap().push(message.to_string()));

    for i in 0..7 {
        table.set(i, ());
    }

    let messages = messages.lock().unwrap();
    assert_eq!(messages.len(), 1, "{messages:?}");
    let expected = format!("Expanding to {} elements.", table.capacity());
    assert_eq!(messages[0], expected);
}

#[test]
fn test_clear_is_idempotent() {
    let mut table: ChainedHashTable<&str, i32> = [("a", 1), ("b", 2)].into_iter().collect();
    table.clear();
    let once = table.clone();
    table.clear();
    assert_eq!(table, once);
    assert!(table.is_empty());
    assert_eq!(table.capacity(), DEFAULT_CAPACITY);
}

#[test]
fn test_equality_is_order_insensitive() {
    let forward: ChainedHashTable<i32, i32> = (0..50).map(|i| (i, -i)).collect();
    let backward: ChainedHashTable<i32, i32> = (0..50).rev().map(|i| (i, -i)).collect();
    assert_eq!(forward, backward);

    let mut changed = backward.clone();
    changed.set(3, 0);
    assert_ne!(forward, changed);
}
