//! Contract tests for the hash index and the frontier queue.

use std::collections::HashSet;

use proptest::prelude::*;

use pancake_search::{Configuration, FrontierQueue, HashIndex, Origin, Record};

fn key_strategy() -> impl Strategy<Value = String> {
    "[a-e]{1,6}"
}

proptest! {
    /// Inserted keys are found with their payload; duplicates are refused
    /// and leave the first payload in place; removed keys are gone.
    #[test]
    fn prop_hash_index_contract(
        keys in prop::collection::vec(key_strategy(), 1..60),
        buckets in 1usize..50,
        remove_mask in prop::collection::vec(any::<bool>(), 60),
    ) {
        let mut index = HashIndex::with_buckets(buckets);
        let mut first_distance = std::collections::HashMap::new();

        for (i, key) in keys.iter().enumerate() {
            let record = Record {
                config: Configuration::from(key.as_str()),
                predecessor: None,
                distance: i,
                origin: if i % 2 == 0 { Origin::FromInitial } else { Origin::FromGoal },
            };
            let fresh = !first_distance.contains_key(key);
            prop_assert_eq!(index.insert(record), fresh);
            first_distance.entry(key.clone()).or_insert(i);
        }
        prop_assert_eq!(index.len(), first_distance.len());

        for (key, &distance) in &first_distance {
            let record = index.lookup(&Configuration::from(key.as_str()));
            prop_assert_eq!(record.map(|r| r.distance), Some(distance));
        }

        let mut removed = HashSet::new();
        for (key, &drop) in first_distance.keys().zip(&remove_mask) {
            if drop {
                index.remove(&Configuration::from(key.as_str()));
                removed.insert(key.clone());
            }
        }
        for key in first_distance.keys() {
            let present = index.lookup(&Configuration::from(key.as_str())).is_some();
            prop_assert_eq!(present, !removed.contains(key));
        }
    }

    /// Values come out in the order they went in, then the queue is empty.
    #[test]
    fn prop_frontier_is_fifo(values in prop::collection::vec(any::<u32>(), 0..200)) {
        let mut queue = FrontierQueue::new();
        for &v in &values {
            queue.enqueue(v);
        }
        let mut out = Vec::new();
        while let Some(v) = queue.dequeue() {
            out.push(v);
        }
        prop_assert_eq!(out, values);
        prop_assert!(queue.is_empty());
        prop_assert_eq!(queue.dequeue(), None);
    }
}
