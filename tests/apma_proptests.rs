//! Property-based tests for the APMA.
//!
//! Random operation sequences are replayed against a `BTreeMap` of queues
//! (duplicate keys keep their insertion order), and the structural invariants
//! are checked after every step.

use apma::{Config, APMA};
use proptest::prelude::*;
use std::collections::{BTreeMap, VecDeque};

// ============================================================================
//  Strategies
// ============================================================================

#[derive(Debug, Clone)]
enum Op {
    Insert(i32, u64),
    Delete(i32),
    Find(i32),
}

fn key(max: i32) -> impl Strategy<Value = i32> {
    prop_oneof![1..=max, -max..=-1]
}

fn operations(max_ops: usize, max_key: i32) -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(
        prop_oneof![
            4 => (key(max_key), any::<u64>()).prop_map(|(k, v)| Op::Insert(k, v)),
            3 => key(max_key).prop_map(Op::Delete),
            1 => key(max_key).prop_map(Op::Find),
        ],
        0..=max_ops,
    )
}

fn configs() -> impl Strategy<Value = Config> {
    prop_oneof![
        Just(Config::default()),
        Just(
            Config::default()
                .with_segment_size(16)
                .with_max_occupancy(14, 10)
                .with_min_occupancy(3, 5)
        ),
        Just(
            Config::default()
                .with_segment_size(4)
                .with_max_occupancy(3, 3)
                .with_min_occupancy(1, 1)
        ),
    ]
}

fn replay(mut apma: APMA<i32, u64>, ops: Vec<Op>) -> Result<(), TestCaseError> {
    let mut oracle: BTreeMap<i32, VecDeque<u64>> = BTreeMap::new();

    for op in ops {
        match op {
            Op::Insert(key, value) => {
                let position = apma.insert(key, value).unwrap();
                oracle.entry(key).or_default().push_back(value);

                prop_assert!(apma.slots().nth(position).flatten() == Some(&key));
            }
            Op::Delete(key) => {
                let removed = apma.delete(&key).unwrap();
                let expected = oracle.get_mut(&key).and_then(VecDeque::pop_front);
                if oracle.get(&key).map_or(false, VecDeque::is_empty) {
                    oracle.remove(&key);
                }

                prop_assert_eq!(removed, expected, "delete mismatch for key {}", key);
            }
            Op::Find(key) => {
                let expected = oracle.get(&key).and_then(|values| values.front());
                prop_assert_eq!(apma.find(&key), expected, "find mismatch for key {}", key);
            }
        }

        prop_assert_eq!(apma.check_invariants(), Ok(()));
        prop_assert_eq!(apma.len(), oracle.values().map(VecDeque::len).sum::<usize>());
    }

    let expected = oracle
        .iter()
        .flat_map(|(key, values)| values.iter().map(move |value| (*key, *value)))
        .collect::<Vec<_>>();
    let actual = apma
        .iter()
        .map(|(key, value)| (*key, *value))
        .collect::<Vec<_>>();
    prop_assert_eq!(actual, expected);

    Ok(())
}

// ============================================================================
//  Differential Testing Against BTreeMap
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Random operation sequences over a small key space, many duplicates.
    #[test]
    fn differential_dense_keys(ops in operations(400, 40)) {
        replay(APMA::new(), ops)?;
    }

    /// Random operation sequences over a wide key space.
    #[test]
    fn differential_sparse_keys(ops in operations(400, 100_000)) {
        replay(APMA::new(), ops)?;
    }

    /// The same sequences under other valid configurations.
    #[test]
    fn differential_configs(config in configs(), ops in operations(300, 500)) {
        replay(APMA::with_config(config).unwrap(), ops)?;
    }
}

// ============================================================================
//  Structural Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Distinct keys read back strictly ascending, whatever the insertion order.
    #[test]
    fn distinct_keys_read_back_sorted(
        keys in prop::collection::hash_set(1..i64::MAX, 0..600)
    ) {
        let mut apma = APMA::new();
        for &key in &keys {
            apma.insert(key, ()).unwrap();
        }

        let read = apma.keys().copied().collect::<Vec<_>>();
        prop_assert!(read.windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(read.len(), keys.len());
    }

    /// No segment exceeds the leaf bound once the array has several segments.
    #[test]
    fn segments_stay_below_leaf_bound(keys in prop::collection::vec(1..5_000u32, 0..800)) {
        let mut apma = APMA::new();
        for key in keys {
            apma.insert(key, key).unwrap();
            prop_assert!(apma.segment_occupancy().iter().all(|&o| o <= 7));
            prop_assert_eq!(apma.segment_occupancy().iter().sum::<usize>(), apma.len());
        }
    }

    /// Inserting then deleting every key empties the array and shrinks it back.
    #[test]
    fn round_trip_shrinks(keys in prop::collection::hash_set(1..100_000u32, 1..600)) {
        let mut apma = APMA::new();
        for &key in &keys {
            apma.insert(key, key).unwrap();
        }
        for key in &keys {
            prop_assert_eq!(apma.delete(key).unwrap(), Some(*key));
        }

        prop_assert_eq!(apma.len(), 0);
        prop_assert_eq!(apma.capacity(), 8);
    }

    /// Range queries agree with a filtered full scan.
    #[test]
    fn range_matches_scan(
        keys in prop::collection::vec(1..1_000i32, 0..300),
        low in 0..1_000i32,
        width in 0..400i32,
    ) {
        let mut apma = APMA::new();
        for key in keys {
            apma.insert(key, ()).unwrap();
        }
        let high = low + width;

        let ranged = apma.range(low..high).map(|(k, _)| *k).collect::<Vec<_>>();
        let scanned = apma
            .keys()
            .copied()
            .filter(|k| (low..high).contains(k))
            .collect::<Vec<_>>();
        prop_assert_eq!(ranged, scanned);
    }
}
