//! Property-Based Tests for Cache Module
//!
//! Uses proptest to verify the cache contract over generated inputs.

use proptest::prelude::*;
use serde_json::json;

use crate::cache::TtlCache;

// == Test Configuration ==
const TEST_MAX_ENTRIES: usize = 100;
const TEST_DEFAULT_TTL_MS: u64 = 300_000;

// == Strategies ==
/// Generates valid cache keys (non-empty, within length limit)
fn valid_key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_:]{1,64}".prop_map(|s| s)
}

/// Generates key suffixes without wildcard-significant characters
fn suffix_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9]{1,16}".prop_map(|s| s)
}

/// Generates valid cache values
fn valid_value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,256}".prop_map(|s| s)
}

/// A sequence of cache operations for testing
#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: String },
    Get { key: String },
    Invalidate { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (valid_key_strategy(), valid_value_strategy())
            .prop_map(|(key, value)| CacheOp::Set { key, value }),
        valid_key_strategy().prop_map(|key| CacheOp::Get { key }),
        valid_key_strategy().prop_map(|key| CacheOp::Invalidate { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // For any valid key-value pair, storing it and retrieving it before
    // expiry returns the exact value stored.
    #[test]
    fn prop_roundtrip_storage(key in valid_key_strategy(), value in valid_value_strategy()) {
        let mut cache = TtlCache::new(TEST_MAX_ENTRIES, TEST_DEFAULT_TTL_MS);

        cache.set(key.clone(), json!(value), None);

        let retrieved = cache.get(&key);
        prop_assert_eq!(retrieved, Some(json!(value)), "Round-trip value mismatch");
    }

    // For any stored key, invalidating it makes a subsequent get miss.
    #[test]
    fn prop_invalidate_removes_entry(key in valid_key_strategy(), value in valid_value_strategy()) {
        let mut cache = TtlCache::new(TEST_MAX_ENTRIES, TEST_DEFAULT_TTL_MS);

        cache.set(key.clone(), json!(value), None);
        prop_assert!(cache.get(&key).is_some(), "Key should exist before invalidate");

        prop_assert!(cache.invalidate(&key), "Invalidate should report removal");
        prop_assert!(cache.get(&key).is_none(), "Key should not exist after invalidate");
    }

    // For any key, storing V1 then V2 results in get returning V2.
    #[test]
    fn prop_overwrite_semantics(
        key in valid_key_strategy(),
        v1 in valid_value_strategy(),
        v2 in valid_value_strategy(),
    ) {
        let mut cache = TtlCache::new(TEST_MAX_ENTRIES, TEST_DEFAULT_TTL_MS);

        cache.set(key.clone(), json!(v1), None);
        cache.set(key.clone(), json!(v2), None);

        prop_assert_eq!(cache.get(&key), Some(json!(v2)), "Overwrite should win");
        prop_assert_eq!(cache.len(), 1, "Overwrite should not grow the cache");
    }

    // The entry count never exceeds the configured capacity, for any
    // sequence of operations.
    #[test]
    fn prop_capacity_never_exceeded(ops in prop::collection::vec(cache_op_strategy(), 1..100)) {
        let max = 10;
        let mut cache = TtlCache::new(max, TEST_DEFAULT_TTL_MS);

        for op in ops {
            match op {
                CacheOp::Set { key, value } => cache.set(key, json!(value), None),
                CacheOp::Get { key } => {
                    let _ = cache.get(&key);
                }
                CacheOp::Invalidate { key } => {
                    let _ = cache.invalidate(&key);
                }
            }
            prop_assert!(cache.len() <= max, "Capacity bound violated");
        }
    }

    // Invalidating `prefix:*` removes exactly the keys in that family
    // and leaves every other family intact.
    #[test]
    fn prop_pattern_invalidation_partitions_families(
        alpha in prop::collection::hash_set(suffix_strategy(), 1..10),
        beta in prop::collection::hash_set(suffix_strategy(), 1..10),
    ) {
        let mut cache = TtlCache::new(TEST_MAX_ENTRIES, TEST_DEFAULT_TTL_MS);

        for suffix in &alpha {
            cache.set(format!("alpha:{}", suffix), json!(1), None);
        }
        for suffix in &beta {
            cache.set(format!("beta:{}", suffix), json!(2), None);
        }

        let removed = cache.invalidate_pattern("alpha:*");

        prop_assert_eq!(removed, alpha.len(), "Should remove the whole alpha family");
        for suffix in &alpha {
            let key = format!("alpha:{}", suffix);
            prop_assert!(cache.get(&key).is_none(), "alpha key should be gone: {}", key);
        }
        for suffix in &beta {
            let key = format!("beta:{}", suffix);
            prop_assert!(cache.get(&key).is_some(), "beta key should survive: {}", key);
        }
    }

    // For any sequence of operations, hit and miss counters reflect
    // exactly the gets that found or missed an entry.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..50)) {
        let mut cache = TtlCache::new(TEST_MAX_ENTRIES, TEST_DEFAULT_TTL_MS);
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    cache.set(key, json!(value), None);
                }
                CacheOp::Get { key } => match cache.get(&key) {
                    Some(_) => expected_hits += 1,
                    None => expected_misses += 1,
                },
                CacheOp::Invalidate { key } => {
                    let _ = cache.invalidate(&key);
                }
            }
        }

        let stats = cache.stats();
        prop_assert_eq!(stats.hits, expected_hits, "Hits mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "Misses mismatch");
        prop_assert_eq!(stats.size, cache.len(), "Size mismatch");
    }
}
