//! Structural invariants after arbitrary insert sequences.

use super::oracles::{avl_height_bound, oracle_contains_substring, oracle_suffixes};
use crate::common::{assert_all_valid, build_all, synthetic_corpus};
use prefixdex::{BalancedOrderedIndex, BlockPartitionIndex, PrefixIndex, SuffixIndex, TrieIndex};
use proptest::prelude::*;

#[test]
fn synthetic_corpus_passes_every_check() {
    let corpus = synthetic_corpus(2_000, 42);
    let indexes = build_all(&corpus);
    assert_all_valid(&indexes);
}

#[test]
fn sorted_input_keeps_avl_shallow() {
    let mut index = BalancedOrderedIndex::new();
    let words: Vec<String> = (0..4096).map(|i| format!("{:05}", i)).collect();
    for word in &words {
        index.insert(word);
    }
    assert!(index.height() <= avl_height_bound(words.len()));
    assert!(index.verify().is_ok());
}

#[test]
fn suffix_trie_counts_shared_suffixes_once() {
    let mut index = SuffixIndex::new();
    index.bulk_insert(&["banana", "bandana"]);
    let suffixes = oracle_suffixes(&["banana".to_string(), "bandana".to_string()]);
    // "ana", "na", "a" are shared; the trie still verifies against the set
    assert_eq!(suffixes.len(), 6 + 7 - 3);
    assert!(index.verify().is_ok());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(150))]

    /// AVL invariant after every single insert.
    #[test]
    fn prop_avl_balanced_after_every_insert(words in prop::collection::vec("[a-f]{1,5}", 1..120)) {
        let mut index = BalancedOrderedIndex::new();
        for word in &words {
            index.insert(word);
            prop_assert!(index.verify().is_ok(), "after inserting {:?}", word);
        }
        prop_assert!(index.height() <= avl_height_bound(index.len()));
        let keys: Vec<&str> = index.keys().collect();
        prop_assert!(keys.windows(2).all(|w| w[0] < w[1]));
    }

    /// Partition bounds hold at every node after bulk builds and single inserts.
    #[test]
    fn prop_partition_sound(
        bulk in prop::collection::vec("[a-d]{1,5}", 0..60),
        extra in prop::collection::vec("[a-d]{1,5}", 0..10),
    ) {
        let mut index = BlockPartitionIndex::new();
        index.bulk_insert(&bulk);
        prop_assert!(index.verify().is_ok());
        for word in &extra {
            index.insert(word);
            prop_assert!(index.verify().is_ok());
        }
        prop_assert!(index.words().windows(2).all(|w| w[0] < w[1]));
    }

    /// Suffix trie marks exactly the suffixes, and substring lookups agree
    /// with a linear scan.
    #[test]
    fn prop_suffix_trie_complete(
        words in prop::collection::vec("[a-c]{1,6}", 0..30),
        needle in "[a-c]{1,3}",
    ) {
        let mut index = SuffixIndex::new();
        index.bulk_insert(&words);
        prop_assert!(index.verify().is_ok());
        prop_assert_eq!(index.contains_substring(&needle), oracle_contains_substring(&words, &needle));
    }

    /// Trie word counter matches the distinct-word count.
    #[test]
    fn prop_trie_counts_distinct_words(words in prop::collection::vec("[a-c]{0,4}", 0..50)) {
        let mut index = TrieIndex::new();
        index.bulk_insert(&words);
        prop_assert!(index.verify().is_ok());
        let mut distinct: Vec<&String> = words.iter().filter(|w| !w.is_empty()).collect();
        distinct.sort();
        distinct.dedup();
        prop_assert_eq!(index.len(), distinct.len());
        for w in &distinct {
            prop_assert!(index.contains(w));
        }
    }

    /// Memory estimates are node counts times the structure's cost.
    #[test]
    fn prop_memory_is_proportional_to_nodes(words in prop::collection::vec("[a-c]{1,4}", 0..40)) {
        for index in build_all(&words) {
            let expected = (index.node_count() * index.kind().node_cost()) as f64 / 1024.0;
            prop_assert_eq!(index.memory_estimate(), expected);
            prop_assert!(index.memory_estimate() >= 0.0);
        }
    }
}
