//! Reference oracles for differential testing.
//!
//! Simple, obviously-correct implementations. They serve as ground truth
//! for the four real structures.

use proptest::prelude::*;

// =============================================================================
// ORACLE IMPLEMENTATIONS
// =============================================================================

/// Linear filter, then sort and dedup.
pub fn oracle_prefix_search(corpus: &[String], prefix: &str) -> Vec<String> {
    let mut out: Vec<String> = corpus
        .iter()
        .filter(|w| !w.is_empty() && w.starts_with(prefix))
        .cloned()
        .collect();
    out.sort();
    out.dedup();
    out
}

/// Every distinct non-empty suffix of every word.
pub fn oracle_suffixes(corpus: &[String]) -> Vec<String> {
    let mut out: Vec<String> = corpus
        .iter()
        .flat_map(|w| w.char_indices().map(move |(i, _)| w[i..].to_string()))
        .collect();
    out.sort();
    out.dedup();
    out
}

/// Does any word contain `needle`?
pub fn oracle_contains_substring(corpus: &[String], needle: &str) -> bool {
    corpus.iter().any(|w| !w.is_empty() && w.contains(needle))
}

/// Smallest possible AVL height bound for `n` nodes: 1.44 * log2(n + 2).
pub fn avl_height_bound(n: usize) -> usize {
    (1.4405 * ((n + 2) as f64).log2()).floor() as usize
}

// =============================================================================
// ORACLE SANITY
// =============================================================================

#[test]
fn oracle_search_on_sample() {
    let corpus: Vec<String> = ["apply", "apple", "apple", "band"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(oracle_prefix_search(&corpus, "app"), vec!["apple", "apply"]);
    assert_eq!(oracle_prefix_search(&corpus, "").len(), 3);
}

#[test]
fn oracle_suffixes_of_banana() {
    let corpus = vec!["banana".to_string()];
    assert_eq!(
        oracle_suffixes(&corpus),
        vec!["a", "ana", "anana", "banana", "na", "nana"]
    );
}

#[test]
fn avl_bound_grows_logarithmically() {
    assert_eq!(avl_height_bound(1), 2);
    assert!(avl_height_bound(1_000_000) <= 29);
}

proptest! {
    #[test]
    fn oracle_output_is_sorted_and_unique(
        corpus in prop::collection::vec("[a-c]{0,4}", 0..30),
        prefix in "[a-c]{0,2}",
    ) {
        let out = oracle_prefix_search(&corpus, &prefix);
        prop_assert!(out.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(out.iter().all(|w| w.starts_with(&prefix)));
    }
}
