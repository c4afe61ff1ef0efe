//! Cross-structure equivalence: the four structures against each other and
//! against the linear-filter oracle.

use super::oracles::oracle_prefix_search;
use crate::common::{assert_agree, build_all, SAMPLE, UNICODE};
use prefixdex::{AnyIndex, PrefixIndex, StructureKind};
use proptest::prelude::*;

// ============================================================================
// STRATEGIES
// ============================================================================

/// Short words over a tiny alphabet, so prefixes collide constantly.
fn dense_corpus() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-d]{0,6}", 0..80)
}

/// Mix of sample, Unicode and random words.
fn mixed_corpus() -> impl Strategy<Value = Vec<String>> {
    let fixed: Vec<String> = SAMPLE.iter().chain(UNICODE.iter()).map(|s| s.to_string()).collect();
    prop::collection::vec(
        prop_oneof![
            prop::sample::select(fixed),
            "[a-zé]{1,5}",
            "\\PC{1,4}",
        ],
        0..40,
    )
}

/// A prefix of one of the corpus words, or something random.
fn prefix_for(corpus: Vec<String>) -> impl Strategy<Value = (Vec<String>, String)> {
    let n = corpus.len();
    let picked = if n == 0 {
        Just(String::new()).boxed()
    } else {
        let words = corpus.clone();
        (0..n, 0usize..8)
            .prop_map(move |(i, len)| words[i].chars().take(len).collect::<String>())
            .boxed()
    };
    prop_oneof![picked, "[a-d]{0,3}", "\\PC{0,2}"].prop_map(move |p| (corpus.clone(), p))
}

// ============================================================================
// CONCRETE SCENARIOS
// ============================================================================

#[test]
fn sample_corpus_scenario() {
    let indexes = build_all(&SAMPLE);
    assert_eq!(assert_agree(&indexes, "app"), vec!["apple", "application", "apply"]);
    assert_eq!(assert_agree(&indexes, "apt"), vec!["aptitude"]);
    assert!(assert_agree(&indexes, "xyz").is_empty());
    assert_eq!(assert_agree(&indexes, ""), SAMPLE.to_vec());
}

#[test]
fn inserting_apple_twice_changes_nothing() {
    for mut index in build_all(&SAMPLE) {
        let before = (index.search("app"), index.len(), index.node_count());
        index.insert("apple");
        index.insert("apple");
        assert_eq!((index.search("app"), index.len(), index.node_count()), before);
    }
}

#[test]
fn prefix_outside_corpus_bounds_is_empty() {
    let indexes = build_all(&SAMPLE);
    for prefix in ["0", "a0", "b", "zzzz", "applications"] {
        assert!(assert_agree(&indexes, prefix).is_empty(), "{prefix}");
    }
}

#[test]
fn prefix_equal_to_a_word_includes_it() {
    let indexes = build_all(&["app", "apple", "ap"]);
    assert_eq!(assert_agree(&indexes, "app"), vec!["app", "apple"]);
    assert_eq!(assert_agree(&indexes, "ap"), vec!["ap", "app", "apple"]);
}

#[test]
fn unicode_prefixes_agree() {
    let indexes = build_all(&UNICODE);
    assert_eq!(assert_agree(&indexes, "caf"), vec!["café", "cafétéria"]);
    assert_eq!(assert_agree(&indexes, "üb"), vec!["über", "übung"]);
    assert_eq!(assert_agree(&indexes, "తెల").len(), 2);
    assert_eq!(assert_agree(&indexes, "").len(), UNICODE.len());
}

#[test]
fn never_built_indexes_return_nothing() {
    let indexes: Vec<AnyIndex> = StructureKind::ALL.iter().map(|&k| AnyIndex::new(k)).collect();
    assert!(assert_agree(&indexes, "").is_empty());
    assert!(assert_agree(&indexes, "a").is_empty());
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every structure matches the oracle on dense corpora.
    #[test]
    fn prop_matches_oracle_dense((corpus, prefix) in dense_corpus().prop_flat_map(prefix_for)) {
        let expected = oracle_prefix_search(&corpus, &prefix);
        for index in build_all(&corpus) {
            prop_assert_eq!(index.search(&prefix), expected.clone(), "{}", index.kind());
        }
    }

    /// Same on Unicode-heavy corpora.
    #[test]
    fn prop_matches_oracle_mixed((corpus, prefix) in mixed_corpus().prop_flat_map(prefix_for)) {
        let expected = oracle_prefix_search(&corpus, &prefix);
        for index in build_all(&corpus) {
            prop_assert_eq!(index.search(&prefix), expected.clone(), "{}", index.kind());
        }
    }

    /// Membership: every inserted word is found by searching for itself.
    #[test]
    fn prop_membership(corpus in mixed_corpus()) {
        for index in build_all(&corpus) {
            for word in corpus.iter().filter(|w| !w.is_empty()) {
                prop_assert!(index.search(word).contains(word), "{} lost {:?}", index.kind(), word);
            }
        }
    }

    /// Empty-prefix law: search("") is the sorted, deduplicated corpus.
    #[test]
    fn prop_empty_prefix_is_whole_corpus(corpus in dense_corpus()) {
        let expected = oracle_prefix_search(&corpus, "");
        for index in build_all(&corpus) {
            prop_assert_eq!(index.search(""), expected.clone());
            prop_assert_eq!(index.len(), expected.len());
        }
    }

    /// Incremental inserts and one bulk insert produce the same answers.
    #[test]
    fn prop_insert_equals_bulk_insert(corpus in dense_corpus(), prefix in "[a-d]{0,2}") {
        for kind in StructureKind::ALL {
            let bulk = AnyIndex::build(kind, &corpus);
            let mut incremental = AnyIndex::new(kind);
            for word in &corpus {
                incremental.insert(word);
            }
            prop_assert_eq!(incremental.search(&prefix), bulk.search(&prefix), "{}", kind);
            prop_assert_eq!(incremental.len(), bulk.len());
        }
    }

    /// Two bulk inserts merge; the second never replaces the first.
    #[test]
    fn prop_bulk_inserts_accumulate(a in dense_corpus(), b in dense_corpus()) {
        let joined: Vec<String> = a.iter().chain(b.iter()).cloned().collect();
        for kind in StructureKind::ALL {
            let mut split = AnyIndex::build(kind, &a);
            split.bulk_insert(&b);
            let whole = AnyIndex::build(kind, &joined);
            prop_assert_eq!(split.search(""), whole.search(""), "{}", kind);
        }
    }

    /// Idempotence: re-inserting any word leaves counts and results alone.
    #[test]
    fn prop_reinsert_is_a_no_op(corpus in dense_corpus(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!corpus.is_empty());
        let word = pick.get(&corpus).clone();
        for mut index in build_all(&corpus) {
            let before = (index.len(), index.node_count(), index.search(""));
            index.insert(&word);
            prop_assert_eq!((index.len(), index.node_count(), index.search("")), before);
        }
    }
}
