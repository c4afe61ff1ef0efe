//! Shared test utilities and fixtures.

#![allow(dead_code)]

use prefixdex::{AnyIndex, PrefixIndex};

pub use prefixdex::testing::{build_all, synthetic_corpus, words};

/// The four-word corpus every scenario starts from.
pub const SAMPLE: [&str; 4] = ["apple", "application", "apply", "aptitude"];

/// Words with multi-byte characters and shared non-ASCII prefixes.
pub const UNICODE: [&str; 8] = [
    "café", "cafétéria", "naïve", "über", "übung", "tōkyō", "తెలుగు", "తెలంగాణ",
];

/// Assert every structure returns the same list for `prefix`, and return it.
pub fn assert_agree(indexes: &[AnyIndex], prefix: &str) -> Vec<String> {
    let first = indexes[0].search(prefix);
    for index in &indexes[1..] {
        assert_eq!(
            index.search(prefix),
            first,
            "{} disagrees with {} on {:?}",
            index.kind(),
            indexes[0].kind(),
            prefix
        );
    }
    first
}

/// Every structure must pass its own invariant check.
pub fn assert_all_valid(indexes: &[AnyIndex]) {
    for index in indexes {
        if let Err(e) = index.verify() {
            panic!("{} violates invariant: {}", index.kind(), e);
        }
    }
}
