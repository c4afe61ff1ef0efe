// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit tests, integration tests, benches and
//! the fuzz target.
//!
//! This module is always compiled but hidden from documentation.

#![doc(hidden)]

use crate::index::AnyIndex;
use crate::types::StructureKind;

/// `&str` list to owned words.
pub fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

/// One freshly bulk-built instance of every structure, in report order.
pub fn build_all<S: AsRef<str>>(corpus: &[S]) -> Vec<AnyIndex> {
    StructureKind::ALL
        .iter()
        .map(|&kind| AnyIndex::build(kind, corpus))
        .collect()
}

/// Deterministic pseudo-English corpus of `count` words.
///
/// Words are built from a small syllable table driven by a xorshift
/// generator, so prefixes overlap heavily (like real vocabularies) and the
/// same seed always gives the same corpus.
pub fn synthetic_corpus(count: usize, seed: u64) -> Vec<String> {
    const SYLLABLES: [&str; 16] = [
        "pro", "com", "sta", "int", "app", "dat", "er", "li", "ca", "tion", "ment", "ab", "or",
        "un", "re", "ing",
    ];
    let mut state = seed.max(1);
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };

    (0..count)
        .map(|_| {
            let parts = 1 + (next() % 4) as usize;
            (0..parts)
                .map(|_| SYLLABLES[(next() % SYLLABLES.len() as u64) as usize])
                .collect::<String>()
        })
        .collect()
}
