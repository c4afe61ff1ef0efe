// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Differential fuzzing of the four structures.
//!
//! A random mix of inserts, bulk inserts and searches runs against all four
//! indexes and a sorted set. Any disagreement, any invariant violation, any
//! panic on odd Unicode is a bug.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use prefixdex::{AnyIndex, PrefixIndex, StructureKind};
use std::collections::BTreeSet;

#[derive(Arbitrary, Debug)]
enum Op {
    Insert(String),
    BulkInsert(Vec<String>),
    Search(String),
}

fuzz_target!(|ops: Vec<Op>| {
    let mut indexes: Vec<AnyIndex> = StructureKind::ALL.iter().map(|&k| AnyIndex::new(k)).collect();
    let mut truth: BTreeSet<String> = BTreeSet::new();

    // The suffix trie is quadratic in word length
    let clip = |w: &String| w.chars().take(24).collect::<String>();

    for op in ops.iter().take(64) {
        match op {
            Op::Insert(word) => {
                let word = clip(word);
                for index in &mut indexes {
                    index.insert(&word);
                }
                if !word.is_empty() {
                    truth.insert(word);
                }
            }
            Op::BulkInsert(words) => {
                let words: Vec<String> = words.iter().take(32).map(clip).collect();
                for index in &mut indexes {
                    index.bulk_insert(&words);
                }
                truth.extend(words.into_iter().filter(|w| !w.is_empty()));
            }
            Op::Search(prefix) => {
                let expected: Vec<String> =
                    truth.iter().filter(|w| w.starts_with(prefix.as_str())).cloned().collect();
                for index in &indexes {
                    assert_eq!(index.search(prefix), expected, "{} on {:?}", index.kind(), prefix);
                }
            }
        }
    }

    for index in &indexes {
        assert_eq!(index.len(), truth.len(), "{}", index.kind());
        if let Err(e) = index.verify() {
            panic!("{} violates invariant: {}", index.kind(), e);
        }
    }
});
