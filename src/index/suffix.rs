// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Suffix trie plus a sorted word array.
//!
//! Two structures live side by side:
//!
//! - a **suffix trie** holding every suffix of every word (end-of-suffix
//!   marks where a suffix stops), and
//! - a **sorted, deduplicated array** of the words themselves.
//!
//! Prefix search only touches the array: one binary search for the lower
//! bound, one for the upper bound, then a `starts_with` filter over the
//! candidates. The suffix trie is never consulted by `search`. It is still
//! built on every insert and it is what `memory_estimate` charges for, since
//! it dwarfs the array. It is the groundwork for substring containment
//! queries, exposed here as [`SuffixIndex::contains_substring`].

use std::collections::HashSet;

use super::char_node::CharNode;
use super::PrefixIndex;
use crate::types::StructureKind;
use crate::verify::{contracts, InvariantError};

/// Greater than any character that can follow the prefix.
const SENTINEL: char = char::MAX;

/// Prefix index backed by a sorted array, with a suffix trie alongside.
#[derive(Debug, Clone, Default)]
pub struct SuffixIndex {
    words: Vec<String>,
    root: CharNode,
}

impl SuffixIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// The sorted, deduplicated backing array.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Does any inserted word contain `needle`? Walks the suffix trie: a
    /// substring of a word is a prefix of one of its suffixes.
    pub fn contains_substring(&self, needle: &str) -> bool {
        match self.root.descend(needle) {
            Some(_) if needle.is_empty() => !self.words.is_empty(),
            Some(_) => true,
            None => false,
        }
    }

    pub(crate) fn root(&self) -> &CharNode {
        &self.root
    }

    pub(crate) fn from_parts(words: Vec<String>, root: CharNode) -> Self {
        Self { words, root }
    }

    fn add_suffixes(&mut self, word: &str) {
        for (offset, _) in word.char_indices() {
            self.root.insert(&word[offset..]);
        }
    }

    /// Half-open candidate range `[lower, upper)`: words `>= prefix` and
    /// `<= prefix + SENTINEL`.
    fn candidate_range(&self, prefix: &str) -> (usize, usize) {
        let lower = self.words.partition_point(|w| w.as_str() < prefix);
        let mut ceiling = String::with_capacity(prefix.len() + SENTINEL.len_utf8());
        ceiling.push_str(prefix);
        ceiling.push(SENTINEL);
        let upper = lower
            + self.words[lower..].partition_point(|w| {
                w.as_str() <= ceiling.as_str() || w.starts_with(prefix)
            });
        (lower, upper)
    }

    /// Check the backing array and that the suffix trie marks exactly the
    /// suffixes of the backing words.
    pub fn verify(&self) -> Result<(), InvariantError> {
        for pair in self.words.windows(2) {
            if pair[0] == pair[1] {
                return Err(InvariantError::DuplicateKey {
                    key: pair[0].clone(),
                });
            }
            if pair[0] > pair[1] {
                return Err(InvariantError::UnorderedKeys {
                    before: pair[0].clone(),
                    after: pair[1].clone(),
                });
            }
        }

        let expected: HashSet<&str> = self
            .words
            .iter()
            .flat_map(|w| w.char_indices().map(move |(i, _)| &w[i..]))
            .collect();
        let marked = self.root.terminal_paths();

        for suffix in &marked {
            if !expected.contains(suffix.as_str()) {
                return Err(InvariantError::UnexpectedSuffix {
                    suffix: suffix.clone(),
                });
            }
        }
        if marked.len() != expected.len() {
            let marked: HashSet<&str> = marked.iter().map(String::as_str).collect();
            if let Some(missing) = expected.iter().find(|s| !marked.contains(*s)) {
                return Err(InvariantError::MissingWord {
                    word: (*missing).to_string(),
                });
            }
        }
        Ok(())
    }
}

impl PrefixIndex for SuffixIndex {
    fn kind(&self) -> StructureKind {
        StructureKind::SuffixTree
    }

    fn insert(&mut self, word: &str) {
        if word.is_empty() {
            return;
        }
        if let Err(pos) = self.words.binary_search_by(|w| w.as_str().cmp(word)) {
            self.words.insert(pos, word.to_string());
            self.add_suffixes(word);
        }
    }

    fn bulk_insert<S: AsRef<str>>(&mut self, words: &[S]) {
        let mut fresh: Vec<&str> = words
            .iter()
            .map(|w| w.as_ref())
            .filter(|w| !w.is_empty())
            .collect();
        fresh.sort_unstable();
        fresh.dedup();
        fresh.retain(|w| self.words.binary_search_by(|x| x.as_str().cmp(w)).is_err());

        for word in &fresh {
            self.add_suffixes(word);
        }
        self.words.extend(fresh.into_iter().map(str::to_string));
        self.words.sort_unstable();
        contracts::check_sorted_unique(&self.words);
    }

    fn search(&self, prefix: &str) -> Vec<String> {
        let (lower, upper) = self.candidate_range(prefix);
        let results: Vec<String> = self.words[lower..upper]
            .iter()
            .filter(|w| w.starts_with(prefix))
            .cloned()
            .collect();
        contracts::check_sorted_unique(&results);
        results
    }

    fn len(&self) -> usize {
        self.words.len()
    }

    fn node_count(&self) -> usize {
        self.root.node_count()
    }
}
