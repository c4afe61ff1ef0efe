// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Character trie: walk the prefix, then sweep everything below it.
//!
//! Search cost is O(|prefix|) to find the landing node plus the size of the
//! subtree under it. Memory is one node per distinct (prefix, character) pair
//! across the corpus, which is why the trie usually loses the memory column.

use super::char_node::CharNode;
use super::PrefixIndex;
use crate::types::StructureKind;
use crate::verify::{contracts, InvariantError};

/// Prefix index backed by a character trie.
#[derive(Debug, Clone, Default)]
pub struct TrieIndex {
    root: CharNode,
    word_count: usize,
}

impl TrieIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact membership (not a prefix test).
    pub fn contains(&self, word: &str) -> bool {
        !word.is_empty() && self.root.descend(word).is_some_and(|node| node.terminal)
    }

    pub(crate) fn root(&self) -> &CharNode {
        &self.root
    }

    /// Rehydrate from a decoded node graph. The word counter is recomputed
    /// from the terminal marks.
    pub(crate) fn from_root(root: CharNode) -> Self {
        let word_count = root.terminal_count();
        Self { root, word_count }
    }

    /// Check the end-of-word marks against the distinct-word counter.
    pub fn verify(&self) -> Result<(), InvariantError> {
        if self.root.terminal {
            return Err(InvariantError::EmptyWord);
        }
        let marked = self.root.terminal_count();
        if marked != self.word_count {
            return Err(InvariantError::WordCountMismatch {
                claimed: self.word_count,
                actual: marked,
            });
        }
        Ok(())
    }
}

impl PrefixIndex for TrieIndex {
    fn kind(&self) -> StructureKind {
        StructureKind::Trie
    }

    fn insert(&mut self, word: &str) {
        if word.is_empty() {
            return;
        }
        if self.root.insert(word) {
            self.word_count += 1;
        }
    }

    fn search(&self, prefix: &str) -> Vec<String> {
        let Some(node) = self.root.descend(prefix) else {
            return Vec::new();
        };
        let mut results = Vec::new();
        let mut buf = prefix.to_string();
        node.collect_into(&mut buf, &mut results);
        contracts::check_sorted_unique(&results);
        results
    }

    fn len(&self) -> usize {
        self.word_count
    }

    fn node_count(&self) -> usize {
        self.root.node_count()
    }
}
