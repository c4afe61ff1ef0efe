// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The four prefix indexes and the capability they share.
//!
//! - **Trie**: walk the prefix, sweep the subtree below it
//! - **AVL tree**: ordered whole-word keys, full in-order prefix scan
//! - **Segment tree**: range partition over a sorted array, pruned by bounds
//! - **Suffix tree**: sorted array for prefix queries, suffix trie alongside
//!
//! All four must agree. For the same corpus and the same prefix they return
//! the same sorted, duplicate-free list of words. Timings and memory figures
//! differ, and that difference is the whole point of having four.

mod avl;
mod char_node;
mod segment;
mod suffix;
mod trie;

pub use avl::{BalancedOrderedIndex, Keys};
pub use segment::BlockPartitionIndex;
pub use suffix::SuffixIndex;
pub use trie::TrieIndex;

pub(crate) use avl::{AvlNode, Link};
pub(crate) use char_node::CharNode;
pub(crate) use segment::PartitionNode;

use crate::types::{node_cost_kb, Complexity, StructureKind};
use crate::verify::InvariantError;

/// What every prefix index can do.
///
/// None of the implementations lock. Callers serialize access.
pub trait PrefixIndex {
    /// Which structure this is.
    fn kind(&self) -> StructureKind;

    /// Add one word. Duplicates and empty words are no-ops.
    fn insert(&mut self, word: &str);

    /// Add many words. Equivalent to repeated [`insert`](Self::insert),
    /// though implementations may rebuild internally instead.
    fn bulk_insert<S: AsRef<str>>(&mut self, words: &[S]) {
        for word in words {
            self.insert(word.as_ref());
        }
    }

    /// Every indexed word starting with `prefix`, sorted and duplicate-free.
    /// The empty prefix matches everything. No match is an empty vec.
    fn search(&self, prefix: &str) -> Vec<String>;

    /// Number of distinct words held.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Internal node count, the basis of [`memory_estimate`](Self::memory_estimate).
    fn node_count(&self) -> usize;

    /// Synthetic memory estimate in KB: node count times a fixed per-node cost.
    fn memory_estimate(&self) -> f64 {
        node_cost_kb(self.node_count(), self.kind().node_cost())
    }

    /// Static time/space labels.
    fn complexity(&self) -> Complexity {
        self.kind().complexity()
    }
}

/// One of the four structures, chosen at construction time.
///
/// Dispatch is a `match`, not a vtable, so `PrefixIndex` can keep its
/// generic `bulk_insert`.
#[derive(Debug, Clone)]
pub enum AnyIndex {
    Trie(TrieIndex),
    Avl(BalancedOrderedIndex),
    Segment(BlockPartitionIndex),
    Suffix(SuffixIndex),
}

macro_rules! dispatch {
    ($self:expr, $index:ident => $body:expr) => {
        match $self {
            AnyIndex::Trie($index) => $body,
            AnyIndex::Avl($index) => $body,
            AnyIndex::Segment($index) => $body,
            AnyIndex::Suffix($index) => $body,
        }
    };
}

impl AnyIndex {
    /// Fresh, empty index of the given kind.
    pub fn new(kind: StructureKind) -> Self {
        match kind {
            StructureKind::Trie => AnyIndex::Trie(TrieIndex::new()),
            StructureKind::AvlTree => AnyIndex::Avl(BalancedOrderedIndex::new()),
            StructureKind::SegmentTree => AnyIndex::Segment(BlockPartitionIndex::new()),
            StructureKind::SuffixTree => AnyIndex::Suffix(SuffixIndex::new()),
        }
    }

    /// Fresh index of the given kind, bulk-built from `words`.
    pub fn build<S: AsRef<str>>(kind: StructureKind, words: &[S]) -> Self {
        let mut index = Self::new(kind);
        index.bulk_insert(words);
        index
    }

    /// Run the structure's full invariant check.
    pub fn verify(&self) -> Result<(), InvariantError> {
        dispatch!(self, index => index.verify())
    }
}

impl PrefixIndex for AnyIndex {
    fn kind(&self) -> StructureKind {
        dispatch!(self, index => index.kind())
    }

    fn insert(&mut self, word: &str) {
        dispatch!(self, index => index.insert(word))
    }

    fn bulk_insert<S: AsRef<str>>(&mut self, words: &[S]) {
        dispatch!(self, index => index.bulk_insert(words))
    }

    fn search(&self, prefix: &str) -> Vec<String> {
        dispatch!(self, index => index.search(prefix))
    }

    fn len(&self) -> usize {
        dispatch!(self, index => index.len())
    }

    fn node_count(&self) -> usize {
        dispatch!(self, index => index.node_count())
    }
}

impl From<TrieIndex> for AnyIndex {
    fn from(index: TrieIndex) -> Self {
        AnyIndex::Trie(index)
    }
}

impl From<BalancedOrderedIndex> for AnyIndex {
    fn from(index: BalancedOrderedIndex) -> Self {
        AnyIndex::Avl(index)
    }
}

impl From<BlockPartitionIndex> for AnyIndex {
    fn from(index: BlockPartitionIndex) -> Self {
        AnyIndex::Segment(index)
    }
}

impl From<SuffixIndex> for AnyIndex {
    fn from(index: SuffixIndex) -> Self {
        AnyIndex::Suffix(index)
    }
}
