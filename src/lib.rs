// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Four prefix indexes, one question: which words start with P?
//!
//! This crate builds the same vocabulary into four structures and answers
//! prefix queries with each, so they can be benchmarked against each other.
//! All four must return the same sorted, duplicate-free list for any prefix.
//! That cross-structure equivalence is the property everything else rests on.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌─────────────┐
//! │  corpus.rs  │────▶│   index/     │────▶│   bench/    │
//! │ (load, gold │     │ (Trie, AVL,  │     │ (Comparator,│
//! │  standard)  │     │ Segment, Suf)│     │  reports)   │
//! └─────────────┘     └──────────────┘     └─────────────┘
//!                            │                    │
//!                            ▼                    ▼
//!                     ┌─────────────┐     ┌─────────────┐
//!                     │  verify/    │◀────│  binary/    │
//!                     │ (invariants,│     │ (.pdex blob │
//!                     │  contracts) │     │  cache)     │
//!                     └─────────────┘     └─────────────┘
//! ```
//!
//! | Structure              | Search                                 | Memory per node |
//! |------------------------|----------------------------------------|-----------------|
//! | [`TrieIndex`]          | walk prefix, sweep subtree             | 100 B           |
//! | [`BalancedOrderedIndex`] | full in-order scan with starts_with  | 150 B           |
//! | [`BlockPartitionIndex`]| bound-pruned partition descent         | 180 B           |
//! | [`SuffixIndex`]        | two binary searches on a sorted array  | 120 B (trie)    |
//!
//! # Usage
//!
//! ```
//! use prefixdex::{AnyIndex, PrefixIndex, StructureKind};
//!
//! let words = ["apple", "application", "apply", "aptitude"];
//! for kind in StructureKind::ALL {
//!     let index = AnyIndex::build(kind, &words);
//!     assert_eq!(index.search("app"), vec!["apple", "application", "apply"]);
//! }
//! ```

pub mod bench;
pub mod binary;
pub mod corpus;
mod index;
pub mod testing;
mod types;
pub mod verify;

pub use corpus::{calculate_accuracy, load_corpus, prefixes_for_testing, Accuracy};
pub use index::{
    AnyIndex, BalancedOrderedIndex, BlockPartitionIndex, Keys, PrefixIndex, SuffixIndex,
    TrieIndex,
};
pub use types::{
    node_cost_kb, Complexity, StructureKind, AVL_NODE_COST, SEGMENT_NODE_COST, SUFFIX_NODE_COST,
    TRIE_NODE_COST,
};
pub use verify::InvariantError;
