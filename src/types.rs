// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The shared vocabulary of the crate.
//!
//! Four structures answer the same question ("which words start with P?"), so
//! they need a common way to name themselves, describe their costs, and report
//! a memory estimate. That's all this module is.
//!
//! # Memory estimates
//!
//! Nobody measures real allocator usage here. Each structure counts its nodes
//! and multiplies by a fixed per-node cost, then divides by 1024. The numbers
//! are only meaningful relative to each other:
//!
//! | Structure     | Bytes per node | Counts root? |
//! |---------------|----------------|--------------|
//! | `Trie`        | 100            | yes          |
//! | `AvlTree`     | 150            | n/a          |
//! | `SegmentTree` | 180            | n/a          |
//! | `SuffixTree`  | 120            | yes          |

use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-node cost of a trie node.
pub const TRIE_NODE_COST: usize = 100;

/// Per-node cost of an AVL node.
pub const AVL_NODE_COST: usize = 150;

/// Per-node cost of a partition (segment tree) node.
pub const SEGMENT_NODE_COST: usize = 180;

/// Per-node cost of a suffix trie node.
pub const SUFFIX_NODE_COST: usize = 120;

/// Convert a node count to the synthetic kilobyte estimate.
#[inline]
pub fn node_cost_kb(nodes: usize, cost_per_node: usize) -> f64 {
    (nodes * cost_per_node) as f64 / 1024.0
}

/// Which of the four indexing structures an instance is.
///
/// The `u8` tag is what the binary format stores, so the discriminants are
/// part of the on-disk contract. Don't renumber them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StructureKind {
    Trie = 0,
    #[serde(rename = "AVLTree")]
    AvlTree = 1,
    SegmentTree = 2,
    SuffixTree = 3,
}

impl StructureKind {
    /// All structures, in report order.
    pub const ALL: [StructureKind; 4] = [
        StructureKind::Trie,
        StructureKind::AvlTree,
        StructureKind::SegmentTree,
        StructureKind::SuffixTree,
    ];

    /// Display name used in tables, CSV rows and cache file names.
    pub fn name(self) -> &'static str {
        match self {
            StructureKind::Trie => "Trie",
            StructureKind::AvlTree => "AVLTree",
            StructureKind::SegmentTree => "SegmentTree",
            StructureKind::SuffixTree => "SuffixTree",
        }
    }

    /// Stable tag for the binary header.
    #[inline]
    pub fn tag(self) -> u8 {
        self as u8
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(StructureKind::Trie),
            1 => Some(StructureKind::AvlTree),
            2 => Some(StructureKind::SegmentTree),
            3 => Some(StructureKind::SuffixTree),
            _ => None,
        }
    }

    /// Static complexity labels for this structure.
    pub fn complexity(self) -> Complexity {
        match self {
            StructureKind::Trie => Complexity {
                time: "O(L)",
                space: "O(N*L)",
            },
            StructureKind::AvlTree | StructureKind::SegmentTree => Complexity {
                time: "O(log n)",
                space: "O(n)",
            },
            StructureKind::SuffixTree => Complexity {
                time: "O(n)",
                space: "O(n^2)",
            },
        }
    }

    /// Bytes charged per node by `memory_estimate`.
    pub fn node_cost(self) -> usize {
        match self {
            StructureKind::Trie => TRIE_NODE_COST,
            StructureKind::AvlTree => AVL_NODE_COST,
            StructureKind::SegmentTree => SEGMENT_NODE_COST,
            StructureKind::SuffixTree => SUFFIX_NODE_COST,
        }
    }
}

impl fmt::Display for StructureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Human-readable asymptotic labels (informational only).
///
/// `L` is the average word length, `N`/`n` the word count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Complexity {
    pub time: &'static str,
    pub space: &'static str,
}
