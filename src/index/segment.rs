// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Static range partition (segment tree shape) over a sorted word array.
//!
//! Every node covers a contiguous range `[start, end]` of the backing array
//! and caches the first and last word of that range. Search uses the cached
//! bounds to skip subtrees that sit entirely before or entirely after the run
//! of words starting with the prefix.
//!
//! The partition is rebuilt from scratch on every change. That's O(n log n)
//! per single insert, which is fine: this structure is meant to be bulk-built
//! once and queried many times.
//!
//! # Pruning rule
//!
//! Words starting with `p` form one contiguous run in sorted order, beginning
//! at the first word `>= p`. A subtree can be skipped when:
//!
//! - `max_word < p` (everything is before the run), or
//! - `min_word > p` and `min_word` doesn't start with `p` (everything is after
//!   the run)
//!
//! The second condition needs the `starts_with` guard: `"apple" > "app"`, but
//! `"apple"` is exactly what we're looking for.

use super::PrefixIndex;
use crate::types::StructureKind;
use crate::verify::{contracts, InvariantError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PartitionNode {
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) min_word: String,
    pub(crate) max_word: String,
    pub(crate) left: Option<Box<PartitionNode>>,
    pub(crate) right: Option<Box<PartitionNode>>,
}

impl PartitionNode {
    pub(crate) fn new(words: &[String], start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            min_word: words[start].clone(),
            max_word: words[end].clone(),
            left: None,
            right: None,
        }
    }

    /// Can any word in this subtree start with `prefix`?
    #[inline]
    fn may_contain(&self, prefix: &str) -> bool {
        if self.max_word.as_str() < prefix {
            return false;
        }
        !(self.min_word.as_str() > prefix && !self.min_word.starts_with(prefix))
    }

    /// Both ends start with the prefix, so (sorted range) everything does.
    #[inline]
    fn fully_matches(&self, prefix: &str) -> bool {
        self.min_word.starts_with(prefix) && self.max_word.starts_with(prefix)
    }
}

/// Build the subtree for `[start, end]`, splitting at the midpoint.
/// Recursion depth is O(log n).
fn build(words: &[String], start: usize, end: usize) -> Box<PartitionNode> {
    let mut node = Box::new(PartitionNode::new(words, start, end));
    if start < end {
        let mid = (start + end) / 2;
        node.left = Some(build(words, start, mid));
        node.right = Some(build(words, mid + 1, end));
    }
    node
}

/// Prefix index backed by a bounded range partition.
#[derive(Debug, Clone, Default)]
pub struct BlockPartitionIndex {
    words: Vec<String>,
    root: Option<Box<PartitionNode>>,
}

impl BlockPartitionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// The sorted, deduplicated backing array.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Deletion is not supported: the partition is rebuilt only from
    /// insertions. This is deliberately a no-op.
    pub fn delete(&mut self, _word: &str) {}

    pub(crate) fn root(&self) -> Option<&PartitionNode> {
        self.root.as_deref()
    }

    pub(crate) fn from_parts(words: Vec<String>, root: Option<Box<PartitionNode>>) -> Self {
        Self { words, root }
    }

    fn rebuild(&mut self) {
        // The new root replaces the old one in a single assignment.
        self.root = if self.words.is_empty() {
            None
        } else {
            Some(build(&self.words, 0, self.words.len() - 1))
        };
        contracts::check_partition_sound(self);
    }

    fn search_node(&self, node: &PartitionNode, prefix: &str, out: &mut Vec<String>) {
        if !node.may_contain(prefix) {
            return;
        }

        let slice = &self.words[node.start..=node.end];
        if node.fully_matches(prefix) {
            out.extend_from_slice(slice);
            return;
        }

        out.extend(slice.iter().filter(|w| w.starts_with(prefix)).cloned());

        if let Some(left) = node.left.as_deref() {
            self.search_node(left, prefix, out);
        }
        if let Some(right) = node.right.as_deref() {
            self.search_node(right, prefix, out);
        }
    }

    /// Check array order, range coverage and the cached bounds at every node.
    pub fn verify(&self) -> Result<(), InvariantError> {
        for (i, pair) in self.words.windows(2).enumerate() {
            if pair[0] >= pair[1] {
                return Err(InvariantError::UnorderedKeys {
                    before: self.words[i].clone(),
                    after: self.words[i + 1].clone(),
                });
            }
        }
        if self.words.iter().any(String::is_empty) {
            return Err(InvariantError::MissingWord {
                word: String::new(),
            });
        }

        match (self.root.as_deref(), self.words.len()) {
            (None, 0) => Ok(()),
            (None, n) => Err(InvariantError::PartitionRange {
                start: 0,
                end: n - 1,
                expected_start: 0,
                expected_end: n - 1,
            }),
            (Some(root), n) => self.verify_node(root, 0, n.saturating_sub(1)),
        }
    }

    fn verify_node(
        &self,
        node: &PartitionNode,
        expected_start: usize,
        expected_end: usize,
    ) -> Result<(), InvariantError> {
        if node.start != expected_start || node.end != expected_end || node.end >= self.words.len()
        {
            return Err(InvariantError::PartitionRange {
                start: node.start,
                end: node.end,
                expected_start,
                expected_end,
            });
        }

        let slice = &self.words[node.start..=node.end];
        let bounds_hold = node.min_word == slice[0]
            && node.max_word == slice[slice.len() - 1]
            && slice
                .iter()
                .all(|w| node.min_word <= *w && *w <= node.max_word);
        if !bounds_hold {
            return Err(InvariantError::PartitionBounds {
                start: node.start,
                end: node.end,
            });
        }

        match (node.left.as_deref(), node.right.as_deref()) {
            (None, None) if node.start == node.end => Ok(()),
            (Some(left), Some(right)) if node.start < node.end => {
                let mid = (node.start + node.end) / 2;
                self.verify_node(left, node.start, mid)?;
                self.verify_node(right, mid + 1, node.end)
            }
            _ => Err(InvariantError::PartitionRange {
                start: node.start,
                end: node.end,
                expected_start,
                expected_end,
            }),
        }
    }
}

impl PrefixIndex for BlockPartitionIndex {
    fn kind(&self) -> StructureKind {
        StructureKind::SegmentTree
    }

    fn insert(&mut self, word: &str) {
        if word.is_empty() {
            return;
        }
        if let Err(pos) = self.words.binary_search_by(|w| w.as_str().cmp(word)) {
            self.words.insert(pos, word.to_string());
            self.rebuild();
        }
    }

    fn bulk_insert<S: AsRef<str>>(&mut self, words: &[S]) {
        let before = self.words.len();
        self.words.extend(
            words
                .iter()
                .map(|w| w.as_ref())
                .filter(|w| !w.is_empty())
                .map(str::to_string),
        );
        self.words.sort_unstable();
        self.words.dedup();
        if self.words.len() != before || self.root.is_none() {
            self.rebuild();
        }
    }

    fn search(&self, prefix: &str) -> Vec<String> {
        let mut results = Vec::new();
        if let Some(root) = self.root.as_deref() {
            self.search_node(root, prefix, &mut results);
        }
        results.sort_unstable();
        results.dedup();
        contracts::check_sorted_unique(&results);
        results
    }

    fn len(&self) -> usize {
        self.words.len()
    }

    fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&PartitionNode> = self.root.as_deref().into_iter().collect();
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.left.as_deref());
            stack.extend(node.right.as_deref());
        }
        count
    }
}
