// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! AVL tree keyed by whole words.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **BALANCED**: for every node, `|height(left) - height(right)| <= 1`
//! 2. **HEIGHT_CACHED**: `height(node) = 1 + max(height(left), height(right))`,
//!    empty subtrees have height 0
//! 3. **ORDERED**: in-order traversal is strictly ascending (no duplicates)
//!
//! Prefix search does a full in-order sweep and keeps keys that start with the
//! prefix. The sweep visits keys in order, so the output is already sorted.

use std::cmp::Ordering;

use super::PrefixIndex;
use crate::types::StructureKind;
use crate::verify::{contracts, InvariantError};

pub(crate) type Link = Option<Box<AvlNode>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AvlNode {
    pub(crate) key: String,
    pub(crate) left: Link,
    pub(crate) right: Link,
    pub(crate) height: usize,
}

impl AvlNode {
    fn leaf(key: &str) -> Box<Self> {
        Box::new(Self {
            key: key.to_string(),
            left: None,
            right: None,
            height: 1,
        })
    }
}

#[inline]
fn height(link: &Link) -> usize {
    link.as_ref().map_or(0, |node| node.height)
}

#[inline]
fn balance_factor(node: &AvlNode) -> isize {
    height(&node.left) as isize - height(&node.right) as isize
}

#[inline]
fn update_height(node: &mut AvlNode) {
    node.height = 1 + height(&node.left).max(height(&node.right));
}

fn rotate_right(mut y: Box<AvlNode>) -> Box<AvlNode> {
    let Some(mut x) = y.left.take() else {
        return y;
    };
    y.left = x.right.take();
    update_height(&mut y);
    x.right = Some(y);
    update_height(&mut x);
    x
}

fn rotate_left(mut x: Box<AvlNode>) -> Box<AvlNode> {
    let Some(mut y) = x.right.take() else {
        return x;
    };
    x.right = y.left.take();
    update_height(&mut x);
    y.left = Some(x);
    update_height(&mut y);
    y
}

fn rebalance(mut node: Box<AvlNode>) -> Box<AvlNode> {
    let balance = balance_factor(&node);

    // Left heavy
    if balance > 1 {
        if node.left.as_deref().map_or(0, balance_factor) < 0 {
            node.left = node.left.take().map(rotate_left);
        }
        return rotate_right(node);
    }

    // Right heavy
    if balance < -1 {
        if node.right.as_deref().map_or(0, balance_factor) > 0 {
            node.right = node.right.take().map(rotate_right);
        }
        return rotate_left(node);
    }

    node
}

/// Recursive insert. Depth is bounded by the tree height, O(log n).
fn insert_at(link: Link, word: &str, inserted: &mut bool) -> Box<AvlNode> {
    let Some(mut node) = link else {
        *inserted = true;
        return AvlNode::leaf(word);
    };

    match word.cmp(node.key.as_str()) {
        Ordering::Less => node.left = Some(insert_at(node.left.take(), word, inserted)),
        Ordering::Greater => node.right = Some(insert_at(node.right.take(), word, inserted)),
        Ordering::Equal => return node,
    }

    update_height(&mut node);
    rebalance(node)
}

/// In-order key iterator driven by an explicit stack.
pub struct Keys<'a> {
    stack: Vec<&'a AvlNode>,
}

impl<'a> Keys<'a> {
    fn new(root: Option<&'a AvlNode>) -> Self {
        let mut keys = Self { stack: Vec::new() };
        keys.push_left_spine(root);
        keys
    }

    fn push_left_spine(&mut self, mut node: Option<&'a AvlNode>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a> Iterator for Keys<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some(node.key.as_str())
    }
}

/// Prefix index backed by a height-balanced binary search tree.
#[derive(Debug, Clone, Default)]
pub struct BalancedOrderedIndex {
    root: Link,
    word_count: usize,
}

impl BalancedOrderedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Height of the whole tree (0 when empty).
    pub fn height(&self) -> usize {
        height(&self.root)
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> Keys<'_> {
        Keys::new(self.root.as_deref())
    }

    pub(crate) fn root(&self) -> Option<&AvlNode> {
        self.root.as_deref()
    }

    pub(crate) fn from_root(root: Link) -> Self {
        let word_count = Keys::new(root.as_deref()).count();
        Self { root, word_count }
    }

    fn insert_word(&mut self, word: &str) {
        if word.is_empty() {
            return;
        }
        let mut inserted = false;
        self.root = Some(insert_at(self.root.take(), word, &mut inserted));
        if inserted {
            self.word_count += 1;
        }
    }

    /// Check balance, cached heights, key order and the word counter.
    pub fn verify(&self) -> Result<(), InvariantError> {
        fn check(node: &AvlNode) -> Result<usize, InvariantError> {
            let left = node.left.as_deref().map(check).transpose()?.unwrap_or(0);
            let right = node.right.as_deref().map(check).transpose()?.unwrap_or(0);
            let balance = left as isize - right as isize;
            if !(-1..=1).contains(&balance) {
                return Err(InvariantError::Unbalanced {
                    key: node.key.clone(),
                    balance,
                });
            }
            let expected = 1 + left.max(right);
            if node.height != expected {
                return Err(InvariantError::StaleHeight {
                    key: node.key.clone(),
                    cached: node.height,
                    actual: expected,
                });
            }
            Ok(expected)
        }

        if let Some(root) = self.root.as_deref() {
            check(root)?;
        }

        let mut count = 0;
        let mut prev: Option<&str> = None;
        for key in self.keys() {
            if let Some(p) = prev {
                match p.cmp(key) {
                    Ordering::Less => {}
                    Ordering::Equal => {
                        return Err(InvariantError::DuplicateKey {
                            key: key.to_string(),
                        })
                    }
                    Ordering::Greater => {
                        return Err(InvariantError::UnorderedKeys {
                            before: p.to_string(),
                            after: key.to_string(),
                        })
                    }
                }
            }
            if key.is_empty() {
                return Err(InvariantError::MissingWord {
                    word: String::new(),
                });
            }
            prev = Some(key);
            count += 1;
        }

        if count != self.word_count {
            return Err(InvariantError::WordCountMismatch {
                claimed: self.word_count,
                actual: count,
            });
        }
        Ok(())
    }
}

impl PrefixIndex for BalancedOrderedIndex {
    fn kind(&self) -> StructureKind {
        StructureKind::AvlTree
    }

    fn insert(&mut self, word: &str) {
        self.insert_word(word);
        contracts::check_avl_invariant(self);
    }

    fn bulk_insert<S: AsRef<str>>(&mut self, words: &[S]) {
        for word in words {
            self.insert_word(word.as_ref());
        }
        contracts::check_avl_invariant(self);
    }

    fn search(&self, prefix: &str) -> Vec<String> {
        let results: Vec<String> = self
            .keys()
            .filter(|key| key.starts_with(prefix))
            .map(str::to_string)
            .collect();
        contracts::check_sorted_unique(&results);
        results
    }

    fn len(&self) -> usize {
        self.word_count
    }

    fn node_count(&self) -> usize {
        self.word_count
    }
}
