// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Character-keyed tree node shared by the word trie and the suffix trie.
//!
//! Children live in a `BTreeMap<char, _>`, so a pre-order walk visits paths in
//! codepoint order. UTF-8 byte order agrees with codepoint order, which means
//! the walk emits strings in exactly the order `String::cmp` would sort them.
//! Collection never has to sort.
//!
//! Depth equals the longest word (or suffix), and nothing bounds it. Every
//! walk over the tree, including clone, comparison and drop, runs on an
//! explicit heap stack instead of the call stack.

use std::collections::{btree_map, BTreeMap};
use std::fmt;

#[derive(Default, Eq)]
pub(crate) struct CharNode {
    pub(crate) children: BTreeMap<char, CharNode>,
    /// End-of-word for the trie, end-of-suffix for the suffix trie.
    pub(crate) terminal: bool,
}

impl CharNode {
    pub(crate) fn leaf(terminal: bool) -> Self {
        Self {
            children: BTreeMap::new(),
            terminal,
        }
    }

    /// Walk `path` from this node, creating missing children, and mark the
    /// landing node terminal. Returns `true` only if the mark is new.
    pub(crate) fn insert(&mut self, path: &str) -> bool {
        let mut node = self;
        for c in path.chars() {
            node = node.children.entry(c).or_default();
        }
        let newly_marked = !node.terminal;
        node.terminal = true;
        newly_marked
    }

    /// Node reached by walking `path`, if every character is present.
    pub(crate) fn descend(&self, path: &str) -> Option<&CharNode> {
        let mut node = self;
        for c in path.chars() {
            node = node.children.get(&c)?;
        }
        Some(node)
    }

    /// Pre-order sweep: push `buf` for every terminal node below (and
    /// including) this one. `buf` holds the path consumed so far and is
    /// restored before returning.
    pub(crate) fn collect_into(&self, buf: &mut String, out: &mut Vec<String>) {
        if self.terminal {
            out.push(buf.clone());
        }
        // One child iterator per level; buf holds one char per level below the root.
        let mut stack = vec![self.children.iter()];
        while let Some(children) = stack.last_mut() {
            match children.next() {
                Some((&c, child)) => {
                    buf.push(c);
                    if child.terminal {
                        out.push(buf.clone());
                    }
                    stack.push(child.children.iter());
                }
                None => {
                    stack.pop();
                    if !stack.is_empty() {
                        buf.pop();
                    }
                }
            }
        }
    }

    /// Longest root-to-node path, in characters.
    pub(crate) fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(node.children.values().map(|child| (child, depth + 1)));
        }
        deepest
    }

    /// Total nodes in this subtree, this node included.
    pub(crate) fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.values());
        }
        count
    }

    /// Number of terminal nodes in this subtree.
    pub(crate) fn terminal_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if node.terminal {
                count += 1;
            }
            stack.extend(node.children.values());
        }
        count
    }

    /// Every terminal path below this node, in sorted order.
    pub(crate) fn terminal_paths(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_into(&mut String::new(), &mut out);
        out
    }
}

impl Drop for CharNode {
    fn drop(&mut self) {
        // Detach children before they drop, so each node drops with an
        // empty map and drop glue never recurses.
        let mut stack: Vec<CharNode> = std::mem::take(&mut self.children).into_values().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(std::mem::take(&mut node.children).into_values());
        }
    }
}

impl Clone for CharNode {
    fn clone(&self) -> Self {
        // (source children still to copy, copy under construction, key in parent)
        let mut stack: Vec<(btree_map::Iter<'_, char, CharNode>, CharNode, char)> =
            vec![(self.children.iter(), CharNode::leaf(self.terminal), '\0')];
        let mut root = None;
        while let Some((children, _, _)) = stack.last_mut() {
            if let Some((&c, child)) = children.next() {
                stack.push((child.children.iter(), CharNode::leaf(child.terminal), c));
                continue;
            }
            if let Some((_, node, c)) = stack.pop() {
                match stack.last_mut() {
                    Some((_, parent, _)) => {
                        parent.children.insert(c, node);
                    }
                    None => root = Some(node),
                }
            }
        }
        root.unwrap_or_default()
    }
}

impl PartialEq for CharNode {
    fn eq(&self, other: &Self) -> bool {
        let mut stack = vec![(self, other)];
        while let Some((a, b)) = stack.pop() {
            if a.terminal != b.terminal || a.children.len() != b.children.len() {
                return false;
            }
            for ((ca, na), (cb, nb)) in a.children.iter().zip(&b.children) {
                if ca != cb {
                    return false;
                }
                stack.push((na, nb));
            }
        }
        true
    }
}

/// Shallow: the children's keys and the subtree size, never the subtree.
impl fmt::Debug for CharNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CharNode")
            .field("terminal", &self.terminal)
            .field("children", &self.children.keys().collect::<Vec<_>>())
            .field("nodes", &self.node_count())
            .finish()
    }
}
