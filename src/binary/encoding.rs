// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Encoding primitives: varint, front compression, and pre-order node streams.
//!
//! Nothing fancy here, just the classics done right. Varint for integers that
//! are usually small. Front compression for sorted word lists that share
//! prefixes. Pre-order streams for trees, so decoding rebuilds the exact
//! shape that was saved instead of re-running the insert path.
//!
//! # References
//!
//! - **Varint (LEB128)**: Little-endian base-128 variable-length integer encoding.
//!   See Google Protocol Buffers encoding: <https://protobuf.dev/programming-guides/encoding/>
//!
//! - **Front Compression**: Incremental encoding for sorted string sequences.
//!   Witten, Moffat, Bell (1999): "Managing Gigabytes", §3.3 "Front Coding".
//!
//! # Node streams
//!
//! ```text
//! char trie:  node  := flags(varint, bit0 = terminal) count(varint) (char(varint) node)*
//! avl:        link  := 0 | 1 height(varint) key_index(varint) link(left) link(right)
//! partition:  link  := 0 | 1 start(varint) end(varint) link(left) link(right)
//! ```

use std::io;

use super::header::{MAX_TREE_DEPTH, MAX_VARINT_BYTES};
use crate::index::{AvlNode, CharNode, Link, PartitionNode};

// ============================================================================
// VARINT ENCODING
// ============================================================================

/// Encode a varint to bytes
pub fn encode_varint(mut value: u64, buf: &mut Vec<u8>) {
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            buf.push(byte);
            break;
        } else {
            buf.push(byte | 0x80);
        }
    }
}

/// Decode a varint from bytes, returning (value, bytes_consumed)
///
/// Returns an error if:
/// - Buffer is empty
/// - Varint exceeds MAX_VARINT_BYTES (malformed/malicious input)
pub fn decode_varint(bytes: &[u8]) -> io::Result<(u64, usize)> {
    if bytes.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "Empty buffer for varint",
        ));
    }

    let mut result: u64 = 0;
    let mut shift = 0;
    let mut i = 0;

    while i < bytes.len() && i < MAX_VARINT_BYTES {
        let byte = bytes[i];
        result |= ((byte & 0x7F) as u64) << shift;
        i += 1;
        if byte & 0x80 == 0 {
            return Ok((result, i));
        }
        shift += 7;
    }

    if i >= MAX_VARINT_BYTES {
        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "Varint exceeds maximum length (possible corruption)",
        ))
    } else {
        Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "Incomplete varint",
        ))
    }
}

fn invalid(msg: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg)
}

/// Sequential reader over a section.
struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
    nodes: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            pos: 0,
            nodes: 0,
        }
    }

    fn varint(&mut self) -> io::Result<u64> {
        let (value, consumed) = decode_varint(&self.bytes[self.pos..])?;
        self.pos += consumed;
        Ok(value)
    }

    /// A varint used as a count or index; bounded by `limit`.
    fn bounded(&mut self, limit: usize, what: &str) -> io::Result<usize> {
        let value = self.varint()?;
        if value > limit as u64 {
            return Err(invalid(format!("{} {} exceeds limit {}", what, value, limit)));
        }
        Ok(value as usize)
    }

    fn byte(&mut self) -> io::Result<u8> {
        let byte = *self.bytes.get(self.pos).ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "Truncated node stream")
        })?;
        self.pos += 1;
        Ok(byte)
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn count_node(&mut self) {
        self.nodes += 1;
    }

    /// Count a balanced-tree node `depth` levels below the root.
    fn enter(&mut self, depth: usize) -> io::Result<()> {
        if depth > MAX_TREE_DEPTH {
            return Err(invalid(format!(
                "Tree depth exceeds limit {}",
                MAX_TREE_DEPTH
            )));
        }
        self.count_node();
        Ok(())
    }

    /// Every byte of the section must belong to the stream.
    fn finish(self) -> io::Result<usize> {
        if self.pos != self.bytes.len() {
            return Err(invalid(format!(
                "{} trailing bytes after node stream",
                self.bytes.len() - self.pos
            )));
        }
        Ok(self.nodes)
    }
}

// ============================================================================
// FRONT-CODED VOCABULARY
// ============================================================================

fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

/// Encode a sorted word list with front compression.
pub fn encode_vocabulary(vocabulary: &[String], out: &mut Vec<u8>) {
    let mut prev: &[u8] = &[];

    for word in vocabulary {
        let bytes = word.as_bytes();
        let shared = common_prefix_len(prev, bytes);
        let suffix = &bytes[shared..];

        encode_varint(shared as u64, out);
        encode_varint(suffix.len() as u64, out);
        out.extend_from_slice(suffix);

        prev = bytes;
    }
}

/// Decode `word_count` front-coded words.
pub fn decode_vocabulary(bytes: &[u8], word_count: usize) -> io::Result<Vec<String>> {
    // Every entry needs at least two varint bytes.
    if word_count > bytes.len() / 2 + 1 {
        return Err(invalid(format!(
            "Word count {} exceeds available bytes {}",
            word_count,
            bytes.len()
        )));
    }

    let mut words = Vec::with_capacity(word_count);
    let mut reader = Reader::new(bytes);
    let mut prev_bytes: Vec<u8> = Vec::new();

    for i in 0..word_count {
        if reader.remaining() == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("Truncated vocabulary at word {}", i),
            ));
        }

        let shared = reader.varint()? as usize;
        if shared > prev_bytes.len() {
            return Err(invalid(format!(
                "Invalid shared prefix length {} (prev word len {})",
                shared,
                prev_bytes.len()
            )));
        }

        let suffix_len = reader.varint()? as usize;
        let end_pos = reader.pos.checked_add(suffix_len).ok_or_else(|| {
            invalid(format!("Word {} suffix length {} causes overflow", i, suffix_len))
        })?;
        if end_pos > bytes.len() {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("Truncated word {} suffix (expected {} bytes)", i, suffix_len),
            ));
        }

        let mut word_bytes = prev_bytes[..shared].to_vec();
        word_bytes.extend_from_slice(&bytes[reader.pos..end_pos]);
        reader.pos = end_pos;

        let word = String::from_utf8(word_bytes.clone())
            .map_err(|e| invalid(format!("Invalid UTF-8 in word {}: {}", i, e)))?;
        words.push(word);
        prev_bytes = word_bytes;
    }

    reader.finish()?;
    Ok(words)
}

// ============================================================================
// CHAR TRIE STREAM
// ============================================================================

fn encode_node_head(node: &CharNode, out: &mut Vec<u8>) {
    encode_varint(u64::from(node.terminal), out);
    encode_varint(node.children.len() as u64, out);
}

/// Pre-order, driven by an explicit stack: trie depth is the longest word.
pub(crate) fn encode_char_node(root: &CharNode, out: &mut Vec<u8>) {
    encode_node_head(root, out);
    let mut stack = vec![root.children.iter()];
    while let Some(children) = stack.last_mut() {
        match children.next() {
            Some((&c, child)) => {
                encode_varint(u64::from(c as u32), out);
                encode_node_head(child, out);
                stack.push(child.children.iter());
            }
            None => {
                stack.pop();
            }
        }
    }
}

/// One node being decoded: its children arrive before it is attached.
struct TrieFrame {
    node: CharNode,
    key: char,
    remaining: usize,
    prev: Option<char>,
}

fn read_trie_frame(reader: &mut Reader<'_>, key: char) -> io::Result<TrieFrame> {
    reader.count_node();
    let terminal = match reader.varint()? {
        0 => false,
        1 => true,
        other => return Err(invalid(format!("Invalid node flags {}", other))),
    };
    // Each child costs at least two bytes (char + flags).
    let remaining = reader.bounded(reader.remaining() / 2, "Child count")?;
    Ok(TrieFrame {
        node: CharNode::leaf(terminal),
        key,
        remaining,
        prev: None,
    })
}

/// Decode a char trie; returns the root and its node count.
///
/// No depth limit: the stack lives on the heap and every node costs at
/// least two bytes of input, so the blob size bounds it.
pub(crate) fn decode_char_trie(bytes: &[u8]) -> io::Result<(CharNode, usize)> {
    let mut reader = Reader::new(bytes);
    let mut stack = vec![read_trie_frame(&mut reader, '\0')?];
    let mut root = None;

    while let Some(top) = stack.last_mut() {
        if top.remaining > 0 {
            top.remaining -= 1;
            let raw = reader.varint()?;
            let c = u32::try_from(raw)
                .ok()
                .and_then(char::from_u32)
                .ok_or_else(|| invalid(format!("Invalid char code {}", raw)))?;
            if top.prev.is_some_and(|p| p >= c) {
                return Err(invalid(format!("Children out of order at {:?}", c)));
            }
            top.prev = Some(c);
            let frame = read_trie_frame(&mut reader, c)?;
            stack.push(frame);
            continue;
        }
        if let Some(done) = stack.pop() {
            match stack.last_mut() {
                Some(parent) => {
                    parent.node.children.insert(done.key, done.node);
                }
                None => root = Some(done.node),
            }
        }
    }

    let nodes = reader.finish()?;
    Ok((root.unwrap_or_default(), nodes))
}

// ============================================================================
// AVL STREAM
// ============================================================================

/// Encode an AVL tree; keys are stored as positions in the sorted vocabulary.
pub(crate) fn encode_avl(link: Option<&AvlNode>, vocabulary: &[String], out: &mut Vec<u8>) {
    let Some(node) = link else {
        out.push(0);
        return;
    };
    out.push(1);
    encode_varint(node.height as u64, out);
    // Every key is in the vocabulary; it was built from the same tree.
    let key_index = vocabulary
        .binary_search(&node.key)
        .unwrap_or(vocabulary.len());
    encode_varint(key_index as u64, out);
    encode_avl(node.left.as_deref(), vocabulary, out);
    encode_avl(node.right.as_deref(), vocabulary, out);
}

/// Decode an AVL tree against its vocabulary; returns the root and node count.
pub(crate) fn decode_avl(bytes: &[u8], vocabulary: &[String]) -> io::Result<(Link, usize)> {
    fn link(reader: &mut Reader<'_>, vocabulary: &[String], depth: usize) -> io::Result<Link> {
        match reader.byte()? {
            0 => Ok(None),
            1 => {
                reader.enter(depth)?;
                let height = reader.bounded(MAX_TREE_DEPTH, "Height")?;
                let key_index = reader.bounded(vocabulary.len().saturating_sub(1), "Key index")?;
                let key = vocabulary
                    .get(key_index)
                    .cloned()
                    .ok_or_else(|| invalid(format!("Key index {} out of range", key_index)))?;
                let left = link(reader, vocabulary, depth + 1)?;
                let right = link(reader, vocabulary, depth + 1)?;
                Ok(Some(Box::new(AvlNode {
                    key,
                    left,
                    right,
                    height,
                })))
            }
            tag => Err(invalid(format!("Invalid AVL link tag {}", tag))),
        }
    }

    let mut reader = Reader::new(bytes);
    let root = link(&mut reader, vocabulary, 0)?;
    let nodes = reader.finish()?;
    Ok((root, nodes))
}

// ============================================================================
// PARTITION STREAM
// ============================================================================

pub(crate) fn encode_partition(link: Option<&PartitionNode>, out: &mut Vec<u8>) {
    let Some(node) = link else {
        out.push(0);
        return;
    };
    out.push(1);
    encode_varint(node.start as u64, out);
    encode_varint(node.end as u64, out);
    encode_partition(node.left.as_deref(), out);
    encode_partition(node.right.as_deref(), out);
}

/// Decode a partition tree over `words`; returns the root and node count.
/// Cached min/max words are re-derived from the ranges.
pub(crate) fn decode_partition(
    bytes: &[u8],
    words: &[String],
) -> io::Result<(Option<Box<PartitionNode>>, usize)> {
    fn link(
        reader: &mut Reader<'_>,
        words: &[String],
        depth: usize,
    ) -> io::Result<Option<Box<PartitionNode>>> {
        match reader.byte()? {
            0 => Ok(None),
            1 => {
                reader.enter(depth)?;
                let last = words.len().saturating_sub(1);
                let start = reader.bounded(last, "Range start")?;
                let end = reader.bounded(last, "Range end")?;
                if start > end || words.is_empty() {
                    return Err(invalid(format!("Invalid range [{}, {}]", start, end)));
                }
                let mut node = PartitionNode::new(words, start, end);
                node.left = link(reader, words, depth + 1)?;
                node.right = link(reader, words, depth + 1)?;
                Ok(Some(Box::new(node)))
            }
            tag => Err(invalid(format!("Invalid partition link tag {}", tag))),
        }
    }

    let mut reader = Reader::new(bytes);
    let root = link(&mut reader, words, 0)?;
    let nodes = reader.finish()?;
    Ok((root, nodes))
}
