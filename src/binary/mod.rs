// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary format for persisted prefix indexes.
//!
//! Building a suffix trie over a large corpus is the slow part of a benchmark
//! run, so built structures are cached on disk and reloaded next time. The
//! blob stores the structure's exact shape (node graph, heights, ranges), so
//! loading never re-runs the insert path.
//!
//! # Security Considerations
//!
//! Cache files are treated as untrusted input:
//! - All size fields are validated against MAX_* constants
//! - Bounds checking prevents buffer overreads
//! - CRC32 footer detects corruption/truncation
//! - Varint decoder has maximum iteration limits
//! - Decoded trees are depth-limited and run through `verify()` before use
//!
//! # Format Overview (v1)
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │ HEADER (24 bytes)                                          │
//! │   magic: [u8; 4] = "PDEX"                                  │
//! │   version: u8 = 1, kind: u8, flags: u8, reserved: u8       │
//! │   word_count: u32, node_count: u32                         │
//! │   vocab_len: u32, tree_len: u32                            │
//! ├────────────────────────────────────────────────────────────┤
//! │ VOCABULARY (front-compressed, absent for the plain trie)   │
//! ├────────────────────────────────────────────────────────────┤
//! │ TREE (pre-order node stream, shape depends on kind)        │
//! ├────────────────────────────────────────────────────────────┤
//! │ FOOTER (8 bytes): crc32 + magic "XEDP"                     │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! | Kind         | Vocabulary        | Tree section              |
//! |--------------|-------------------|---------------------------|
//! | Trie         | none              | char trie                 |
//! | AVLTree      | in-order keys     | AVL links (key = index)   |
//! | SegmentTree  | backing array     | partition ranges          |
//! | SuffixTree   | backing array     | suffix char trie          |

mod encoding;
mod header;

pub use encoding::{decode_varint, decode_vocabulary, encode_varint, encode_vocabulary};
pub use header::{
    BlobFooter, BlobHeader, FormatFlags, FOOTER_MAGIC, MAGIC, MAX_BLOB_SIZE, MAX_TREE_DEPTH,
    MAX_VARINT_BYTES, MAX_WORD_COUNT, VERSION,
};

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::index::{
    AnyIndex, BalancedOrderedIndex, BlockPartitionIndex, PrefixIndex, SuffixIndex, TrieIndex,
};
use crate::types::StructureKind;

fn invalid(msg: impl Into<String>) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg.into())
}

fn section_len(len: usize, what: &str) -> io::Result<u32> {
    u32::try_from(len).map_err(|_| invalid(format!("{} section too large ({} bytes)", what, len)))
}

// ============================================================================
// ENCODE
// ============================================================================

/// Serialize a built index to a self-checking blob.
///
/// Refuses anything [`from_bytes`] would refuse to read back: more than
/// [`MAX_WORD_COUNT`] words, or a blob over [`MAX_BLOB_SIZE`].
pub fn to_bytes(index: &AnyIndex) -> io::Result<Vec<u8>> {
    if index.len() > MAX_WORD_COUNT as usize {
        return Err(invalid(format!(
            "{} words exceeds limit {}",
            index.len(),
            MAX_WORD_COUNT
        )));
    }

    let mut vocab = Vec::new();
    let mut tree = Vec::new();
    let mut flags = FormatFlags::new();

    match index {
        AnyIndex::Trie(trie) => {
            encoding::encode_char_node(trie.root(), &mut tree);
        }
        AnyIndex::Avl(avl) => {
            let keys: Vec<String> = avl.keys().map(str::to_string).collect();
            encoding::encode_vocabulary(&keys, &mut vocab);
            encoding::encode_avl(avl.root(), &keys, &mut tree);
            flags = flags.with_vocabulary();
        }
        AnyIndex::Segment(segment) => {
            encoding::encode_vocabulary(segment.words(), &mut vocab);
            encoding::encode_partition(segment.root(), &mut tree);
            flags = flags.with_vocabulary();
        }
        AnyIndex::Suffix(suffix) => {
            encoding::encode_vocabulary(suffix.words(), &mut vocab);
            encoding::encode_char_node(suffix.root(), &mut tree);
            flags = flags.with_vocabulary();
        }
    }

    let header = BlobHeader {
        version: VERSION,
        kind: index.kind(),
        flags,
        word_count: section_len(index.len(), "Word")?,
        node_count: section_len(index.node_count(), "Node")?,
        vocab_len: section_len(vocab.len(), "Vocabulary")?,
        tree_len: section_len(tree.len(), "Tree")?,
    };

    let mut out = Vec::with_capacity(BlobHeader::SIZE + vocab.len() + tree.len() + BlobFooter::SIZE);
    header.write(&mut out)?;
    out.extend_from_slice(&vocab);
    out.extend_from_slice(&tree);

    let crc32 = BlobFooter::compute_crc32(&out);
    BlobFooter { crc32 }.write(&mut out)?;
    if out.len() > MAX_BLOB_SIZE {
        return Err(invalid(format!(
            "Blob size {} exceeds limit {}",
            out.len(),
            MAX_BLOB_SIZE
        )));
    }
    Ok(out)
}

// ============================================================================
// DECODE
// ============================================================================

/// Split a blob into its validated header and section slices.
fn parse_sections(bytes: &[u8]) -> io::Result<(BlobHeader, &[u8], &[u8])> {
    if bytes.len() > MAX_BLOB_SIZE {
        return Err(invalid(format!(
            "Blob size {} exceeds limit {}",
            bytes.len(),
            MAX_BLOB_SIZE
        )));
    }
    if bytes.len() < BlobHeader::SIZE + BlobFooter::SIZE {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("Blob too short ({} bytes)", bytes.len()),
        ));
    }

    let footer = BlobFooter::read(bytes)?;
    let content = &bytes[..bytes.len() - BlobFooter::SIZE];
    let computed = BlobFooter::compute_crc32(content);
    if footer.crc32 != computed {
        return Err(invalid(format!(
            "CRC32 mismatch: stored {:#010x}, computed {:#010x}",
            footer.crc32, computed
        )));
    }

    let header = BlobHeader::read(&mut &bytes[..BlobHeader::SIZE])?;
    if header.expected_blob_len() != Some(bytes.len()) {
        return Err(invalid(format!(
            "Section lengths ({} + {}) don't match blob size {}",
            header.vocab_len,
            header.tree_len,
            bytes.len()
        )));
    }

    let vocab_end = BlobHeader::SIZE + header.vocab_len as usize;
    let vocab = &bytes[BlobHeader::SIZE..vocab_end];
    let tree = &bytes[vocab_end..vocab_end + header.tree_len as usize];
    Ok((header, vocab, tree))
}

/// Rebuild an index from a blob produced by [`to_bytes`].
pub fn from_bytes(bytes: &[u8]) -> io::Result<AnyIndex> {
    let (header, vocab_bytes, tree_bytes) = parse_sections(bytes)?;

    let needs_vocabulary = header.kind != StructureKind::Trie;
    if header.flags.has_vocabulary() != needs_vocabulary {
        return Err(invalid(format!(
            "Vocabulary flag doesn't match structure {}",
            header.kind
        )));
    }
    let vocabulary = if needs_vocabulary {
        decode_vocabulary(vocab_bytes, header.word_count as usize)?
    } else if vocab_bytes.is_empty() {
        Vec::new()
    } else {
        return Err(invalid("Trie blob carries a vocabulary section"));
    };

    let (index, nodes): (AnyIndex, usize) = match header.kind {
        StructureKind::Trie => {
            let (root, nodes) = encoding::decode_char_trie(tree_bytes)?;
            (TrieIndex::from_root(root).into(), nodes)
        }
        StructureKind::AvlTree => {
            let (root, nodes) = encoding::decode_avl(tree_bytes, &vocabulary)?;
            (BalancedOrderedIndex::from_root(root).into(), nodes)
        }
        StructureKind::SegmentTree => {
            let (root, nodes) = encoding::decode_partition(tree_bytes, &vocabulary)?;
            (BlockPartitionIndex::from_parts(vocabulary, root).into(), nodes)
        }
        StructureKind::SuffixTree => {
            let (root, nodes) = encoding::decode_char_trie(tree_bytes)?;
            (SuffixIndex::from_parts(vocabulary, root).into(), nodes)
        }
    };

    if nodes != header.node_count as usize {
        return Err(invalid(format!(
            "Node count mismatch: header says {}, stream has {}",
            header.node_count, nodes
        )));
    }
    if index.len() != header.word_count as usize {
        return Err(invalid(format!(
            "Word count mismatch: header says {}, structure has {}",
            header.word_count,
            index.len()
        )));
    }
    index
        .verify()
        .map_err(|e| invalid(format!("Decoded {} violates invariant: {}", header.kind, e)))?;

    Ok(index)
}

// ============================================================================
// FILES
// ============================================================================

/// Cache file name for a structure: `<name lowercase>_structure.pdex`.
pub fn cache_file_name(kind: StructureKind) -> String {
    format!("{}_structure.pdex", kind.name().to_lowercase())
}

/// Write an index blob to `path`.
pub fn save_structure(index: &AnyIndex, path: &Path) -> io::Result<()> {
    let bytes = to_bytes(index)?;
    let mut file = fs::File::create(path)?;
    file.write_all(&bytes)?;
    file.sync_all()
}

/// Load an index blob from `path`. `Ok(None)` when there's no such file.
pub fn load_structure(kind: StructureKind, path: &Path) -> io::Result<Option<AnyIndex>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };
    let index = from_bytes(&bytes)?;
    if index.kind() != kind {
        return Err(invalid(format!(
            "{} holds a {}, expected a {}",
            path.display(),
            index.kind(),
            kind
        )));
    }
    Ok(Some(index))
}

// ============================================================================
// INSPECT
// ============================================================================

/// What's inside a blob, without trusting it enough to rebuild the structure.
#[derive(Debug, Clone, Serialize)]
pub struct BlobSummary {
    pub kind: StructureKind,
    pub version: u8,
    pub word_count: u32,
    pub node_count: u32,
    pub total_len: usize,
    pub header_len: usize,
    pub vocab_len: u32,
    pub tree_len: u32,
    pub footer_len: usize,
    pub crc_valid: bool,
    /// Size after brotli (quality 11), for comparison.
    pub brotli_len: usize,
}

fn compress_brotli(data: &[u8]) -> io::Result<usize> {
    let mut compressed = Vec::new();
    {
        let mut encoder = brotli::CompressorWriter::new(&mut compressed, 4096, 11, 22);
        encoder.write_all(data)?;
    }
    Ok(compressed.len())
}

/// Read the header and footer of a blob. A CRC mismatch is reported, not
/// raised; a malformed header is an error.
pub fn inspect(bytes: &[u8]) -> io::Result<BlobSummary> {
    if bytes.len() < BlobHeader::SIZE + BlobFooter::SIZE {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("File too small ({} bytes)", bytes.len()),
        ));
    }
    let header = BlobHeader::read(&mut &bytes[..BlobHeader::SIZE])?;
    let footer = BlobFooter::read(bytes)?;
    let content = &bytes[..bytes.len() - BlobFooter::SIZE];

    Ok(BlobSummary {
        kind: header.kind,
        version: header.version,
        word_count: header.word_count,
        node_count: header.node_count,
        total_len: bytes.len(),
        header_len: BlobHeader::SIZE,
        vocab_len: header.vocab_len,
        tree_len: header.tree_len,
        footer_len: BlobFooter::SIZE,
        crc_valid: footer.crc32 == BlobFooter::compute_crc32(content),
        brotli_len: compress_brotli(bytes)?,
    })
}
