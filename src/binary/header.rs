// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Blob header and footer.
//!
//! The header is 24 bytes of fixed-size fields, parsed in one read before
//! anything else. It says which structure the blob holds and where each
//! section lives.
//!
//! The footer is 8 bytes: a CRC32 checksum over everything before it, plus a
//! magic number ("XEDP", the header magic reversed). If the footer is wrong,
//! something got corrupted or truncated. Don't trust the data.
//!
//! ```text
//! ┌────────────┬──────────────┬──────────────┬────────────┐
//! │ header 24B │ vocabulary   │ tree         │ footer 8B  │
//! └────────────┴──────────────┴──────────────┴────────────┘
//! ```

use std::io::{self, Read, Write};

use crc32fast::Hasher as Crc32Hasher;

use crate::types::StructureKind;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Magic bytes: "PDEX" in ASCII (header)
pub const MAGIC: [u8; 4] = [0x50, 0x44, 0x45, 0x58];

/// Footer magic: "XEDP" (reversed, marks valid file end)
pub const FOOTER_MAGIC: [u8; 4] = [0x58, 0x45, 0x44, 0x50];

/// Current format version
pub const VERSION: u8 = 1;

// ============================================================================
// SECURITY LIMITS (prevent resource exhaustion from malicious input)
// ============================================================================

/// Maximum blob size: 256 MB
pub const MAX_BLOB_SIZE: usize = 256 * 1024 * 1024;

/// Maximum number of words
pub const MAX_WORD_COUNT: u32 = 20_000_000;

/// Maximum varint bytes (u64 needs at most 10 bytes)
pub const MAX_VARINT_BYTES: usize = 10;

/// Maximum nesting depth of a decoded AVL or partition tree. Both are
/// logarithmic in the word count: under [`MAX_WORD_COUNT`] an AVL tree is at
/// most 35 levels and a partition tree 26. Char tries are not depth-limited.
pub const MAX_TREE_DEPTH: usize = 64;

// ============================================================================
// FLAGS
// ============================================================================

/// Format flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatFlags(pub(crate) u8);

impl FormatFlags {
    pub const HAS_VOCABULARY: u8 = 0b0000_0001;

    pub fn new() -> Self {
        Self(0)
    }

    pub fn with_vocabulary(mut self) -> Self {
        self.0 |= Self::HAS_VOCABULARY;
        self
    }

    pub fn has_vocabulary(self) -> bool {
        self.0 & Self::HAS_VOCABULARY != 0
    }
}

// ============================================================================
// HEADER
// ============================================================================

/// Blob header (24 bytes fixed size)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobHeader {
    pub version: u8,
    pub kind: StructureKind,
    pub flags: FormatFlags,
    /// Distinct words held by the structure.
    pub word_count: u32,
    /// Nodes in the tree section (trie nodes include the root).
    pub node_count: u32,
    pub vocab_len: u32,
    pub tree_len: u32,
}

impl BlobHeader {
    // 4 (magic) + 1 (version) + 1 (kind) + 1 (flags) + 1 (reserved) + 4*4 (u32s) = 24
    pub const SIZE: usize = 24;

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&MAGIC)?;
        w.write_all(&[self.version, self.kind.tag(), self.flags.0, 0])?;
        w.write_all(&self.word_count.to_le_bytes())?;
        w.write_all(&self.node_count.to_le_bytes())?;
        w.write_all(&self.vocab_len.to_le_bytes())?;
        w.write_all(&self.tree_len.to_le_bytes())?;
        Ok(())
    }

    pub fn read<R: Read>(r: &mut R) -> io::Result<Self> {
        let mut magic = [0u8; 4];
        r.read_exact(&mut magic)?;
        if magic != MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid magic: expected PDEX, got {:?}", magic),
            ));
        }

        let mut buf = [0u8; 20]; // 24 - 4 (magic) = 20
        r.read_exact(&mut buf)?;

        let version = buf[0];
        if version != VERSION {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Unsupported version {} (expected {})", version, VERSION),
            ));
        }
        let kind = StructureKind::from_tag(buf[1]).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Unknown structure tag {}", buf[1]),
            )
        })?;

        let word_count = u32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
        if word_count > MAX_WORD_COUNT {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Word count {} exceeds limit {}", word_count, MAX_WORD_COUNT),
            ));
        }

        Ok(Self {
            version,
            kind,
            flags: FormatFlags(buf[2]),
            // buf[3] is reserved
            word_count,
            node_count: u32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]),
            vocab_len: u32::from_le_bytes([buf[12], buf[13], buf[14], buf[15]]),
            tree_len: u32::from_le_bytes([buf[16], buf[17], buf[18], buf[19]]),
        })
    }

    /// Total blob length this header describes, if it doesn't overflow.
    pub fn expected_blob_len(&self) -> Option<usize> {
        Self::SIZE
            .checked_add(self.vocab_len as usize)?
            .checked_add(self.tree_len as usize)?
            .checked_add(BlobFooter::SIZE)
    }
}

// ============================================================================
// FOOTER (8 bytes)
// ============================================================================

/// Footer with CRC32 checksum and magic number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobFooter {
    /// CRC32 checksum of header + all sections (everything before footer)
    pub crc32: u32,
}

impl BlobFooter {
    pub const SIZE: usize = 8; // 4 bytes CRC32 + 4 bytes magic

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&self.crc32.to_le_bytes())?;
        w.write_all(&FOOTER_MAGIC)?;
        Ok(())
    }

    /// Read the footer from the tail of `bytes`.
    pub fn read(bytes: &[u8]) -> io::Result<Self> {
        if bytes.len() < Self::SIZE {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "Blob too short for footer",
            ));
        }

        let footer_start = bytes.len() - Self::SIZE;

        let magic = &bytes[footer_start + 4..];
        if magic != FOOTER_MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid footer magic: expected XEDP, got {:?}", magic),
            ));
        }

        let crc32 = u32::from_le_bytes([
            bytes[footer_start],
            bytes[footer_start + 1],
            bytes[footer_start + 2],
            bytes[footer_start + 3],
        ]);

        Ok(Self { crc32 })
    }

    /// Compute CRC32 over the given bytes
    pub fn compute_crc32(data: &[u8]) -> u32 {
        let mut hasher = Crc32Hasher::new();
        hasher.update(data);
        hasher.finalize()
    }
}
