// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error type for structural invariant violations.
//!
//! | Variant             | Structure        | Broken invariant                       |
//! |---------------------|------------------|----------------------------------------|
//! | `Unbalanced`        | AVL              | `|h(left) - h(right)| <= 1`            |
//! | `StaleHeight`       | AVL              | `h = 1 + max(h(left), h(right))`       |
//! | `UnorderedKeys`     | AVL, arrays      | strictly ascending order               |
//! | `DuplicateKey`      | AVL, arrays      | uniqueness                             |
//! | `PartitionRange`    | segment tree     | midpoint split, singleton leaves       |
//! | `PartitionBounds`   | segment tree     | cached min/max bound the node's slice  |
//! | `MissingWord`       | all              | an expected word/suffix is absent      |
//! | `EmptyWord`         | trie             | the empty string is never stored       |
//! | `UnexpectedSuffix`  | suffix trie      | marked path is not a suffix of a word  |
//! | `WordCountMismatch` | trie, AVL        | counter matches the marked words       |
//! | `UnsortedResults`   | search output    | sorted, duplicate-free results         |

use std::fmt;

/// Error type for invariant violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantError {
    /// Balance factor outside `[-1, 1]` at the node holding `key`.
    Unbalanced { key: String, balance: isize },
    /// Cached height disagrees with the children.
    StaleHeight {
        key: String,
        cached: usize,
        actual: usize,
    },
    /// Two keys appear in descending order.
    UnorderedKeys { before: String, after: String },
    /// A key appears twice.
    DuplicateKey { key: String },
    /// A partition node covers the wrong range, or has the wrong shape.
    PartitionRange {
        start: usize,
        end: usize,
        expected_start: usize,
        expected_end: usize,
    },
    /// A partition node's cached bounds don't match its slice.
    PartitionBounds { start: usize, end: usize },
    /// A word (or suffix) that must be present is not.
    MissingWord { word: String },
    /// The empty string is marked as a stored word.
    EmptyWord,
    /// The suffix trie marks a path that is no word's suffix.
    UnexpectedSuffix { suffix: String },
    /// Distinct-word counter disagrees with the structure.
    WordCountMismatch { claimed: usize, actual: usize },
    /// Search output is out of order or repeats a word.
    UnsortedResults { position: usize },
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantError::Unbalanced { key, balance } => {
                write!(f, "node '{}' has balance factor {}", key, balance)
            }
            InvariantError::StaleHeight {
                key,
                cached,
                actual,
            } => {
                write!(
                    f,
                    "node '{}' caches height {} but its subtree has height {}",
                    key, cached, actual
                )
            }
            InvariantError::UnorderedKeys { before, after } => {
                write!(f, "'{}' precedes '{}' out of order", before, after)
            }
            InvariantError::DuplicateKey { key } => write!(f, "duplicate key '{}'", key),
            InvariantError::PartitionRange {
                start,
                end,
                expected_start,
                expected_end,
            } => {
                write!(
                    f,
                    "partition node covers [{}, {}], expected [{}, {}]",
                    start, end, expected_start, expected_end
                )
            }
            InvariantError::PartitionBounds { start, end } => {
                write!(
                    f,
                    "partition node [{}, {}] has min/max words that don't bound its slice",
                    start, end
                )
            }
            InvariantError::MissingWord { word } => write!(f, "'{}' is missing", word),
            InvariantError::EmptyWord => write!(f, "empty word stored where none is allowed"),
            InvariantError::UnexpectedSuffix { suffix } => {
                write!(f, "'{}' is marked but is not a suffix of any word", suffix)
            }
            InvariantError::WordCountMismatch { claimed, actual } => {
                write!(f, "word count {} but {} words present", claimed, actual)
            }
            InvariantError::UnsortedResults { position } => {
                write!(f, "results not sorted and unique at position {}", position)
            }
        }
    }
}

impl std::error::Error for InvariantError {}

/// Check that `words` is strictly ascending (sorted, no repeats).
pub fn ensure_sorted_unique(words: &[String]) -> Result<(), InvariantError> {
    match words.windows(2).position(|pair| pair[0] >= pair[1]) {
        Some(i) => Err(InvariantError::UnsortedResults { position: i + 1 }),
        None => Ok(()),
    }
}
