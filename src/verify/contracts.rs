// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime contracts checked after mutations.
//!
//! These are debug-mode assertions:
//!
//! 1. **Zero-cost in release builds** (`debug_assert!` never evaluates its
//!    condition there)
//! 2. **Early failure detection** during development and in every test run
//!
//! # INVARIANTS (DO NOT REMOVE THESE CHECKS)
//!
//! | Contract Function        | Checked where                            |
//! |--------------------------|------------------------------------------|
//! | `check_sorted_unique`    | search output, suffix array backing      |
//! | `check_avl_invariant`    | after AVL insert / bulk insert           |
//! | `check_partition_sound`  | after every partition rebuild            |
//!
//! The AVL and partition checks walk the whole structure, O(n) per call.

use super::ensure_sorted_unique;
use crate::index::{BalancedOrderedIndex, BlockPartitionIndex};

/// Check that `words` is strictly ascending.
///
/// # Panics (debug builds only)
/// Panics at the first adjacent pair that is equal or descending.
#[inline]
pub fn check_sorted_unique(words: &[String]) {
    debug_assert!(
        ensure_sorted_unique(words).is_ok(),
        "Contract violation: sorted unique - {}",
        ensure_sorted_unique(words).err().map(|e| e.to_string()).unwrap_or_default()
    );
}

/// Check balance, heights and key order of an AVL index.
///
/// # Panics (debug builds only)
/// Panics with the first `InvariantError` found.
#[inline]
pub fn check_avl_invariant(index: &BalancedOrderedIndex) {
    debug_assert!(
        index.verify().is_ok(),
        "Contract violation: AVL invariant - {}",
        index.verify().err().map(|e| e.to_string()).unwrap_or_default()
    );
}

/// Check range coverage and min/max bounds of a partition index.
///
/// # Panics (debug builds only)
/// Panics with the first `InvariantError` found.
#[inline]
pub fn check_partition_sound(index: &BlockPartitionIndex) {
    debug_assert!(
        index.verify().is_ok(),
        "Contract violation: partition soundness - {}",
        index.verify().err().map(|e| e.to_string()).unwrap_or_default()
    );
}
