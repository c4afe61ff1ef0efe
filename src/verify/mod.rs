// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The verification layer: invariant errors and runtime contracts.
//!
//! Two complementary approaches to catching bugs:
//!
//! 1. **`verify()` methods** on every index, returning `Result<(), InvariantError>`.
//!    They walk the whole structure and report the first broken invariant. The
//!    binary decoder runs them on every blob it loads, so a corrupted file is
//!    rejected instead of silently answering queries wrong.
//!
//! 2. **Runtime contracts** (`contracts`) that panic in debug builds when an
//!    invariant is violated after a mutation. Zero-cost in release, but catch
//!    algorithmic errors whenever tests run.

mod types;
pub mod contracts;

pub use types::*;
