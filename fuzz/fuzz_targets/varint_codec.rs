// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for varint (LEB128) encoding/decoding.
//!
//! Every length and index in a blob is a varint. If decode panics on
//! malformed input, every section built on top breaks.

#![no_main]

use libfuzzer_sys::fuzz_target;
use prefixdex::binary::{decode_varint, encode_varint, MAX_VARINT_BYTES};

fuzz_target!(|data: &[u8]| {
    let Ok((value, consumed)) = decode_varint(data) else {
        return;
    };

    assert!(consumed >= 1 && consumed <= data.len());
    assert!(consumed <= MAX_VARINT_BYTES, "varint took {consumed} bytes");

    let mut reencoded = Vec::new();
    encode_varint(value, &mut reencoded);
    let (redecoded, reconsumed) =
        decode_varint(&reencoded).expect("re-encoded varint should decode");
    assert_eq!(value, redecoded);
    assert_eq!(reconsumed, reencoded.len());
    // Canonical form is never longer than what we were handed
    assert!(reencoded.len() <= consumed);
});
