// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Blob decoding under adversarial input.
//!
//! A cache file is read back from disk on every start. If someone swaps in
//! a crafted `.pdex`, the worst case should be a rebuild, not a crash. This
//! target feeds the decoder garbage: headers that lie about section sizes,
//! AVL keys pointing past the vocabulary, tries nested thousands deep.

#![no_main]

use libfuzzer_sys::fuzz_target;
use prefixdex::binary::{from_bytes, inspect, BlobFooter};
use prefixdex::PrefixIndex;

fuzz_target!(|data: &[u8]| {
    let _ = inspect(data);
    check(data);

    // Most inputs die at the CRC. Reseal a copy so the structural decoder
    // sees them too.
    if data.len() >= BlobFooter::SIZE {
        let mut resealed = data.to_vec();
        let body = resealed.len() - BlobFooter::SIZE;
        let crc = BlobFooter::compute_crc32(&resealed[..body]);
        resealed[body..body + 4].copy_from_slice(&crc.to_le_bytes());
        check(&resealed);
    }
});

fn check(bytes: &[u8]) {
    let Ok(index) = from_bytes(bytes) else {
        return;
    };

    // Anything that decodes already passed verify(); hold it to that.
    assert!(index.verify().is_ok(), "decoded blob fails verify()");

    let all = index.search("");
    assert_eq!(all.len(), index.len(), "search(\"\") misses words");
    assert!(all.windows(2).all(|w| w[0] < w[1]), "results not sorted/unique");

    for word in all.iter().take(16) {
        assert!(index.search(word).contains(word), "{word:?} not found by itself");
    }
}
