// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the front-coded vocabulary section.
//!
//! A shared-prefix length of 100 against a 3-byte predecessor, a suffix that
//! splits a UTF-8 sequence, a word count of four billion: all of these must
//! come back as `Err`.

#![no_main]

use libfuzzer_sys::fuzz_target;
use prefixdex::binary::{decode_vocabulary, encode_vocabulary};

fuzz_target!(|data: &[u8]| {
    let max_words = data.len().min(1000);

    for word_count in [0, 1, 5, 10, max_words, usize::MAX] {
        let Ok(vocab) = decode_vocabulary(data, word_count) else {
            continue;
        };
        assert_eq!(vocab.len(), word_count);

        let mut reencoded = Vec::new();
        encode_vocabulary(&vocab, &mut reencoded);
        let redecoded = decode_vocabulary(&reencoded, vocab.len())
            .expect("re-encoded vocabulary should decode");
        assert_eq!(vocab, redecoded);
    }
});
