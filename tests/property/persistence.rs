//! Blob encode/decode: answers survive persistence, corruption never panics.

use crate::common::{build_all, synthetic_corpus, SAMPLE, UNICODE};
use prefixdex::binary::{from_bytes, to_bytes, BlobFooter};
use prefixdex::{AnyIndex, PrefixIndex, StructureKind};
use proptest::prelude::*;

/// Rewrite the trailing CRC so a mutated blob reaches the structural decoder.
fn reseal(blob: &mut [u8]) {
    let body = blob.len() - BlobFooter::SIZE;
    let crc = BlobFooter::compute_crc32(&blob[..body]);
    blob[body..body + 4].copy_from_slice(&crc.to_le_bytes());
}

fn assert_same_answers(a: &AnyIndex, b: &AnyIndex, prefixes: &[&str]) {
    assert_eq!(a.kind(), b.kind());
    assert_eq!(a.len(), b.len());
    assert_eq!(a.node_count(), b.node_count());
    for p in prefixes {
        assert_eq!(a.search(p), b.search(p), "{} on {:?}", a.kind(), p);
    }
}

#[test]
fn unicode_corpus_survives() {
    for index in build_all(&UNICODE) {
        let decoded = from_bytes(&to_bytes(&index).unwrap()).unwrap();
        assert_same_answers(&index, &decoded, &["", "caf", "ü", "తె", "x"]);
    }
}

#[test]
fn empty_indexes_survive() {
    for kind in StructureKind::ALL {
        let index = AnyIndex::new(kind);
        let decoded = from_bytes(&to_bytes(&index).unwrap()).unwrap();
        assert!(decoded.is_empty());
        assert_eq!(decoded.kind(), kind);
    }
}

#[test]
fn synthetic_corpus_survives() {
    let corpus = synthetic_corpus(1_500, 7);
    for index in build_all(&corpus) {
        let decoded = from_bytes(&to_bytes(&index).unwrap()).unwrap();
        assert_same_answers(&index, &decoded, &["", "a", "ka", "tor"]);
    }
}

#[test]
fn decoded_index_accepts_more_inserts() {
    for index in build_all(&SAMPLE) {
        let mut decoded = from_bytes(&to_bytes(&index).unwrap()).unwrap();
        decoded.insert("apricot");
        assert_eq!(decoded.search("apr"), vec!["apricot"]);
        assert!(decoded.verify().is_ok());
    }
}

/// Char-trie depth is the longest word (the longest suffix for the suffix
/// trie). Building, encoding, decoding and dropping all have to survive a
/// chain deeper than any sane call stack, here on a 2 MiB test thread.
#[test]
fn words_thousands_of_chars_long_roundtrip() {
    let flat = "a".repeat(5_001);
    let periodic = format!("{}c", "ab".repeat(2_600));
    let corpus = [flat.as_str(), periodic.as_str(), "apple"];

    for index in build_all(&corpus) {
        let blob = to_bytes(&index).unwrap();
        let decoded = from_bytes(&blob).unwrap();
        assert_same_answers(&index, &decoded, &["", "a", "aa", "ab", "abab", "apple", "b"]);
        assert_eq!(decoded.search(&flat[..4_000]), vec![flat.clone()]);
        assert_eq!(decoded.search(&periodic[..5_000]), vec![periodic.clone()]);

        let copy = decoded.clone();
        drop(decoded);
        assert_eq!(copy.search("ab").len(), 1);
        drop(copy);
        drop(index);
    }
}

#[test]
fn deep_suffix_trie_answers_substrings_after_reload() {
    let word = format!("{}z", "q".repeat(6_000));
    let index = AnyIndex::build(StructureKind::SuffixTree, &[word.as_str()]);
    let decoded = match from_bytes(&to_bytes(&index).unwrap()).unwrap() {
        AnyIndex::Suffix(suffix) => suffix,
        other => panic!("decoded a {}", other.kind()),
    };
    assert!(decoded.contains_substring(&"q".repeat(5_999)));
    assert!(decoded.contains_substring("qz"));
    assert!(!decoded.contains_substring("zq"));
}

#[test]
fn every_truncation_is_rejected() {
    for index in build_all(&SAMPLE) {
        let blob = to_bytes(&index).unwrap();
        for len in 0..blob.len() {
            assert!(from_bytes(&blob[..len]).is_err(), "{} len {}", index.kind(), len);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Decoding an encoded index answers every prefix identically.
    #[test]
    fn prop_roundtrip_answers_match(
        words in prop::collection::vec("[a-e]{1,6}", 0..60),
        prefix in "[a-e]{0,3}",
    ) {
        for index in build_all(&words) {
            let decoded = from_bytes(&to_bytes(&index).unwrap()).unwrap();
            prop_assert_eq!(decoded.kind(), index.kind());
            prop_assert_eq!(decoded.search(&prefix), index.search(&prefix));
            prop_assert_eq!(decoded.node_count(), index.node_count());
        }
    }

    /// A flipped byte without a matching CRC is always caught.
    #[test]
    fn prop_flipped_byte_is_rejected(
        words in prop::collection::vec("[a-e]{1,5}", 1..20),
        pos in any::<prop::sample::Index>(),
        mask in 1u8..=255,
    ) {
        for index in build_all(&words) {
            let mut blob = to_bytes(&index).unwrap();
            let i = pos.index(blob.len());
            blob[i] ^= mask;
            prop_assert!(from_bytes(&blob).is_err());
        }
    }

    /// With the CRC recomputed, arbitrary byte damage still never panics, and
    /// whatever decodes passes its invariant check.
    #[test]
    fn prop_resealed_corruption_never_panics(
        words in prop::collection::vec("[a-e]{1,5}", 1..20),
        edits in prop::collection::vec((any::<prop::sample::Index>(), any::<u8>()), 1..4),
    ) {
        for index in build_all(&words) {
            let mut blob = to_bytes(&index).unwrap();
            let body = blob.len() - BlobFooter::SIZE;
            for (pos, byte) in &edits {
                let i = pos.index(body);
                blob[i] = *byte;
            }
            reseal(&mut blob);
            if let Ok(decoded) = from_bytes(&blob) {
                prop_assert!(decoded.verify().is_ok());
            }
        }
    }

    /// Random garbage is never mistaken for a blob.
    #[test]
    fn prop_garbage_is_rejected(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        prop_assert!(from_bytes(&bytes).is_err());
    }
}
