// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Corpus loading and ground truth.
//!
//! A corpus is a text file with one word per line. Lines are trimmed and
//! blank lines dropped, nothing else: no lowercasing, no deduplication. The
//! indexes dedup on their own, and ground truth is computed over the raw
//! list so a duplicated word still counts once.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;

/// Used when the corpus file doesn't exist.
pub const SAMPLE_CORPUS: [&str; 4] = ["apple", "application", "apply", "aptitude"];

/// Prefixes tried by the benchmark, in order.
pub const COMMON_PREFIXES: [&str; 6] = ["pro", "com", "sta", "int", "app", "dat"];

/// Default number of benchmark prefixes.
pub const DEFAULT_PREFIX_COUNT: usize = 6;

/// Read a corpus file. A missing file falls back to [`SAMPLE_CORPUS`]; any
/// other I/O error (permissions, invalid UTF-8) is returned.
pub fn load_corpus(path: &Path) -> io::Result<Vec<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(parse_corpus(&text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Ok(SAMPLE_CORPUS.iter().map(|w| w.to_string()).collect())
        }
        Err(e) => Err(e),
    }
}

/// One word per line, trimmed, blanks skipped.
pub fn parse_corpus(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// The common prefixes that match at least one corpus word, at most `count`.
pub fn prefixes_for_testing(corpus: &[String], count: usize) -> Vec<String> {
    COMMON_PREFIXES
        .iter()
        .filter(|p| corpus.iter().any(|w| w.starts_with(**p)))
        .take(count)
        .map(|p| p.to_string())
        .collect()
}

/// How many of the true matches a structure returned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Accuracy {
    /// `correct / total * 100`, or 0.0 when nothing should match.
    pub percent: f64,
    pub correct: usize,
    pub total: usize,
}

/// Compare `suggestions` against the corpus words starting with `prefix`.
pub fn calculate_accuracy(suggestions: &[String], prefix: &str, corpus: &[String]) -> Accuracy {
    let ground_truth: HashSet<&str> = corpus
        .iter()
        .map(String::as_str)
        .filter(|w| w.starts_with(prefix))
        .collect();

    if ground_truth.is_empty() {
        return Accuracy {
            percent: 0.0,
            correct: 0,
            total: 0,
        };
    }

    let suggested: HashSet<&str> = suggestions.iter().map(String::as_str).collect();
    let correct = suggested.intersection(&ground_truth).count();

    Accuracy {
        percent: correct as f64 / ground_truth.len() as f64 * 100.0,
        correct,
        total: ground_truth.len(),
    }
}
