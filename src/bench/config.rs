// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Benchmark configuration, optionally read from a JSON file.
//!
//! ```json
//! { "prefixes": ["app", "ban"], "runs": 5, "corpus_sizes": [100, 1000], "prefix_count": 4 }
//! ```
//!
//! Every field is optional. The full corpus size is always appended to
//! `corpus_sizes` when the scalability sweep runs.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::corpus::DEFAULT_PREFIX_COUNT;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    /// Explicit prefixes. `None` picks them from the corpus.
    pub prefixes: Option<Vec<String>>,
    /// Repetitions per prefix.
    pub runs: usize,
    /// Corpus sizes for the scalability sweep (full size is added).
    pub corpus_sizes: Vec<usize>,
    /// How many common prefixes to pick when `prefixes` is unset.
    pub prefix_count: usize,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            prefixes: None,
            runs: 3,
            corpus_sizes: vec![100, 500, 1000, 2000],
            prefix_count: DEFAULT_PREFIX_COUNT,
        }
    }
}

impl BenchConfig {
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {}", path.display(), e))?;
        let config: BenchConfig = serde_json::from_str(&content)
            .map_err(|e| format!("Invalid config JSON in {}: {}", path.display(), e))?;
        if config.runs == 0 {
            return Err(format!("{}: runs must be at least 1", path.display()));
        }
        Ok(config)
    }

    /// Scalability sizes with the full corpus size appended.
    pub fn scalability_sizes(&self, corpus_len: usize) -> Vec<usize> {
        let mut sizes = self.corpus_sizes.clone();
        sizes.push(corpus_len);
        sizes
    }
}
