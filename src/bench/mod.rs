// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Benchmark driver: build all four structures, time them, compare them.
//!
//! The [`Comparator`] owns the corpus and one instance of every structure.
//! Each instance is its own allocation, so building them in parallel is safe
//! without any locking. Searches are always timed one at a time.
//!
//! # What gets measured
//!
//! | Metric        | How                                                   |
//! |---------------|-------------------------------------------------------|
//! | `avg_time`    | mean wall time of `search` over prefixes × runs      |
//! | `avg_accuracy`| mean share of ground-truth matches returned           |
//! | `avg_memory`  | mean `memory_estimate` (constant per structure)       |
//! | `build_time`  | one fresh `bulk_insert` of the whole corpus           |
//! | `search_time` | second, separate pass over prefixes × runs            |
//! | `scalability` | fresh builds over corpus prefixes of growing size     |
//!
//! Accuracy should always be 100% (or 0% when nothing matches). Anything
//! else means a structure is broken, which is exactly why it's measured.

pub mod config;
mod progress;
pub mod report;

pub use config::BenchConfig;
pub use report::{
    efficiency_score, performance_table, rank_structures, single_test_table, summary_json,
    summary_csv, write_csv, write_json, Metrics, Ranked,
};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;

use crate::binary::{self, cache_file_name};
use crate::corpus::{calculate_accuracy, prefixes_for_testing, Accuracy};
use crate::index::{AnyIndex, PrefixIndex};
use crate::types::StructureKind;
use progress::Progress;

/// Suggestions kept per structure in a single test.
pub const SUGGESTION_PREVIEW: usize = 10;

// ============================================================================
// RESULT TYPES
// ============================================================================

/// One timed search against one structure.
#[derive(Debug, Clone, Serialize)]
pub struct Measurement {
    pub kind: StructureKind,
    pub time_ms: f64,
    pub results: Vec<String>,
    pub memory_kb: f64,
}

/// One structure's answer to a single interactive prefix.
#[derive(Debug, Clone, Serialize)]
pub struct TestResult {
    pub kind: StructureKind,
    pub time_ms: f64,
    pub accuracy: Accuracy,
    pub memory_kb: f64,
    pub suggestions: usize,
    /// The first [`SUGGESTION_PREVIEW`] suggestions.
    pub suggestion_list: Vec<String>,
}

impl TestResult {
    /// More suggestions exist than the preview shows.
    pub fn is_truncated(&self) -> bool {
        self.suggestion_list.len() < self.suggestions
    }
}

/// Build time and memory at one corpus size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScalePoint {
    pub size: usize,
    pub build_time: f64,
    pub memory: f64,
}

/// One structure's row in the benchmark report.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub kind: StructureKind,
    pub avg_time: f64,
    pub avg_accuracy: f64,
    pub avg_memory: f64,
    pub avg_suggestions: f64,
    pub build_time: f64,
    pub search_time: f64,
    pub scalability: Vec<ScalePoint>,
    pub time_complexity: &'static str,
    pub space_complexity: &'static str,
}

/// Where an initialized structure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Origin {
    Cache,
    Built,
}

// ============================================================================
// HELPERS
// ============================================================================

fn time_ms<T>(f: impl FnOnce() -> T) -> (T, f64) {
    let start = Instant::now();
    let out = f();
    (out, start.elapsed().as_secs_f64() * 1000.0)
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Bulk-build each of `kinds` from `corpus`, one thread per structure.
#[cfg(feature = "parallel")]
fn build_all(kinds: &[StructureKind], corpus: &[String]) -> Vec<AnyIndex> {
    use rayon::prelude::*;

    kinds
        .par_iter()
        .map(|&kind| AnyIndex::build(kind, corpus))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn build_all(kinds: &[StructureKind], corpus: &[String]) -> Vec<AnyIndex> {
    kinds
        .iter()
        .map(|&kind| AnyIndex::build(kind, corpus))
        .collect()
}

/// A cache file that can't be read is reported and rebuilt, never fatal.
fn load_cached(kind: StructureKind, path: &Path) -> Option<AnyIndex> {
    match binary::load_structure(kind, path) {
        Ok(index) => index,
        Err(e) => {
            eprintln!("⚠️  Ignoring cache {}: {}", path.display(), e);
            None
        }
    }
}

// ============================================================================
// COMPARATOR
// ============================================================================

/// Owns the corpus and one instance of each structure, in [`StructureKind::ALL`] order.
#[derive(Debug, Clone)]
pub struct Comparator {
    corpus: Vec<String>,
    structures: Vec<AnyIndex>,
    origins: Vec<Origin>,
    config: BenchConfig,
    show_progress: bool,
}

impl Comparator {
    /// Load every structure from `cache_dir` when a valid cache file exists,
    /// otherwise bulk-build it and write the cache. `None` disables caching.
    pub fn initialize(corpus: Vec<String>, cache_dir: Option<&Path>) -> Result<Self, String> {
        let cache_paths: Vec<Option<PathBuf>> = StructureKind::ALL
            .iter()
            .map(|&kind| cache_dir.map(|dir| dir.join(cache_file_name(kind))))
            .collect();

        let cached: Vec<Option<AnyIndex>> = StructureKind::ALL
            .iter()
            .zip(&cache_paths)
            .map(|(&kind, path)| path.as_deref().and_then(|p| load_cached(kind, p)))
            .collect();

        let missing: Vec<StructureKind> = StructureKind::ALL
            .iter()
            .zip(&cached)
            .filter(|(_, slot)| slot.is_none())
            .map(|(&kind, _)| kind)
            .collect();
        let mut built = build_all(&missing, &corpus).into_iter();

        let mut structures = Vec::with_capacity(StructureKind::ALL.len());
        let mut origins = Vec::with_capacity(StructureKind::ALL.len());
        for ((&kind, slot), path) in StructureKind::ALL.iter().zip(cached).zip(&cache_paths) {
            match slot {
                Some(index) => {
                    structures.push(index);
                    origins.push(Origin::Cache);
                }
                None => {
                    let index = built
                        .next()
                        .unwrap_or_else(|| AnyIndex::build(kind, &corpus));
                    if let Some(path) = path {
                        binary::save_structure(&index, path).map_err(|e| {
                            format!("Failed to write cache {}: {}", path.display(), e)
                        })?;
                    }
                    structures.push(index);
                    origins.push(Origin::Built);
                }
            }
        }

        Ok(Self {
            corpus,
            structures,
            origins,
            config: BenchConfig::default(),
            show_progress: false,
        })
    }

    pub fn with_config(mut self, config: BenchConfig) -> Self {
        self.config = config;
        self
    }

    /// Draw indicatif progress bars during long runs.
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn corpus(&self) -> &[String] {
        &self.corpus
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    pub fn structures(&self) -> &[AnyIndex] {
        &self.structures
    }

    pub fn structure(&self, kind: StructureKind) -> Option<&AnyIndex> {
        self.structures.iter().find(|index| index.kind() == kind)
    }

    /// Where each structure came from, in report order.
    pub fn origins(&self) -> impl Iterator<Item = (StructureKind, Origin)> + '_ {
        self.structures
            .iter()
            .map(PrefixIndex::kind)
            .zip(self.origins.iter().copied())
    }

    /// The configured prefixes, or the common ones that match this corpus.
    pub fn default_prefixes(&self) -> Vec<String> {
        match &self.config.prefixes {
            Some(prefixes) => prefixes.clone(),
            None => prefixes_for_testing(&self.corpus, self.config.prefix_count),
        }
    }

    /// Time one `search` per structure.
    pub fn benchmark_search(&self, prefix: &str) -> Vec<Measurement> {
        self.structures
            .iter()
            .map(|index| {
                let (results, time_ms) = time_ms(|| index.search(prefix));
                Measurement {
                    kind: index.kind(),
                    time_ms,
                    results,
                    memory_kb: index.memory_estimate(),
                }
            })
            .collect()
    }

    /// Search every structure once and score it against ground truth.
    pub fn run_single_test(&self, prefix: &str) -> Vec<TestResult> {
        self.benchmark_search(prefix)
            .into_iter()
            .map(|m| TestResult {
                kind: m.kind,
                time_ms: m.time_ms,
                accuracy: calculate_accuracy(&m.results, prefix, &self.corpus),
                memory_kb: m.memory_kb,
                suggestions: m.results.len(),
                suggestion_list: m.results.into_iter().take(SUGGESTION_PREVIEW).collect(),
            })
            .collect()
    }

    /// The full benchmark: averaged searches, build times, a separate
    /// search-time pass and the scalability sweep.
    pub fn run_benchmark(&self, prefixes: &[String], runs: usize) -> Result<Vec<Summary>, String> {
        if prefixes.is_empty() {
            return Err("No prefixes to benchmark (none of the common prefixes match the corpus)".to_string());
        }
        if runs == 0 {
            return Err("runs must be at least 1".to_string());
        }

        let sizes = self.config.scalability_sizes(self.corpus.len());
        let progress = Progress::new(prefixes.len() * runs + 3, "Benchmark", self.show_progress);

        #[derive(Default)]
        struct Samples {
            time: Vec<f64>,
            accuracy: Vec<f64>,
            memory: Vec<f64>,
            suggestions: Vec<f64>,
        }
        let mut samples: BTreeMap<StructureKind, Samples> = BTreeMap::new();

        for prefix in prefixes {
            for _ in 0..runs {
                for m in self.benchmark_search(prefix) {
                    let accuracy = calculate_accuracy(&m.results, prefix, &self.corpus);
                    let entry = samples.entry(m.kind).or_default();
                    entry.time.push(m.time_ms);
                    entry.accuracy.push(accuracy.percent);
                    entry.memory.push(m.memory_kb);
                    entry.suggestions.push(m.results.len() as f64);
                }
                progress.step(prefix);
            }
        }

        let build_times = benchmark_build_time(&self.corpus);
        progress.step("build time");
        let search_times = benchmark_search_time(&self.structures, prefixes, runs);
        progress.step("search time");
        let mut scalability = simulate_scalability(&self.corpus, &sizes);
        progress.step("scalability");
        progress.finish("done");

        Ok(self
            .structures
            .iter()
            .map(|index| {
                let kind = index.kind();
                let s = samples.remove(&kind).unwrap_or_default();
                let complexity = index.complexity();
                Summary {
                    kind,
                    avg_time: mean(&s.time),
                    avg_accuracy: mean(&s.accuracy),
                    avg_memory: mean(&s.memory),
                    avg_suggestions: mean(&s.suggestions),
                    build_time: build_times.get(&kind).copied().unwrap_or(0.0),
                    search_time: search_times.get(&kind).copied().unwrap_or(0.0),
                    scalability: scalability.remove(&kind).unwrap_or_default(),
                    time_complexity: complexity.time,
                    space_complexity: complexity.space,
                }
            })
            .collect())
    }
}

// ============================================================================
// STANDALONE MEASUREMENTS
// ============================================================================

/// Wall time of one fresh bulk build per structure, sequential.
pub fn benchmark_build_time(corpus: &[String]) -> BTreeMap<StructureKind, f64> {
    StructureKind::ALL
        .iter()
        .map(|&kind| {
            let (_, ms) = time_ms(|| AnyIndex::build(kind, corpus));
            (kind, ms)
        })
        .collect()
}

/// Mean search time per structure over `prefixes × runs`.
pub fn benchmark_search_time(
    structures: &[AnyIndex],
    prefixes: &[String],
    runs: usize,
) -> BTreeMap<StructureKind, f64> {
    let mut times: BTreeMap<StructureKind, Vec<f64>> = BTreeMap::new();
    for prefix in prefixes {
        for _ in 0..runs {
            for index in structures {
                let (_, ms) = time_ms(|| index.search(prefix));
                times.entry(index.kind()).or_default().push(ms);
            }
        }
    }
    times.into_iter().map(|(kind, t)| (kind, mean(&t))).collect()
}

/// Fresh builds over the first `size` words for each size. Sizes beyond the
/// corpus are clamped, and the point reports the size actually used.
pub fn simulate_scalability(
    corpus: &[String],
    sizes: &[usize],
) -> BTreeMap<StructureKind, Vec<ScalePoint>> {
    let mut out: BTreeMap<StructureKind, Vec<ScalePoint>> = BTreeMap::new();
    for &size in sizes {
        let subset = &corpus[..size.min(corpus.len())];
        for kind in StructureKind::ALL {
            let (index, build_time) = time_ms(|| AnyIndex::build(kind, subset));
            out.entry(kind).or_default().push(ScalePoint {
                size: subset.len(),
                build_time,
                memory: index.memory_estimate(),
            });
        }
    }
    out
}
