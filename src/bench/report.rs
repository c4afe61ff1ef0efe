// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Ranking and report output: CSV, JSON, and plain-text tables.
//!
//! # Efficiency score
//!
//! ```text
//! score = 0.5 * accuracy
//!       + 0.3 * 100 / (time_ms + 1e-6)
//!       + 0.1 * 100 / (memory_kb + 1e-6)
//!       + 0.1 * suggestions
//! ```
//!
//! Time dominates in practice: a search that takes a microsecond scores in
//! the tens of thousands. Ties keep report order.

use std::fs;
use std::path::Path;

use super::{Summary, TestResult};
use crate::types::StructureKind;

const EPSILON: f64 = 1e-6;

const CSV_HEADERS: [&str; 9] = [
    "Data Structure",
    "Avg Time (ms)",
    "Avg Accuracy (%)",
    "Avg Memory (KB)",
    "Avg Suggestions",
    "Build Time (ms)",
    "Search Time (ms)",
    "Time Complexity",
    "Space Complexity",
];

const RULE_WIDTH: usize = 60;

/// The four numbers a ranking looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub time_ms: f64,
    pub accuracy: f64,
    pub memory_kb: f64,
    pub suggestions: f64,
}

/// Anything that can be ranked: single-test rows and benchmark summaries.
pub trait Ranked {
    fn kind(&self) -> StructureKind;
    fn metrics(&self) -> Metrics;
}

impl Ranked for TestResult {
    fn kind(&self) -> StructureKind {
        self.kind
    }

    fn metrics(&self) -> Metrics {
        Metrics {
            time_ms: self.time_ms,
            accuracy: self.accuracy.percent,
            memory_kb: self.memory_kb,
            suggestions: self.suggestions as f64,
        }
    }
}

impl Ranked for Summary {
    fn kind(&self) -> StructureKind {
        self.kind
    }

    fn metrics(&self) -> Metrics {
        Metrics {
            time_ms: self.avg_time,
            accuracy: self.avg_accuracy,
            memory_kb: self.avg_memory,
            suggestions: self.avg_suggestions,
        }
    }
}

pub fn efficiency_score(m: &Metrics) -> f64 {
    0.5 * m.accuracy
        + 0.3 * 100.0 / (m.time_ms + EPSILON)
        + 0.1 * 100.0 / (m.memory_kb + EPSILON)
        + 0.1 * m.suggestions
}

/// Structures by descending efficiency score.
pub fn rank_structures<R: Ranked>(rows: &[R]) -> Vec<StructureKind> {
    let mut scored: Vec<(StructureKind, f64)> = rows
        .iter()
        .map(|r| (r.kind(), efficiency_score(&r.metrics())))
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.into_iter().map(|(kind, _)| kind).collect()
}

// ============================================================================
// CSV / JSON
// ============================================================================

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// CSV text with a header row and one row per summary.
pub fn summary_csv(summaries: &[Summary]) -> String {
    let mut out = CSV_HEADERS.map(csv_field).join(",");
    out.push_str("\r\n");
    for s in summaries {
        let row = [
            s.kind.name().to_string(),
            format!("{:.3}", s.avg_time),
            format!("{:.1}", s.avg_accuracy),
            format!("{:.1}", s.avg_memory),
            format!("{:.1}", s.avg_suggestions),
            format!("{:.3}", s.build_time),
            format!("{:.3}", s.search_time),
            s.time_complexity.to_string(),
            s.space_complexity.to_string(),
        ];
        let fields: Vec<String> = row.iter().map(|f| csv_field(f)).collect();
        out.push_str(&fields.join(","));
        out.push_str("\r\n");
    }
    out
}

pub fn write_csv(summaries: &[Summary], path: &Path) -> Result<(), String> {
    fs::write(path, summary_csv(summaries))
        .map_err(|e| format!("Failed to write {}: {}", path.display(), e))
}

/// Pretty JSON array of summaries, scalability points included.
pub fn summary_json(summaries: &[Summary]) -> Result<String, String> {
    serde_json::to_string_pretty(summaries).map_err(|e| format!("Failed to serialize summary: {}", e))
}

pub fn write_json(summaries: &[Summary], path: &Path) -> Result<(), String> {
    let json = summary_json(summaries)?;
    fs::write(path, json).map_err(|e| format!("Failed to write {}: {}", path.display(), e))
}

// ============================================================================
// TABLES
// ============================================================================

fn table_header(out: &mut String, title: &str, columns: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    out.push_str(&format!("\n{rule}\nPerformance Summary for '{title}'\n{rule}\n"));
    out.push_str(columns);
    out.push('\n');
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');
}

/// Fixed-width table for one prefix.
pub fn single_test_table(prefix: &str, results: &[TestResult]) -> String {
    let mut out = String::new();
    table_header(
        &mut out,
        prefix,
        &format!(
            "{:<15} {:<15} {:<12} {:<12} {:<12}",
            "Structure", "Time (ms)", "Accuracy (%)", "Memory (KB)", "Suggestions"
        ),
    );
    for r in results {
        out.push_str(&format!(
            "{:<15} {:<15.6} {:<12.1} {:<12.1} {:<12}\n",
            r.kind.name(),
            r.time_ms,
            r.accuracy.percent,
            r.memory_kb,
            r.suggestions
        ));
    }
    out.push_str(&"=".repeat(RULE_WIDTH));
    out
}

/// Fixed-width table for a full benchmark.
pub fn performance_table(title: &str, summaries: &[Summary]) -> String {
    let mut out = String::new();
    table_header(
        &mut out,
        title,
        &format!(
            "{:<15} {:<10} {:<12} {:<12} {:<12} {:<11} {:<11}",
            "Structure",
            "Time (ms)",
            "Accuracy (%)",
            "Memory (KB)",
            "Suggestions",
            "Build (ms)",
            "Search (ms)"
        ),
    );
    for s in summaries {
        out.push_str(&format!(
            "{:<15} {:<10.3} {:<12.1} {:<12.1} {:<12.0} {:<11.3} {:<11.3}\n",
            s.kind.name(),
            s.avg_time,
            s.avg_accuracy,
            s.avg_memory,
            s.avg_suggestions,
            s.build_time,
            s.search_time
        ));
    }
    out.push_str(&"=".repeat(RULE_WIDTH));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bench::ScalePoint;

    fn summary(kind: StructureKind, avg_time: f64, avg_memory: f64) -> Summary {
        let complexity = kind.complexity();
        Summary {
            kind,
            avg_time,
            avg_accuracy: 100.0,
            avg_memory,
            avg_suggestions: 3.0,
            build_time: 1.23456,
            search_time: 0.0421,
            scalability: vec![ScalePoint {
                size: 4,
                build_time: 0.5,
                memory: avg_memory,
            }],
            time_complexity: complexity.time,
            space_complexity: complexity.space,
        }
    }

    #[test]
    fn faster_structure_ranks_first() {
        let rows = vec![
            summary(StructureKind::Trie, 1.0, 10.0),
            summary(StructureKind::AvlTree, 0.01, 10.0),
        ];
        assert_eq!(
            rank_structures(&rows),
            vec![StructureKind::AvlTree, StructureKind::Trie]
        );
    }

    #[test]
    fn score_follows_the_weights() {
        let m = Metrics {
            time_ms: 1.0,
            accuracy: 100.0,
            memory_kb: 10.0,
            suggestions: 3.0,
        };
        // 50 + 30 + 1 + 0.3, give or take epsilon
        assert!((efficiency_score(&m) - 81.3).abs() < 1e-3);
    }

    #[test]
    fn csv_uses_fixed_decimals() {
        let csv = summary_csv(&[summary(StructureKind::SegmentTree, 0.12345, 1.26)]);
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some(CSV_HEADERS.join(",").as_str()));
        assert_eq!(
            lines.next(),
            Some("SegmentTree,0.123,100.0,1.3,3.0,1.235,0.042,O(log n),O(n)")
        );
    }

    #[test]
    fn csv_quotes_commas() {
        assert_eq!(csv_field("O(n, m)"), "\"O(n, m)\"");
        assert_eq!(csv_field("plain"), "plain");
    }

    #[test]
    fn json_carries_scalability() {
        let json = summary_json(&[summary(StructureKind::AvlTree, 0.1, 1.0)]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["kind"], "AVLTree");
        assert_eq!(value[0]["scalability"][0]["size"], 4);
    }

    #[test]
    fn table_lists_every_row() {
        let table = performance_table(
            "Benchmark Results",
            &[
                summary(StructureKind::Trie, 0.1, 1.0),
                summary(StructureKind::SuffixTree, 0.2, 2.0),
            ],
        );
        assert!(table.contains("Performance Summary for 'Benchmark Results'"));
        assert!(table.lines().any(|l| l.starts_with("Trie ")));
        assert!(table.lines().any(|l| l.starts_with("SuffixTree ")));
    }
}
