// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Text blocks shared by `search`, `bench` and the interactive prompt.

use prefixdex::bench::{performance_table, rank_structures, single_test_table, Summary, TestResult};
use prefixdex::StructureKind;

use super::display::kind_label;

/// "Suggestions for prefix 'app'" followed by one line per structure.
pub fn suggestions(prefix: &str, results: &[TestResult]) -> String {
    let mut out = format!("Suggestions for prefix '{}'\n", prefix);
    for r in results {
        let mut line = r.suggestion_list.join(", ");
        if r.is_truncated() {
            line.push_str("...");
        }
        out.push_str(&format!("{}: {}\n", kind_label(r.kind), line));
    }
    out
}

pub fn ranking(heading: &str, ranked: &[StructureKind]) -> String {
    let mut out = format!("{}\n", heading);
    for (i, kind) in ranked.iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", i + 1, kind_label(*kind)));
    }
    out
}

/// Suggestions, the per-prefix table, and the ranking.
pub fn single_test(prefix: &str, results: &[TestResult], ranking_heading: &str) -> String {
    let mut out = suggestions(prefix, results);
    out.push_str(&single_test_table(prefix, results));
    out.push('\n');
    out.push_str(&ranking(ranking_heading, &rank_structures(results)));
    out
}

/// The benchmark table and the overall ranking.
pub fn benchmark(summaries: &[Summary]) -> String {
    let mut out = performance_table("Benchmark Results", summaries);
    out.push('\n');
    out.push_str(&ranking("Efficiency Ranking:", &rank_structures(summaries)));
    out
}
