//! Full benchmark runs and their reports.

use crate::common::{synthetic_corpus, words, SAMPLE};
use prefixdex::bench::{
    rank_structures, summary_csv, write_csv, write_json, BenchConfig, Comparator,
};
use prefixdex::StructureKind;
use std::fs;

fn comparator(corpus: Vec<String>) -> Comparator {
    Comparator::initialize(corpus, None).unwrap()
}

#[test]
fn sample_benchmark_is_fully_accurate() {
    let cmp = comparator(words(&SAMPLE));
    let prefixes = cmp.default_prefixes();
    assert_eq!(prefixes, vec!["app"]);

    let summaries = cmp.run_benchmark(&prefixes, 2).unwrap();
    let kinds: Vec<StructureKind> = summaries.iter().map(|s| s.kind).collect();
    assert_eq!(kinds, StructureKind::ALL.to_vec());
    for s in &summaries {
        assert_eq!(s.avg_accuracy, 100.0, "{}", s.kind);
        assert_eq!(s.avg_suggestions, 3.0);
        assert!(s.avg_time >= 0.0 && s.build_time >= 0.0 && s.search_time >= 0.0);
        assert_eq!(s.time_complexity, s.kind.complexity().time);
    }
}

#[test]
fn scalability_points_are_clamped_to_the_corpus() {
    let corpus = synthetic_corpus(700, 3);
    let cmp = comparator(corpus.clone());
    let summaries = cmp.run_benchmark(&["a".to_string()], 1).unwrap();
    for s in &summaries {
        let sizes: Vec<usize> = s.scalability.iter().map(|p| p.size).collect();
        assert_eq!(sizes, vec![100, 500, 700, 700, 700], "{}", s.kind);
        let memory: Vec<f64> = s.scalability.iter().map(|p| p.memory).collect();
        assert!(memory.windows(2).all(|w| w[0] <= w[1]));
    }
}

#[test]
fn configured_sizes_and_prefixes_are_used() {
    let config = BenchConfig {
        prefixes: Some(vec!["ap".to_string(), "zz".to_string()]),
        runs: 1,
        corpus_sizes: vec![2],
        prefix_count: 6,
    };
    let cmp = comparator(words(&SAMPLE)).with_config(config);
    let prefixes = cmp.default_prefixes();
    assert_eq!(prefixes, vec!["ap", "zz"]);

    let summaries = cmp.run_benchmark(&prefixes, cmp.config().runs).unwrap();
    for s in &summaries {
        // "ap" scores 100, "zz" has no ground truth and scores 0
        assert_eq!(s.avg_accuracy, 50.0);
        assert_eq!(s.scalability.len(), 2);
        assert_eq!(s.scalability[0].size, 2);
    }
}

#[test]
fn empty_prefix_list_is_an_error() {
    let cmp = comparator(words(&["zebra"]));
    assert!(cmp.default_prefixes().is_empty());
    assert!(cmp.run_benchmark(&[], 3).is_err());
    assert!(cmp.run_benchmark(&["z".to_string()], 0).is_err());
}

#[test]
fn reports_are_written_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let cmp = comparator(words(&SAMPLE));
    let summaries = cmp.run_benchmark(&["app".to_string()], 1).unwrap();

    let csv_path = dir.path().join("benchmark_results.csv");
    write_csv(&summaries, &csv_path).unwrap();
    let csv = fs::read_to_string(&csv_path).unwrap();
    assert_eq!(csv, summary_csv(&summaries));
    assert_eq!(csv.lines().count(), 5);
    assert!(csv.starts_with("Data Structure,Avg Time (ms),Avg Accuracy (%)"));
    assert!(csv.lines().nth(1).unwrap().starts_with("Trie,"));

    let json_path = dir.path().join("summary.json");
    write_json(&summaries, &json_path).unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 4);
    assert_eq!(value[3]["kind"], "SuffixTree");
    assert_eq!(value[0]["avg_accuracy"], 100.0);
}

#[test]
fn ranking_covers_every_structure_once() {
    let cmp = comparator(synthetic_corpus(300, 11));
    let mut prefixes = cmp.default_prefixes();
    prefixes.push("a".to_string());
    let summaries = cmp.run_benchmark(&prefixes, 1).unwrap();
    let mut ranked = rank_structures(&summaries);
    assert_eq!(ranked.len(), 4);
    ranked.sort();
    assert_eq!(ranked, StructureKind::ALL.to_vec());
}

#[test]
fn single_test_reports_truncated_previews() {
    let corpus = synthetic_corpus(500, 5);
    let cmp = comparator(corpus.clone());
    for result in cmp.run_single_test("") {
        assert_eq!(result.accuracy.percent, 100.0);
        assert!(result.suggestion_list.len() <= 10);
        assert_eq!(result.is_truncated(), result.suggestions > 10);
    }
}
