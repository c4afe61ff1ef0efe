//! Corpus files on disk through to search results.

use crate::common::{assert_agree, build_all};
use prefixdex::corpus::SAMPLE_CORPUS;
use prefixdex::{calculate_accuracy, load_corpus, prefixes_for_testing, PrefixIndex};
use std::io::Write;

fn corpus_file(text: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}

#[test]
fn file_words_are_searchable_everywhere() {
    let file = corpus_file("program\nprogress\n\n  project  \ncompile\nprogram\n");
    let corpus = load_corpus(file.path()).unwrap();
    assert_eq!(corpus.len(), 5);

    let indexes = build_all(&corpus);
    assert_eq!(assert_agree(&indexes, "pro"), vec!["program", "progress", "project"]);
    assert_eq!(assert_agree(&indexes, "progr"), vec!["program", "progress"]);
    assert_eq!(assert_agree(&indexes, "com"), vec!["compile"]);
}

#[test]
fn duplicated_lines_do_not_lower_accuracy() {
    let file = corpus_file("apple\napple\napply\n");
    let corpus = load_corpus(file.path()).unwrap();
    let indexes = build_all(&corpus);
    for index in &indexes {
        let acc = calculate_accuracy(&index.search("app"), "app", &corpus);
        assert_eq!(acc.percent, 100.0, "{}", index.kind());
        assert_eq!(acc.total, 2);
    }
}

#[test]
fn missing_file_uses_the_sample() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = load_corpus(&dir.path().join("absent.txt")).unwrap();
    assert_eq!(corpus, SAMPLE_CORPUS.to_vec());
    assert_eq!(prefixes_for_testing(&corpus, 6), vec!["app"]);
}

#[test]
fn crlf_line_endings_are_trimmed() {
    let file = corpus_file("start\r\nstatus\r\ninteger\r\n");
    let corpus = load_corpus(file.path()).unwrap();
    assert_eq!(corpus, vec!["start", "status", "integer"]);
    assert_eq!(prefixes_for_testing(&corpus, 6), vec!["sta", "int"]);
}

#[test]
fn non_utf8_file_is_an_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&[0x61, 0xff, 0xfe, 0x0a]).unwrap();
    assert!(load_corpus(file.path()).is_err());
}
