//! Cache directory behavior of `Comparator::initialize`.

use crate::common::{assert_all_valid, words, SAMPLE};
use prefixdex::bench::{Comparator, Origin};
use prefixdex::binary::{cache_file_name, load_structure, save_structure};
use prefixdex::{AnyIndex, PrefixIndex, StructureKind};
use std::fs;

fn origins(cmp: &Comparator) -> Vec<Origin> {
    cmp.origins().map(|(_, origin)| origin).collect()
}

#[test]
fn first_run_writes_one_file_per_structure() {
    let dir = tempfile::tempdir().unwrap();
    let cmp = Comparator::initialize(words(&SAMPLE), Some(dir.path())).unwrap();
    assert_eq!(origins(&cmp), vec![Origin::Built; 4]);

    let mut names: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(
        names,
        vec![
            "avltree_structure.pdex",
            "segmenttree_structure.pdex",
            "suffixtree_structure.pdex",
            "trie_structure.pdex",
        ]
    );
}

#[test]
fn second_run_loads_everything_from_cache() {
    let dir = tempfile::tempdir().unwrap();
    let first = Comparator::initialize(words(&SAMPLE), Some(dir.path())).unwrap();
    let second = Comparator::initialize(words(&SAMPLE), Some(dir.path())).unwrap();
    assert_eq!(origins(&second), vec![Origin::Cache; 4]);
    assert_all_valid(second.structures());

    for (a, b) in first.structures().iter().zip(second.structures()) {
        assert_eq!(a.kind(), b.kind());
        assert_eq!(a.search("app"), b.search("app"));
        assert_eq!(a.search(""), b.search(""));
    }
}

#[test]
fn cached_structures_win_over_a_changed_corpus() {
    let dir = tempfile::tempdir().unwrap();
    Comparator::initialize(words(&SAMPLE), Some(dir.path())).unwrap();
    let cmp = Comparator::initialize(words(&["zebra"]), Some(dir.path())).unwrap();
    let trie = cmp.structure(StructureKind::Trie).unwrap();
    assert_eq!(trie.search("app"), vec!["apple", "application", "apply"]);
    assert!(trie.search("zeb").is_empty());
}

#[test]
fn damaged_cache_file_is_rebuilt_and_rewritten() {
    let dir = tempfile::tempdir().unwrap();
    Comparator::initialize(words(&SAMPLE), Some(dir.path())).unwrap();
    let path = dir.path().join(cache_file_name(StructureKind::AvlTree));
    fs::write(&path, b"not a blob").unwrap();

    let cmp = Comparator::initialize(words(&SAMPLE), Some(dir.path())).unwrap();
    let by_kind: Vec<(StructureKind, Origin)> = cmp.origins().collect();
    assert_eq!(by_kind[1], (StructureKind::AvlTree, Origin::Built));
    assert_eq!(by_kind[0].1, Origin::Cache);

    let reloaded = load_structure(StructureKind::AvlTree, &path).unwrap().unwrap();
    assert_eq!(reloaded.search("apt"), vec!["aptitude"]);
}

#[test]
fn file_holding_another_kind_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(cache_file_name(StructureKind::Trie));
    save_structure(&AnyIndex::build(StructureKind::SuffixTree, &SAMPLE), &path).unwrap();
    assert!(load_structure(StructureKind::Trie, &path).is_err());
    assert!(load_structure(StructureKind::SuffixTree, &path).unwrap().is_some());
}

#[test]
fn absent_file_loads_as_none() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.pdex");
    assert!(load_structure(StructureKind::Trie, &path).unwrap().is_none());
}

#[test]
fn unwritable_cache_dir_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let not_a_dir = dir.path().join("file");
    fs::write(&not_a_dir, b"").unwrap();
    let err = Comparator::initialize(words(&SAMPLE), Some(&not_a_dir)).unwrap_err();
    assert!(err.contains("Failed to write cache"), "{err}");
}

#[test]
fn no_cache_dir_touches_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let cmp = Comparator::initialize(words(&SAMPLE), None).unwrap();
    assert_eq!(origins(&cmp), vec![Origin::Built; 4]);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}
