// tests/package_list.rs

//! Integration tests for package-list construction
//!
//! These exercise the resolution core end-to-end against synthetic index
//! snapshots: reader, resolver, and list builder together, the way the
//! fetch command drives them.

use pkgrab::index::{build_package_list, IndexReader};
use pkgrab::Error;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

fn record_line(name: &str, version: &str, size: u64, deps: &[&str]) -> String {
    let deps_json: Vec<String> = deps
        .iter()
        .map(|d| format!(r#""{d}":{{"origin":"misc/{d}","version":"1.0"}}"#))
        .collect();
    format!(
        r#"{{"name":"{name}","version":"{version}","pkgsize":{size},"deps":{{{}}},"comment":"test package {name}"}}"#,
        deps_json.join(",")
    )
}

fn write_index(dir: &TempDir, lines: &[String]) -> PathBuf {
    let path = dir.path().join("pkgdb.yaml");
    let mut file = File::create(&path).unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    path
}

#[test]
fn test_explicit_request_with_dependency() {
    let dir = TempDir::new().unwrap();
    let path = write_index(
        &dir,
        &[
            record_line("A", "1.0", 100, &["B"]),
            record_line("B", "2.1", 50, &[]),
        ],
    );
    let mut reader = IndexReader::open(path).unwrap();

    let list = build_package_list(&mut reader, &["A".to_string()], true, false).unwrap();

    let summary: Vec<(&str, u64)> = list
        .packages
        .iter()
        .map(|p| (p.name.as_str(), p.size))
        .collect();
    assert_eq!(summary, [("A", 100), ("B", 50)]);
    assert_eq!(list.total_size, 150);
}

#[test]
fn test_missing_dependency_does_not_abort() {
    let dir = TempDir::new().unwrap();
    let path = write_index(&dir, &[record_line("A", "1.0", 10, &["C"])]);
    let mut reader = IndexReader::open(path).unwrap();

    let list = build_package_list(&mut reader, &["A".to_string()], true, false).unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list.packages[0].name, "A");
    assert_eq!(list.total_size, 10);
}

#[test]
fn test_missing_explicit_package_is_fatal() {
    let dir = TempDir::new().unwrap();
    let path = write_index(&dir, &[record_line("A", "1.0", 10, &[])]);
    let mut reader = IndexReader::open(path).unwrap();

    let err = build_package_list(&mut reader, &["Z".to_string()], true, false).unwrap_err();
    assert!(
        matches!(err, Error::PackageNotFound(ref name) if name == "Z"),
        "expected PackageNotFound for Z, got {err:?}"
    );
}

#[test]
fn test_full_index_mode() {
    let dir = TempDir::new().unwrap();
    let path = write_index(
        &dir,
        &[
            record_line("gamma", "1", 7, &["alpha"]),
            record_line("alpha", "1", 3, &[]),
            record_line("beta", "1", 5, &[]),
        ],
    );
    let mut reader = IndexReader::open(path).unwrap();

    let list = build_package_list(&mut reader, &[], false, true).unwrap();

    let names: Vec<&str> = list.packages.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["alpha", "beta", "gamma"], "sorted by name");
    assert_eq!(list.total_size, 15, "aggregate is the sum of all three");
}

#[test]
fn test_empty_request_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_index(&dir, &[record_line("A", "1.0", 10, &[])]);
    let mut reader = IndexReader::open(path).unwrap();

    let err = build_package_list(&mut reader, &[], false, false).unwrap_err();
    assert!(matches!(err, Error::EmptyRequest));
}

#[test]
fn test_diamond_and_cycle_graph() {
    // top -> {left, right}; left -> shared; right -> shared;
    // shared -> top closes a cycle over the whole graph
    let dir = TempDir::new().unwrap();
    let path = write_index(
        &dir,
        &[
            record_line("top", "1", 1, &["left", "right"]),
            record_line("left", "1", 2, &["shared"]),
            record_line("right", "1", 4, &["shared"]),
            record_line("shared", "1", 8, &["top"]),
        ],
    );
    let mut reader = IndexReader::open(path).unwrap();

    let list = build_package_list(&mut reader, &["top".to_string()], true, false).unwrap();

    let names: Vec<&str> = list.packages.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["left", "right", "shared", "top"]);
    assert_eq!(list.total_size, 15, "shared counted exactly once");
}

#[test]
fn test_resolution_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let lines = [
        record_line("x", "1", 11, &["y", "z"]),
        record_line("y", "1", 13, &["z"]),
        record_line("z", "1", 17, &[]),
    ];
    let path = write_index(&dir, &lines);

    let roots = ["x".to_string(), "y".to_string()];
    let mut first_reader = IndexReader::open(&path).unwrap();
    let first = build_package_list(&mut first_reader, &roots, true, false).unwrap();
    let mut second_reader = IndexReader::open(&path).unwrap();
    let second = build_package_list(&mut second_reader, &roots, true, false).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.total_size, 41);
}

#[test]
fn test_no_duplicate_names_in_any_mode() {
    let dir = TempDir::new().unwrap();
    let path = write_index(
        &dir,
        &[
            record_line("a", "1", 1, &["b"]),
            record_line("b", "1", 2, &["a"]),
        ],
    );

    for (names, deps, all) in [
        (vec!["a".to_string(), "b".to_string(), "a".to_string()], true, false),
        (vec![], false, true),
    ] {
        let mut reader = IndexReader::open(&path).unwrap();
        let list = build_package_list(&mut reader, &names, deps, all).unwrap();
        let mut seen = std::collections::HashSet::new();
        for package in &list.packages {
            assert!(
                seen.insert(package.name.clone()),
                "duplicate name {} in output",
                package.name
            );
        }
    }
}

#[test]
fn test_missing_index_file() {
    let dir = TempDir::new().unwrap();
    let err = IndexReader::open(dir.path().join("pkgdb.yaml")).unwrap_err();
    assert!(matches!(err, Error::IndexUnavailable(_)));
    assert!(
        err.to_string().contains("pkgrab update"),
        "error should direct the user to the update command"
    );
}
