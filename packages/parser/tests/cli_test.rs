//! Command-line tests for the `iati-parser` binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn iati_parser() -> Command {
    Command::cargo_bin("iati-parser").unwrap()
}

#[test]
fn test_inspect_summary() {
    iati_parser()
        .arg("inspect")
        .arg(fixture_path("default_currency.xml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("47045-ARM-202-G05-H-00"))
        .stdout(predicate::str::contains("Budgets: 6"));
}

#[test]
fn test_inspect_json_one_object_per_activity() {
    let output = iati_parser()
        .args(["inspect", "--format", "json"])
        .arg(fixture_path("missing_dates.xml"))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output).unwrap();
    let ids: Vec<String> = stdout
        .lines()
        .map(|line| {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            value["iati_identifier"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(ids, vec!["GB-CHC-272465-679", "GB-CHC-272465-680"]);
}

#[test]
fn test_inspect_yaml_multiple_files() {
    iati_parser()
        .args(["inspect", "--format", "yaml"])
        .arg(fixture_path("transaction_ref.xml"))
        .arg(fixture_path("iati_activity_JP.xml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("iati_identifier: GB-1-201242-101"))
        .stdout(predicate::str::contains("---\n"))
        .stdout(predicate::str::contains("iati_identifier: JP-8-2011000125"));
}

#[test]
fn test_inspect_latin1_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("latin1.xml");
    let mut bytes = b"<iati-activities><iati-activity><iati-identifier>FR-3-1</iati-identifier><title>Coop\xe9ration</title></iati-activity></iati-activities>".to_vec();
    bytes.push(b'\n');
    fs::write(&path, bytes).unwrap();

    iati_parser()
        .args(["inspect", "--format", "json", "--encoding", "latin1"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Coopération"));
}

#[test]
fn test_skipped_activities_are_reported() {
    iati_parser()
        .arg("inspect")
        .arg(fixture_path("mixed_quality.xml"))
        .env("RUST_LOG", "warn")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 skipped"))
        .stderr(predicate::str::contains("XM-DAC-41114-2"));
}

#[test]
fn test_missing_file_fails() {
    let dir = TempDir::new().unwrap();

    iati_parser()
        .arg("inspect")
        .arg(dir.path().join("absent.xml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_malformed_file_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.xml");
    fs::write(&path, "<iati-activities><iati-activity>").unwrap();

    iati_parser()
        .arg("inspect")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("XML parsing failed"));
}

#[test]
fn test_unknown_encoding_fails() {
    iati_parser()
        .args(["inspect", "--encoding", "ebcdic"])
        .arg(fixture_path("default_currency.xml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported character encoding"));
}

#[test]
fn test_size_limit() {
    iati_parser()
        .args(["inspect", "--max-size", "64"])
        .arg(fixture_path("default_currency.xml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("limit is 64 bytes"));
}

#[test]
fn test_policy_table() {
    iati_parser()
        .arg("policy")
        .assert()
        .success()
        .stdout(predicate::str::contains("TransactionValueAmount"))
        .stdout(predicate::str::contains("Propagate"));
}
