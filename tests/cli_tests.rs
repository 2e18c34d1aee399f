//! CLI behavior tests for the recuento binary
#![allow(deprecated)] // suppress assert_cmd::Command::cargo_bin deprecation in tests

use predicates::prelude::*;
use std::fs;
use std::path::Path;

/// A facts file with one accepted refcount and one rejected statistics
/// counter
const FACTS: &str = r#"[
  {
    "unit": "drivers/net/card.c",
    "declarations": [
      {"file": "drivers/net/card.h", "line": 22, "name": "refs",
       "type_name": "atomic_t", "enclosing_types": ["struct card"]},
      {"file": "drivers/net/card.h", "line": 23, "name": "rx_bytes",
       "type_name": "atomic64_t", "enclosing_types": ["struct card"]}
    ],
    "calls": [
      {"file": "drivers/net/card.c", "line": 100, "callee": "atomic_init",
       "args": [{"kind": "unary", "op": "addr_of",
                 "inner": {"kind": "member", "decl_file": "drivers/net/card.h",
                           "decl_line": 22, "member": "refs"}}]},
      {"file": "drivers/net/card.c", "line": 140, "callee": "atomic_inc",
       "args": [{"kind": "unary", "op": "addr_of",
                 "inner": {"kind": "member", "decl_file": "drivers/net/card.h",
                           "decl_line": 22, "member": "refs"}}]},
      {"file": "drivers/net/card.c", "line": 180, "callee": "atomic_dec",
       "args": [{"kind": "unary", "op": "addr_of",
                 "inner": {"kind": "member", "decl_file": "drivers/net/card.h",
                           "decl_line": 22, "member": "refs"}}]},
      {"file": "drivers/net/card.c", "line": 200, "callee": "atomic64_add",
       "args": [{"kind": "int_literal", "value": 64},
                {"kind": "unary", "op": "addr_of",
                 "inner": {"kind": "member", "decl_file": "drivers/net/card.h",
                           "decl_line": 23, "member": "rx_bytes"}}]}
    ]
  }
]"#;

fn write_facts(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("facts.json");
    fs::write(&path, FACTS).unwrap();
    path
}

#[test]
fn test_text_report_shows_verdicts() {
    let dir = tempfile::tempdir().unwrap();
    let facts = write_facts(dir.path());

    let mut cmd = assert_cmd::Command::cargo_bin("recuento").unwrap();
    cmd.arg(&facts)
        .assert()
        .success()
        .stdout(predicate::str::contains("drivers/net/card.h:22"))
        .stdout(predicate::str::contains("refcount"))
        .stdout(predicate::str::contains("rejected"))
        .stdout(predicate::str::contains("atomic_t: 1"))
        .stdout(predicate::str::contains("atomic64_t: 1"))
        .stdout(predicate::str::contains("2 candidates, 1 accepted"));
}

#[test]
fn test_json_report() {
    let dir = tempfile::tempdir().unwrap();
    let facts = write_facts(dir.path());

    let mut cmd = assert_cmd::Command::cargo_bin("recuento").unwrap();
    let output = cmd.arg("--format").arg("json").arg(&facts).output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["tool"], "recuento");
    assert_eq!(value["units_processed"], 1);
    assert_eq!(value["candidates"].as_array().unwrap().len(), 2);
    assert_eq!(value["candidates"][0]["accepted"], true);
    assert_eq!(value["candidates"][1]["accepted"], false);
}

#[test]
fn test_csv_report() {
    let dir = tempfile::tempdir().unwrap();
    let facts = write_facts(dir.path());

    let mut cmd = assert_cmd::Command::cargo_bin("recuento").unwrap();
    cmd.arg("--format")
        .arg("csv")
        .arg(&facts)
        .assert()
        .success()
        .stdout(predicate::str::contains("file,line,name,type,ops,verdict"))
        .stdout(predicate::str::contains(
            "drivers/net/card.h,22,refs,atomic_t,3,refcount",
        ));
}

#[test]
fn test_show_ops_prints_history() {
    let dir = tempfile::tempdir().unwrap();
    let facts = write_facts(dir.path());

    let mut cmd = assert_cmd::Command::cargo_bin("recuento").unwrap();
    cmd.arg("--show-ops")
        .arg(&facts)
        .assert()
        .success()
        .stdout(predicate::str::contains("[set(1), delta(+1), delta(-1)]"));
}

#[test]
fn test_categories_flag_restricts_candidates() {
    let dir = tempfile::tempdir().unwrap();
    let facts = write_facts(dir.path());

    let mut cmd = assert_cmd::Command::cargo_bin("recuento").unwrap();
    cmd.arg("--categories")
        .arg("atomic64_t")
        .arg(&facts)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 candidates"))
        .stdout(predicate::str::contains("atomic_t: 0"));
}

#[test]
fn test_include_filter_skips_units() {
    let dir = tempfile::tempdir().unwrap();
    let facts = write_facts(dir.path());

    let mut cmd = assert_cmd::Command::cargo_bin("recuento").unwrap();
    cmd.arg("--include")
        .arg("^fs/")
        .arg(&facts)
        .assert()
        .success()
        .stdout(predicate::str::contains("No candidate fields found."));
}

#[test]
fn test_log_dir_writes_per_file_logs_and_dedups() {
    let dir = tempfile::tempdir().unwrap();
    let facts = write_facts(dir.path());
    let log_dir = dir.path().join("log");

    let mut cmd = assert_cmd::Command::cargo_bin("recuento").unwrap();
    cmd.arg("--log-dir").arg(&log_dir).arg(&facts).assert().success();

    let log_file = log_dir.join("drivers_net_card.h.log");
    let contents = fs::read_to_string(&log_file).unwrap();
    assert!(contents.contains("Name: refs"));
    assert!(contents.contains("atomic_t: 1"));

    // second run over the same log dir: the unit is already seen, so no
    // candidates register
    let mut cmd = assert_cmd::Command::cargo_bin("recuento").unwrap();
    cmd.arg("--log-dir")
        .arg(&log_dir)
        .arg(&facts)
        .assert()
        .success()
        .stdout(predicate::str::contains("No candidate fields found."));
}

#[test]
fn test_missing_facts_file_fails() {
    let mut cmd = assert_cmd::Command::cargo_bin("recuento").unwrap();
    cmd.arg("/nonexistent/facts.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("facts"));
}

#[test]
fn test_malformed_facts_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{not json").unwrap();

    let mut cmd = assert_cmd::Command::cargo_bin("recuento").unwrap();
    cmd.arg(&path).assert().failure();
}

#[test]
fn test_invalid_category_fails() {
    let dir = tempfile::tempdir().unwrap();
    let facts = write_facts(dir.path());

    let mut cmd = assert_cmd::Command::cargo_bin("recuento").unwrap();
    cmd.arg("--categories")
        .arg("size_t")
        .arg(&facts)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown type category"));
}
