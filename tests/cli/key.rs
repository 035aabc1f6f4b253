use crate::cli::support::{cegate, write_manifest, write_raw_manifest};
use predicates::prelude::*;
use tempfile::tempdir;

// ============================================================================
// Key command tests
// ============================================================================

#[test]
fn test_key_prints_identity() {
    let dir = tempdir().unwrap();
    write_manifest(dir.path(), "m1.yaml", "m1", "1.0");

    cegate()
        .current_dir(dir.path())
        .args(["key", "m1.yaml"])
        .assert()
        .success()
        .stdout("m1::1.0::p1\n");
}

#[test]
fn test_key_json() {
    let dir = tempdir().unwrap();
    write_manifest(dir.path(), "m1.yaml", "m1", "1.0");

    let output = cegate()
        .current_dir(dir.path())
        .args(["--format", "json", "key", "m1.yaml"])
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["key"], "m1::1.0::p1");
    assert_eq!(json["gate"]["min_overall_score"], 0.75);
}

#[test]
fn test_key_rejects_separator_in_field() {
    let dir = tempdir().unwrap();
    write_raw_manifest(
        dir.path(),
        "bad.yaml",
        "model_id: \"a::b\"\nversion: v1\nevaluation_profile: p1\n",
    );

    cegate()
        .current_dir(dir.path())
        .args(["key", "bad.yaml"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("must not contain"));
}

#[test]
fn test_key_rejects_colon_at_field_edge() {
    let dir = tempdir().unwrap();
    write_raw_manifest(
        dir.path(),
        "bad.yaml",
        "model_id: \"a:\"\nversion: b\nevaluation_profile: p1\n",
    );

    cegate()
        .current_dir(dir.path())
        .args(["key", "bad.yaml"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("model_id must use only"));
}

#[test]
fn test_key_missing_manifest() {
    let dir = tempdir().unwrap();

    cegate()
        .current_dir(dir.path())
        .args(["key", "missing.yaml"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("manifest does not exist"));
}
