use crate::cli::support::{cegate, history_path, read_history, write_manifest, write_raw_manifest};
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

// ============================================================================
// Run command tests
// ============================================================================

#[test]
fn test_run_without_manifests_is_noop() {
    let dir = tempdir().unwrap();

    cegate()
        .current_dir(dir.path())
        .arg("run")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "No manifest paths provided. Nothing to do.",
        ));

    assert!(!history_path(dir.path()).exists());
}

#[test]
fn test_run_underscore_fields_keep_distinct_reports() {
    let dir = tempdir().unwrap();
    write_manifest(dir.path(), "first.yaml", "credit_risk", "1.0");
    write_manifest(dir.path(), "second.yaml", "credit", "risk_1.0");

    cegate()
        .current_dir(dir.path())
        .args(["run", "first.yaml", "second.yaml"])
        .assert()
        .success();

    let history = read_history(dir.path());
    let first = history["credit_risk::1.0::p1"]["report_path"].as_str().unwrap();
    let second = history["credit::risk_1.0::p1"]["report_path"].as_str().unwrap();
    assert_ne!(first, second);
    assert!(dir.path().join("reports/credit__risk_1.0_p1_report.html").exists());
    assert!(dir.path().join("reports/credit_risk__1.0_p1_report.html").exists());
}

#[test]
fn test_run_rejects_path_like_model_id() {
    let dir = tempdir().unwrap();
    let nested = dir.path().join("sub");
    fs::create_dir_all(&nested).unwrap();
    write_raw_manifest(
        &nested,
        "escape.yaml",
        "model_id: \"../../escaped\"\nversion: \"1.0\"\nevaluation_profile: p1\n",
    );

    cegate()
        .current_dir(&nested)
        .args(["run", "escape.yaml"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[ERROR]"));

    assert!(!dir.path().join("escaped_1.0_p1_report.html").exists());
    assert!(!nested.join("reports").exists());
}

#[test]
fn test_run_passing_manifest() {
    let dir = tempdir().unwrap();
    write_manifest(dir.path(), "m1.yaml", "m1", "1.0");

    cegate()
        .current_dir(dir.path())
        .args(["run", "m1.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Evaluating manifest:"))
        .stdout(predicate::str::contains("[PASS] m1::1.0::p1"));

    let history = read_history(dir.path());
    assert_eq!(history["m1::1.0::p1"]["status"], "pass");
    assert_eq!(history["m1::1.0::p1"]["reasons"], serde_json::json!([]));
    assert!(dir.path().join("reports/m1_1.0_p1_metrics.json").exists());
    assert!(dir.path().join("reports/m1_1.0_p1_report.html").exists());
}

#[test]
fn test_run_failing_manifest_exits_one_with_reasons() {
    let dir = tempdir().unwrap();
    write_manifest(dir.path(), "m1.yaml", "m1", "1.1");

    cegate()
        .current_dir(dir.path())
        .args(["run", "m1.yaml"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[FAIL] m1::1.1::p1"))
        .stdout(predicate::str::contains(
            "  - overall_score 0.720 < min_overall_score 0.750",
        ))
        .stdout(predicate::str::contains(
            "  - group group_a score 0.680 < min_group_score 0.700",
        ));

    let history = read_history(dir.path());
    assert_eq!(history["m1::1.1::p1"]["status"], "failed_gate");
    assert_eq!(
        history["m1::1.1::p1"]["reasons"].as_array().unwrap().len(),
        2
    );
}

#[test]
fn test_second_run_skips_and_keeps_created_at() {
    let dir = tempdir().unwrap();
    write_manifest(dir.path(), "m1.yaml", "m1", "1.0");

    cegate()
        .current_dir(dir.path())
        .args(["run", "m1.yaml"])
        .assert()
        .success();
    let first = fs::read_to_string(history_path(dir.path())).unwrap();
    let created_at = read_history(dir.path())["m1::1.0::p1"]["created_at"].clone();

    cegate()
        .current_dir(dir.path())
        .args(["run", "m1.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Skipping: already have a successful CE run for m1::1.0::p1",
        ));

    assert_eq!(
        read_history(dir.path())["m1::1.0::p1"]["created_at"],
        created_at
    );
    assert_eq!(fs::read_to_string(history_path(dir.path())).unwrap(), first);
}

#[test]
fn test_missing_manifest_warns_and_continues() {
    let dir = tempdir().unwrap();
    write_manifest(dir.path(), "m1.yaml", "m1", "1.0");

    cegate()
        .current_dir(dir.path())
        .args(["run", "nope.yaml", "m1.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("WARNING: manifest does not exist:"))
        .stdout(predicate::str::contains("[PASS] m1::1.0::p1"));
}

#[test]
fn test_batch_with_one_failure_writes_everything() {
    let dir = tempdir().unwrap();
    write_manifest(dir.path(), "a.yaml", "a", "1.0");
    write_manifest(dir.path(), "b.yaml", "b", "1.1");
    write_manifest(dir.path(), "c.yaml", "c", "2.0");

    cegate()
        .current_dir(dir.path())
        .args(["run", "a.yaml", "b.yaml", "c.yaml"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[PASS] a::1.0::p1"))
        .stdout(predicate::str::contains("[FAIL] b::1.1::p1"))
        .stdout(predicate::str::contains("[PASS] c::2.0::p1"))
        .stderr(predicate::str::contains("1 gate failure(s)"));

    let history = read_history(dir.path());
    assert_eq!(history.as_object().unwrap().len(), 3);
    for stem in ["a_1.0_p1", "b_1.1_p1", "c_2.0_p1"] {
        assert!(dir
            .path()
            .join(format!("reports/{stem}_report.html"))
            .exists());
    }
}

#[test]
fn test_malformed_manifest_reported_and_batch_continues() {
    let dir = tempdir().unwrap();
    write_raw_manifest(dir.path(), "bad.yaml", "model_id: m1\nevaluation_profile: p1\n");
    write_manifest(dir.path(), "good.yaml", "g", "1.0");

    cegate()
        .current_dir(dir.path())
        .args(["run", "bad.yaml", "good.yaml"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[ERROR]"))
        .stdout(predicate::str::contains("[PASS] g::1.0::p1"));

    let history = read_history(dir.path());
    assert_eq!(history.as_object().unwrap().len(), 1);
}

#[test]
fn test_corrupt_history_aborts_with_data_error() {
    let dir = tempdir().unwrap();
    write_manifest(dir.path(), "m1.yaml", "m1", "1.0");
    fs::create_dir_all(dir.path().join("ce_history")).unwrap();
    fs::write(history_path(dir.path()), "{\"truncated\": ").unwrap();

    cegate()
        .current_dir(dir.path())
        .args(["run", "m1.yaml"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("corrupt history store"));

    assert_eq!(
        fs::read_to_string(history_path(dir.path())).unwrap(),
        "{\"truncated\": "
    );
    assert!(!dir.path().join("reports").exists());
}

#[test]
fn test_empty_history_file_is_accepted() {
    let dir = tempdir().unwrap();
    write_manifest(dir.path(), "m1.yaml", "m1", "1.0");
    fs::create_dir_all(dir.path().join("ce_history")).unwrap();
    fs::write(history_path(dir.path()), "").unwrap();

    cegate()
        .current_dir(dir.path())
        .args(["run", "m1.yaml"])
        .assert()
        .success();

    assert_eq!(read_history(dir.path())["m1::1.0::p1"]["status"], "pass");
}

#[test]
fn test_root_and_path_overrides() {
    let dir = tempdir().unwrap();
    write_manifest(dir.path(), "m1.yaml", "m1", "1.0");

    cegate()
        .args(["--root"])
        .arg(dir.path())
        .args(["--history", "state/h.json", "run", "m1.yaml", "--reports-dir", "out"])
        .assert()
        .success();

    assert!(dir.path().join("state/h.json").exists());
    assert!(dir.path().join("out/m1_1.0_p1_report.html").exists());
}

#[test]
fn test_config_file_sets_locations() {
    let dir = tempdir().unwrap();
    write_manifest(dir.path(), "m1.yaml", "m1", "1.0");
    fs::write(
        dir.path().join("cegate.toml"),
        "history_path = \"hist/history.json\"\nreports_dir = \"artifacts\"\n",
    )
    .unwrap();

    cegate()
        .current_dir(dir.path())
        .args(["run", "m1.yaml"])
        .assert()
        .success();

    assert!(dir.path().join("hist/history.json").exists());
    assert!(dir.path().join("artifacts/m1_1.0_p1_metrics.json").exists());
}

#[test]
fn test_metrics_dir_provider() {
    let dir = tempdir().unwrap();
    write_manifest(dir.path(), "m1.yaml", "m1", "1.1");
    fs::create_dir_all(dir.path().join("metrics")).unwrap();
    fs::write(
        dir.path().join("metrics/m1_1.1_p1.json"),
        r#"{"overall_score": 0.9, "group_scores": {"group_a": 0.8, "group_b": 0.65}}"#,
    )
    .unwrap();

    cegate()
        .current_dir(dir.path())
        .args(["run", "m1.yaml", "--metrics-dir", "metrics"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "  - group group_b score 0.650 < min_group_score 0.700",
        ))
        .stdout(predicate::str::contains("overall_score").not());
}

#[test]
fn test_json_format_summary() {
    let dir = tempdir().unwrap();
    write_manifest(dir.path(), "m1.yaml", "m1", "1.0");

    let output = cegate()
        .current_dir(dir.path())
        .args(["--format", "json", "run", "m1.yaml", "missing.yaml"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["passed"], true);
    assert_eq!(json["manifests"][0]["outcome"], "evaluated");
    assert_eq!(json["manifests"][0]["verdict"]["passed"], true);
    assert_eq!(json["manifests"][1]["outcome"], "missing");
}
