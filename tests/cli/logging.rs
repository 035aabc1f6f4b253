use crate::cli::support::{cegate, write_manifest};
use predicates::prelude::*;
use tempfile::tempdir;

// ============================================================================
// Logging tests
// ============================================================================

#[test]
fn test_log_level_debug_shows_debug_messages() {
    let dir = tempdir().unwrap();

    cegate()
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env_remove("CEGATE_LOG")
        .args(["--log-level", "debug", "history"])
        .assert()
        .success()
        .stderr(predicate::str::contains("parse_args"));
}

#[test]
fn test_default_level_hides_debug_messages() {
    let dir = tempdir().unwrap();

    cegate()
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env_remove("CEGATE_LOG")
        .arg("history")
        .assert()
        .success()
        .stderr(predicate::str::contains("parse_args").not());
}

#[test]
fn test_verbose_logs_core_events() {
    let dir = tempdir().unwrap();
    write_manifest(dir.path(), "m1.yaml", "m1", "1.0");

    cegate()
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env_remove("CEGATE_LOG")
        .args(["--verbose", "run", "m1.yaml"])
        .assert()
        .success()
        .stderr(predicate::str::contains("history_saved"));
}

#[test]
fn test_missing_manifest_logged_as_warning() {
    let dir = tempdir().unwrap();

    cegate()
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env_remove("CEGATE_LOG")
        .args(["run", "nope.yaml"])
        .assert()
        .success()
        .stderr(predicate::str::contains("manifest does not exist"));
}

#[test]
fn test_log_json_output() {
    let dir = tempdir().unwrap();

    cegate()
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env_remove("CEGATE_LOG")
        .args(["--log-json", "--log-level", "debug", "history"])
        .assert()
        .success()
        .stderr(predicate::str::contains("\"level\":\"DEBUG\""));
}
