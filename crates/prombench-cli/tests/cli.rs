//! Startup failure tests for the `scaler` binary.
//!
//! Every case here fails before a Kubernetes client is created, so no
//! cluster is needed.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::str::contains;

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../tests/fixtures/manifests")
}

fn scaler() -> Command {
    let mut cmd = Command::cargo_bin("scaler").unwrap();
    cmd.env_remove("PROMBENCH_SCALER_CONFIG")
        .env_remove("PROMBENCH_LOG_FORMAT");
    cmd
}

#[test]
fn invalid_pattern_exits_non_zero() {
    scaler()
        .args(["scale", "-v", "NAMESPACE=scale", "-f"])
        .arg(fixtures())
        .args(["20", "1", "1s", "foo"])
        .assert()
        .code(2)
        .stderr(contains("invalid pattern: foo"));
}

#[test]
fn missing_interval_exits_non_zero() {
    scaler()
        .args(["scale", "-f"])
        .arg(fixtures())
        .args(["20", "1"])
        .assert()
        .code(2)
        .stderr(contains("missing required argument: interval"));
}

#[test]
fn undefined_template_variable_exits_non_zero() {
    scaler()
        .args(["scale", "-f"])
        .arg(fixtures())
        .args(["20", "1", "15m"])
        .assert()
        .code(2)
        .stderr(contains("undefined template variable NAMESPACE"));
}

#[test]
fn missing_manifest_path_exits_non_zero() {
    scaler()
        .args(["scale", "-f", "/nonexistent/fake-webserver.yaml", "20", "1", "15m"])
        .assert()
        .code(2)
        .stderr(contains("manifest path does not exist"));
}

#[test]
fn json_logs() {
    scaler()
        .args(["--log-format", "json", "scale", "-f"])
        .arg(fixtures())
        .args(["20", "1", "1s", "zigzag"])
        .assert()
        .code(2)
        .stderr(contains("\"level\":\"ERROR\""));
}
