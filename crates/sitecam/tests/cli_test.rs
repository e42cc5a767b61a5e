//! Integration tests for the `sitecam` CLI binary.
//!
//! Parsing, help, completions and config handling run without a backend;
//! the end-to-end tests point the binary at a wiremock server.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `sitecam` binary with env isolation.
///
/// Clears all `SITECAM_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn sitecam_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("sitecam");
    cmd.env("HOME", "/tmp/sitecam-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/sitecam-cli-test-nonexistent")
        .env_remove("SITECAM_CONFIG")
        .env_remove("SITECAM_PROFILE")
        .env_remove("SITECAM_BACKEND")
        .env_remove("SITECAM_COMPANY")
        .env_remove("SITECAM_OUTPUT")
        .env_remove("SITECAM_INSECURE")
        .env_remove("SITECAM_TIMEOUT")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

/// Same as [`sitecam_cmd`], with the config file at `config`.
fn sitecam_with_config(config: &Path) -> assert_cmd::Command {
    let mut cmd = sitecam_cmd();
    cmd.env("SITECAM_CONFIG", config);
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

/// Run a command off the async test thread so the mock server keeps serving.
async fn run(mut cmd: assert_cmd::Command) -> std::process::Output {
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

fn two_sites() -> serde_json::Value {
    json!({
        "A": [
            { "nome": "Portaria", "status": "ON" },
            { "nome": "Garagem", "status": "ON" },
            { "nome": "Hall", "status": "OFF" }
        ],
        "B": {
            "cameras": [
                { "nome": "Entrada", "status": "ON" },
                { "nome": "Fundos", "status": "ON" }
            ],
            "metadata": { "empresa_id": 2, "empresa_nome": "Acme" }
        }
    })
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = sitecam_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    sitecam_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("status")
            .and(predicate::str::contains("watch"))
            .and(predicate::str::contains("reports"))
            .and(predicate::str::contains("companies")),
    );
}

#[test]
fn test_version_flag() {
    sitecam_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sitecam"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    sitecam_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    sitecam_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_completions_fish() {
    sitecam_cmd()
        .args(["completions", "fish"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = sitecam_cmd().arg("foobar").output().unwrap();
    assert!(!output.status.success(), "Expected failure for invalid subcommand");
    let text = combined_output(&output);
    assert!(
        text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_status_without_backend() {
    let output = sitecam_cmd().arg("status").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(
        text.contains("No monitoring backend configured"),
        "Expected missing-backend error:\n{text}"
    );
}

#[test]
fn test_invalid_backend_url() {
    sitecam_cmd()
        .args(["--backend", "ftp://monitor", "status"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid value for backend"));
}

#[test]
fn test_invalid_output_format() {
    let output = sitecam_cmd()
        .args(["--output", "invalid", "status"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("possible values"),
        "Expected error about valid output formats:\n{text}"
    );
}

#[test]
fn test_unknown_profile() {
    sitecam_cmd()
        .args(["--profile", "work", "status"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Profile 'work' not found"));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_show_no_config() {
    // Falls back to the default config when no file exists.
    sitecam_cmd().args(["config", "show"]).assert().success();
}

#[test]
fn test_config_path_honors_override() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("sitecam.toml");
    sitecam_with_config(&file)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sitecam.toml"));
}

#[test]
fn test_config_init_then_profiles() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("nested").join("config.toml");

    sitecam_with_config(&file)
        .args(["--backend", "http://monitor.local:5000", "--company", "7", "config", "init"])
        .assert()
        .success();

    let written = std::fs::read_to_string(&file).unwrap();
    assert!(written.contains("backend = \"http://monitor.local:5000\""));
    assert!(written.contains("company = \"7\""));
    assert!(written.contains("default_profile = \"default\""));

    // A second init without --force must refuse.
    sitecam_with_config(&file)
        .args(["--backend", "http://other", "config", "init"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"));

    sitecam_with_config(&file)
        .args(["config", "profiles"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default *"));

    sitecam_with_config(&file)
        .args(["config", "set", "poll_interval", "120"])
        .assert()
        .success();
    let written = std::fs::read_to_string(&file).unwrap();
    assert!(written.contains("poll_interval = 120"));
}

#[test]
fn test_config_init_requires_backend() {
    let dir = tempfile::tempdir().unwrap();
    sitecam_with_config(&dir.path().join("config.toml"))
        .args(["config", "init"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("backend"));
}

// ── Against a mock backend ──────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_status_json_ranks_sites() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(two_sites()))
        .mount(&server)
        .await;

    let mut cmd = sitecam_cmd();
    cmd.args(["--backend", &server.uri(), "-o", "json", "status"]);
    let output = run(cmd).await;
    assert!(output.status.success(), "{}", combined_output(&output));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["summary"]["counts"]["total"], 5);
    assert_eq!(value["summary"]["counts"]["online"], 4);
    assert_eq!(value["sites"][0]["site"]["name"], "A");
    assert_eq!(value["sites"][1]["site"]["name"], "B");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_status_company_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(two_sites()))
        .mount(&server)
        .await;

    let mut cmd = sitecam_cmd();
    cmd.args(["--backend", &server.uri(), "--company", "2", "-o", "plain", "status"]);
    let output = run(cmd).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "B");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_status_severity_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(two_sites()))
        .mount(&server)
        .await;

    // A has 1 of 3 offline (critical), B has none
    let mut cmd = sitecam_cmd();
    cmd.args(["--backend", &server.uri(), "-o", "plain", "status", "--severity", "critical"]);
    let output = run(cmd).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "A");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_status_table_shows_summary() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(two_sites()))
        .mount(&server)
        .await;

    let mut cmd = sitecam_cmd();
    cmd.args(["--backend", &server.uri(), "status", "--offline-only"]);
    let output = run(cmd).await;
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "{}", combined_output(&output));
    assert!(stdout.contains("2 sites, 5 cameras: 4 online, 1 offline (80.0% online)"));
    assert!(stdout.contains("66.7%"));
    assert!(!stdout.contains("Entrada"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_site_not_found_exit_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status/Nowhere"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let mut cmd = sitecam_cmd();
    cmd.args(["--backend", &server.uri(), "site", "Nowhere"]);
    let output = run(cmd).await;
    assert_eq!(output.status.code(), Some(4), "{}", combined_output(&output));
    assert!(combined_output(&output).contains("site 'Nowhere' not found"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_backend_error_exit_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let mut cmd = sitecam_cmd();
    cmd.args(["--backend", &server.uri(), "status"]);
    let output = run(cmd).await;
    assert_eq!(output.status.code(), Some(1), "{}", combined_output(&output));
    assert!(combined_output(&output).contains("Unexpected response from backend"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_reports_require_company() {
    let server = MockServer::start().await;

    let mut cmd = sitecam_cmd();
    cmd.args(["--backend", &server.uri(), "reports", "sla"]);
    let output = run(cmd).await;
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("No company selected"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_sla_report_worst_first() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reports/sla"))
        .and(query_param("empresa_id", "2"))
        .and(query_param("days", "30"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "empresa_id": 2,
            "empresa_nome": "Acme",
            "periodo_dias": 30,
            "unidades": [
                { "cliente_nome": "Alto", "codigo_moni": "001", "total_cameras": 4,
                  "eventos_offline": 1, "eventos_online": 1, "uptime_percent": 99.5 },
                { "cliente_nome": "Baixo", "codigo_moni": "002", "total_cameras": 8,
                  "eventos_offline": 9, "eventos_online": 9, "uptime_percent": 88.0 }
            ]
        })))
        .mount(&server)
        .await;

    let mut cmd = sitecam_cmd();
    cmd.args([
        "--backend",
        &server.uri(),
        "--company",
        "2",
        "-o",
        "plain",
        "reports",
        "sla",
        "--days",
        "30",
    ]);
    let output = run(cmd).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "Baixo\nAlto");
}
