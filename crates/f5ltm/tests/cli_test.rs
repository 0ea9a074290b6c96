//! Integration tests for the `f5ltm` CLI binary.
//!
//! Argument parsing, help output, shell completions and error handling run
//! without an appliance; the end-to-end cases talk to a wiremock appliance.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `f5ltm` binary with env isolation.
///
/// Clears all `F5LTM_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn f5ltm_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("f5ltm");
    cmd.env("HOME", "/tmp/f5ltm-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/f5ltm-cli-test-nonexistent")
        .env_remove("RUST_LOG")
        .env_remove("F5LTM_BIGIP")
        .env_remove("F5LTM_PORT")
        .env_remove("F5LTM_USER")
        .env_remove("F5LTM_PASSWORD")
        .env_remove("F5LTM_PROFILE")
        .env_remove("F5LTM_OUTPUT")
        .env_remove("F5LTM_INSECURE")
        .env_remove("F5LTM_TIMEOUT");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = f5ltm_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    f5ltm_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("BIG-IP")
            .and(predicate::str::contains("nodes"))
            .and(predicate::str::contains("pools"))
            .and(predicate::str::contains("virtual-servers"))
            .and(predicate::str::contains("rules"))
            .and(predicate::str::contains("monitors")),
    );
}

#[test]
fn test_version_flag() {
    f5ltm_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("f5ltm"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    f5ltm_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    f5ltm_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = f5ltm_cmd().arg("foobar").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("foobar"), "Expected error naming the subcommand:\n{text}");
}

#[test]
fn test_nodes_list_without_appliance() {
    f5ltm_cmd()
        .args(["nodes", "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("appliance address").or(predicate::str::contains("--bigip")));
}

#[test]
fn test_unknown_profile() {
    f5ltm_cmd()
        .args(["--profile", "nope", "pools", "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("nope"));
}

#[test]
fn test_missing_user() {
    f5ltm_cmd()
        .args(["--bigip", "10.0.0.245", "version"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("credentials"));
}

#[test]
fn test_invalid_output_format() {
    let output = f5ltm_cmd()
        .args(["--output", "xml", "nodes", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("possible values"),
        "Expected error about valid output formats:\n{text}"
    );
}

#[test]
fn test_unreachable_appliance_exits_1() {
    f5ltm_cmd()
        .args([
            "--bigip",
            "http://127.0.0.1:9/",
            "--user",
            "admin",
            "--password",
            "x",
            "--timeout",
            "5",
            "version",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("127.0.0.1"));
}

#[test]
fn test_config_show_no_config() {
    f5ltm_cmd().args(["config", "show"]).assert().success();
}

#[cfg(target_os = "linux")]
#[test]
fn test_config_set_refuses_unreadable_config() {
    let home = tempfile::tempdir().unwrap();
    let dir = home.path().join("f5ltm");
    std::fs::create_dir_all(&dir).unwrap();
    let file = dir.join("config.toml");
    let stored = "[defaults]\ntimeout = \"soon\"\n\n[profiles.prod]\nhost = \"10.0.0.1\"\n";
    std::fs::write(&file, stored).unwrap();

    f5ltm_cmd()
        .env("XDG_CONFIG_HOME", home.path())
        .args(["config", "set", "host", "10.0.0.2"])
        .assert()
        .code(1);

    assert_eq!(std::fs::read_to_string(&file).unwrap(), stored);
}

// ── Subcommand help discovery ───────────────────────────────────────

#[test]
fn test_pools_subcommands_exist() {
    f5ltm_cmd()
        .args(["pools", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("list")
                .and(predicate::str::contains("dump"))
                .and(predicate::str::contains("apply"))
                .and(predicate::str::contains("delete")),
        );
}

#[test]
fn test_rules_are_read_only() {
    f5ltm_cmd()
        .args(["rules", "apply", "x.json"])
        .assert()
        .code(2);
}

#[test]
fn test_config_subcommands_exist() {
    f5ltm_cmd()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("init")
                .and(predicate::str::contains("show"))
                .and(predicate::str::contains("profiles"))
                .and(predicate::str::contains("set-password")),
        );
}

// ── Against a mock appliance ────────────────────────────────────────

const PORTAL: &str = "/iControl/iControlPortal.cgi";

fn envelope(soap_method: &str, inner: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<SOAP-ENV:Envelope xmlns:SOAP-ENV="http://schemas.xmlsoap.org/soap/envelope/">
<SOAP-ENV:Body>
<m:{soap_method}Response xmlns:m="urn:iControl">{inner}</m:{soap_method}Response>
</SOAP-ENV:Body>
</SOAP-ENV:Envelope>"#
    )
}

async fn mount(server: &MockServer, soap_method: &str, inner: &str) {
    Mock::given(method("POST"))
        .and(path(PORTAL))
        .and(body_string_contains(format!("<m:{soap_method} ")))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/xml; charset=utf-8")
                .set_body_string(envelope(soap_method, inner)),
        )
        .mount(server)
        .await;
}

async fn appliance(version: &str) -> MockServer {
    let server = MockServer::start().await;
    mount(&server, "get_version", &format!("<return>{version}</return>")).await;
    server
}

/// Run the binary against `server` off the async runtime.
async fn run_against(server: &MockServer, args: &[&str]) -> std::process::Output {
    let mut cmd = f5ltm_cmd();
    cmd.args(["--bigip", &format!("{}/", server.uri()), "--user", "admin", "--password", "s3cret"])
        .args(args);
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_version_command() {
    let server = appliance("BIG-IP_v11.4.0").await;

    let output = run_against(&server, &["--output", "plain", "version"]).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "11.4.0");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rules_dump_prints_code() {
    let server = appliance("BIG-IP_v11.4.0").await;
    mount(
        &server,
        "query_all_rules",
        "<return><item><rule_name>/Common/redirect</rule_name>\
         <rule_definition>\nwhen HTTP_REQUEST { HTTP::redirect https://[HTTP::host] }\n</rule_definition>\
         </item></return>",
    )
    .await;

    let output = run_against(&server, &["rules", "dump", "/Common/redirect"]).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim_end(),
        "when HTTP_REQUEST { HTTP::redirect https://[HTTP::host] }"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_dump_missing_node_fails() {
    let server = appliance("BIG-IP_v11.4.0").await;
    mount(&server, "get_list", "<return></return>").await;

    let output = run_against(&server, &["nodes", "dump", "10.9.9.9"]).await;

    assert_eq!(output.status.code(), Some(1));
    assert!(
        String::from_utf8_lossy(&output.stderr).contains("not found"),
        "{}",
        combined_output(&output)
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unparseable_version_fails() {
    let server = appliance("BIG-IP unknown").await;

    let output = run_against(&server, &["version"]).await;

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("BIG-IP unknown"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_pool_apply_creates_pool() {
    let server = appliance("BIG-IP_v11.4.0").await;
    mount(&server, "get_list", "<return></return>").await;
    Mock::given(method("POST"))
        .and(path(PORTAL))
        .and(body_string_contains("<m:create "))
        .and(body_string_contains("<item>/Common/WebPool</item>"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/xml; charset=utf-8")
                .set_body_string(envelope("create", "")),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount(&server, "set_monitor_association", "").await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("pool.json");
    std::fs::write(
        &file,
        r#"{
            "Name": "/Common/WebPool",
            "LoadBalancingMethod": "RoundRobin",
            "Members": [{ "Address": "10.1.1.5", "Port": 80 }],
            "Monitors": ["/Common/http"]
        }"#,
    )
    .unwrap();

    let output = run_against(&server, &["pools", "apply", file.to_str().unwrap()]).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(r#""Name": "/Common/WebPool""#), "{stderr}");
}
