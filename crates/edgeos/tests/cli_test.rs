//! Integration tests for the `edgeos` CLI binary.
//!
//! These tests validate argument parsing, catalog queries, device inspection
//! and settings management, all against temporary files.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `edgeos` binary with env isolation.
///
/// Clears all `EDGEOS_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn edgeos_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("edgeos");
    cmd.env("HOME", "/tmp/edgeos-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/edgeos-cli-test-nonexistent")
        .env_remove("RUST_LOG");
    for (key, _) in std::env::vars_os() {
        if key.to_string_lossy().starts_with("EDGEOS_") {
            cmd.env_remove(key);
        }
    }
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn stdout_lines(cmd: &mut assert_cmd::Command) -> Vec<String> {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));
    String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(str::to_owned)
        .collect()
}

fn stdout_json(cmd: &mut assert_cmd::Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));
    serde_json::from_slice(&output.stdout).unwrap()
}

const DEVICES_JSON: &str = r#"[
  {
    "hostname": "laptop",
    "ip": "10.0.0.2",
    "mac": "AA:BB:CC:00:00:01",
    "domain": "lan",
    "is_leased": true,
    "received": { "direction": "received", "total": 1048576, "rate": 10.0, "last_activity": "2026-01-01T00:00:00Z" },
    "sent": { "direction": "sent", "total": 2048, "rate": 1.0, "last_activity": "2025-12-31T23:59:00Z" }
  },
  {
    "hostname": "phone",
    "ip": "10.0.0.3",
    "mac": "aa-bb-cc-00-00-02",
    "domain": null,
    "is_leased": false,
    "received": { "direction": "received", "total": 0, "rate": 0.0, "last_activity": "2025-12-31T23:50:00Z" },
    "sent": { "direction": "sent", "total": 0, "rate": 0.0, "last_activity": "1970-01-01T00:00:00Z" }
  }
]"#;

fn write_devices(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("devices.json");
    std::fs::write(&path, DEVICES_JSON).unwrap();
    path
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = edgeos_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    edgeos_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("EdgeOS")
            .and(predicate::str::contains("entities"))
            .and(predicate::str::contains("devices"))
            .and(predicate::str::contains("config")),
    );
}

#[test]
fn test_version_flag() {
    edgeos_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("edgeos"));
}

#[test]
fn test_completions_zsh() {
    edgeos_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_invalid_output_format() {
    let output = edgeos_cmd()
        .args(["--output", "invalid", "catalog"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("possible values"),
        "Expected error about invalid output format:\n{text}"
    );
}

// ── Catalog ─────────────────────────────────────────────────────────

#[test]
fn test_catalog_json_lists_every_descriptor() {
    let json = stdout_json(edgeos_cmd().args(["-o", "json", "catalog"]));
    let descriptors = json.as_array().unwrap();
    assert_eq!(descriptors.len(), 30);
    assert_eq!(descriptors[0]["key"], "cpu_usage");
    assert_eq!(descriptors[0]["platform"], "sensor");
    assert_eq!(descriptors[29]["key"], "device_monitored");
}

#[test]
fn test_platforms_in_first_seen_order() {
    let lines = stdout_lines(edgeos_cmd().args(["-o", "plain", "platforms"]));
    assert_eq!(
        lines,
        [
            "sensor",
            "binary_sensor",
            "switch",
            "number",
            "select",
            "device_tracker"
        ]
    );
}

#[test]
fn test_interface_status_switch_requires_admin() {
    let admin = stdout_lines(edgeos_cmd().args([
        "-o",
        "plain",
        "entities",
        "--platform",
        "switch",
        "--device-type",
        "interface",
        "--admin",
        "true",
    ]));
    assert_eq!(admin, ["interface_monitored", "interface_status"]);

    let unknown = stdout_lines(edgeos_cmd().args([
        "-o",
        "plain",
        "entities",
        "--platform",
        "switch",
        "--device-type",
        "interface",
    ]));
    assert_eq!(unknown, ["interface_monitored"]);
}

#[test]
fn test_interface_status_binary_sensor_for_non_admin_level() {
    let lines = stdout_lines(edgeos_cmd().args([
        "-o",
        "plain",
        "entities",
        "-p",
        "binary_sensor",
        "-t",
        "interface",
        "--user-level",
        "operator",
    ]));
    assert_eq!(lines, ["interface_connected", "interface_status"]);
}

#[test]
fn test_monitored_entities_follow_flag() {
    let monitored = stdout_lines(edgeos_cmd().args([
        "-o",
        "plain",
        "entities",
        "-p",
        "sensor",
        "-t",
        "device",
        "--monitored",
        "true",
    ]));
    assert_eq!(
        monitored,
        [
            "device_received_rate",
            "device_sent_rate",
            "device_received_traffic",
            "device_sent_traffic"
        ]
    );

    let output = edgeos_cmd()
        .args(["-o", "plain", "entities", "-p", "sensor", "-t", "device"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_monitored_flag_resolved_from_settings() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");

    edgeos_cmd()
        .arg("--config")
        .arg(&config)
        .args(["config", "monitor", "interface", "eth0", "on"])
        .assert()
        .success();

    let lines = stdout_lines(
        edgeos_cmd()
            .arg("--config")
            .arg(&config)
            .args(["-o", "plain", "entities", "-p", "sensor", "-t", "interface"])
            .args(["--item", "eth0"]),
    );
    assert_eq!(lines.len(), 10);

    let lines = stdout_lines(
        edgeos_cmd()
            .arg("--config")
            .arg(&config)
            .args(["-o", "plain", "entities", "-p", "sensor", "-t", "interface"])
            .args(["--item", "eth1"]),
    );
    assert!(lines.is_empty());
}

#[test]
fn test_unknown_platform_is_rejected() {
    edgeos_cmd()
        .args(["entities", "-p", "light", "-t", "device"])
        .assert()
        .failure()
        .code(2);
}

// ── Devices ─────────────────────────────────────────────────────────

#[test]
fn test_devices_inspect_reports_age_and_presence() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_devices(dir.path());

    let json = stdout_json(
        edgeos_cmd()
            .args(["-o", "json", "devices", "inspect", "--at", "2026-01-01T00:01:00Z"])
            .arg("--file")
            .arg(&file),
    );
    let devices = json.as_array().unwrap();
    assert_eq!(devices.len(), 2);

    assert_eq!(devices[0]["mac"], "aa:bb:cc:00:00:01");
    assert_eq!(devices[0]["received"]["total"], 1_048_576);
    assert_eq!(devices[0]["last_activity_age"], 60);
    assert_eq!(devices[0]["is_home"], true);

    assert_eq!(devices[1]["mac"], "aa:bb:cc:00:00:02");
    assert_eq!(devices[1]["last_activity_age"], 660);
    assert_eq!(devices[1]["is_home"], false);
}

#[test]
fn test_devices_inspect_simple_omits_counters() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_devices(dir.path());

    let json = stdout_json(
        edgeos_cmd()
            .args(["-o", "json", "devices", "inspect", "--simple", "--leased-only"])
            .arg("--file")
            .arg(&file),
    );
    let devices = json.as_array().unwrap();
    assert_eq!(devices.len(), 1);
    let device = devices[0].as_object().unwrap();
    assert_eq!(device["hostname"], "laptop");
    assert!(!device.contains_key("received"));
    assert!(!device.contains_key("sent"));
    assert!(device.contains_key("is_leased"));
}

#[test]
fn test_devices_table_uses_configured_unit() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_devices(dir.path());
    let config = dir.path().join("config.toml");

    edgeos_cmd()
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "unit", "megabytes"])
        .assert()
        .success();

    edgeos_cmd()
        .arg("--config")
        .arg(&config)
        .args(["--color", "never", "devices", "inspect", "--at", "2026-01-01T00:01:00Z"])
        .arg("--file")
        .arg(&file)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("1.000 MB")
                .and(predicate::str::contains("home"))
                .and(predicate::str::contains("away")),
        );
}

#[test]
fn test_devices_inspect_missing_file() {
    edgeos_cmd()
        .args(["devices", "inspect", "--file", "/tmp/edgeos-cli-test-nonexistent/devices.json"])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn test_devices_inspect_bad_timestamp() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_devices(dir.path());

    edgeos_cmd()
        .args(["devices", "inspect", "--at", "yesterday"])
        .arg("--file")
        .arg(&file)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("timestamp"));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_show_no_config() {
    // A missing file resolves to the default configuration.
    edgeos_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Consider away interval:   180s"));
}

#[test]
fn test_config_show_reports_broken_default_file() {
    let home = tempfile::tempdir().unwrap();
    let dir = home.path().join("edgeos");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.toml"), "[integration]\nunit = \"Bits\"\n").unwrap();

    edgeos_cmd()
        .env("XDG_CONFIG_HOME", home.path())
        .args(["config", "show"])
        .assert()
        .failure()
        .code(78);
}

#[test]
fn test_config_env_overrides_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "[integration]\nconsider_away_interval = 300\n").unwrap();

    let json = stdout_json(
        edgeos_cmd()
            .env("EDGEOS_INTEGRATION__UNIT", "Megabytes")
            .arg("--config")
            .arg(&config)
            .args(["-o", "json", "config", "show"]),
    );
    assert_eq!(json["integration"]["consider_away_interval"], 300);
    assert_eq!(json["integration"]["unit"], "Megabytes");
}

#[test]
fn test_config_path_honors_override() {
    edgeos_cmd()
        .args(["--config", "/tmp/edgeos-custom.toml", "config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/tmp/edgeos-custom.toml"));
}

#[test]
fn test_config_init_refuses_to_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");

    edgeos_cmd()
        .arg("--config")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .success();
    assert!(config.exists());

    edgeos_cmd()
        .arg("--config")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .failure()
        .code(2);

    edgeos_cmd()
        .arg("--config")
        .arg(&config)
        .args(["config", "init", "--force"])
        .assert()
        .success();
}

#[test]
fn test_config_set_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");

    edgeos_cmd()
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "consider_away_interval", "300"])
        .assert()
        .success();
    edgeos_cmd()
        .arg("--config")
        .arg(&config)
        .args(["config", "monitor", "device", "AA:BB:CC:00:00:01", "true"])
        .assert()
        .success();

    let json = stdout_json(
        edgeos_cmd()
            .arg("--config")
            .arg(&config)
            .args(["-o", "json", "config", "show"]),
    );
    assert_eq!(json["integration"]["consider_away_interval"], 300);
    assert_eq!(
        json["integration"]["monitored_devices"]["aa:bb:cc:00:00:01"],
        true
    );
}

#[test]
fn test_config_set_rejects_out_of_range_interval() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");

    edgeos_cmd()
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "update_api_interval", "601"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("update_api_interval"));
    assert!(!config.exists());
}

#[test]
fn test_config_set_unknown_key() {
    edgeos_cmd()
        .args(["--config", "/tmp/edgeos-cli-test-nonexistent/config.toml"])
        .args(["config", "set", "colour", "red"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("colour"));
}
