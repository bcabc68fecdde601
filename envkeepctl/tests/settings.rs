// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Envkeep Authors

//! Integration tests for the envkeepctl data commands.

#![allow(deprecated)] // cargo_bin deprecation — replacement API not yet stable

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;

/// Create a command that runs from a temporary directory where no config
/// files exist, ensuring predictable default behavior.
fn envkeepctl_in_clean_dir(tmpdir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("envkeepctl").unwrap(); //#[allow_ci]
    cmd.current_dir(tmpdir.path());
    cmd.env("HOME", tmpdir.path());
    cmd.env_remove("XDG_CONFIG_HOME");
    cmd.env_remove("ENVKEEP_STORE__FILE");
    cmd.env_remove("ENVKEEP_OUTPUT__FORMAT");
    cmd
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap() //#[allow_ci]
}

fn seed_env_file(tmpdir: &tempfile::TempDir, content: &str) -> String {
    let path = tmpdir.path().join(".env");
    std::fs::write(&path, content).unwrap(); //#[allow_ci]
    path.to_str().unwrap().to_string() //#[allow_ci]
}

#[test]
fn test_schema_outputs_catalogue() {
    let tmpdir = tempfile::tempdir().unwrap(); //#[allow_ci]
    let output = envkeepctl_in_clean_dir(&tmpdir)
        .arg("schema")
        .output()
        .unwrap(); //#[allow_ci]
    assert!(output.status.success());

    let schema = stdout_json(&output);
    let groups = schema.as_object().unwrap(); //#[allow_ci]
    assert_eq!(groups.len(), 13, "expected every catalogue group");

    // Definition order is preserved, starting with auth
    let first = groups.keys().next().unwrap(); //#[allow_ci]
    assert_eq!(first, "auth");
    assert_eq!(schema["auth"]["title"], "Authentication");
    assert_eq!(schema["auth"]["items"][0]["key"], "SECRET_KEY");
    assert_eq!(schema["auth"]["items"][0]["type"], "password");

    // Optional fields carry an explicit required: false
    let smtp_host = schema["smtp"]["items"]
        .as_array()
        .unwrap() //#[allow_ci]
        .iter()
        .find(|item| item["key"] == "SMTP_HOST")
        .unwrap(); //#[allow_ci]
    assert_eq!(smtp_host["required"], false);
}

#[test]
fn test_values_merges_file_over_defaults() {
    let tmpdir = tempfile::tempdir().unwrap(); //#[allow_ci]
    let file = seed_env_file(&tmpdir, "ADMIN_USER=alice\nSMTP_HOST=mail\n");

    let output = envkeepctl_in_clean_dir(&tmpdir)
        .args(["--file", &file, "values"])
        .output()
        .unwrap(); //#[allow_ci]
    assert!(output.status.success());

    let values = stdout_json(&output);
    assert_eq!(values["auth"]["ADMIN_USER"], "alice");
    assert_eq!(values["smtp"]["SMTP_HOST"], "mail");
    // Catalogue default fills in anything the file does not set
    assert_eq!(values["server"]["PYTHON_API_PORT"], "5000");
    // Password fields carry a configured signal beside the value
    assert_eq!(values["auth"]["SECRET_KEY_configured"], true);
    assert_eq!(values["smtp"]["SMTP_PASSWORD_configured"], false);
}

#[test]
fn test_values_group_filter() {
    let tmpdir = tempfile::tempdir().unwrap(); //#[allow_ci]
    let file = seed_env_file(&tmpdir, "ADMIN_USER=alice\n");

    let output = envkeepctl_in_clean_dir(&tmpdir)
        .args(["--file", &file, "values", "--group", "auth"])
        .output()
        .unwrap(); //#[allow_ci]
    assert!(output.status.success());

    let values = stdout_json(&output);
    let groups = values.as_object().unwrap(); //#[allow_ci]
    assert_eq!(groups.len(), 1, "only the requested group");
    assert_eq!(values["auth"]["ADMIN_USER"], "alice");
}

#[test]
fn test_values_unknown_group_is_a_usage_error() {
    let tmpdir = tempfile::tempdir().unwrap(); //#[allow_ci]
    envkeepctl_in_clean_dir(&tmpdir)
        .args(["values", "--group", "nonsense"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("USAGE_ERROR"));
}

#[test]
fn test_get_single_key() {
    let tmpdir = tempfile::tempdir().unwrap(); //#[allow_ci]
    let file = seed_env_file(&tmpdir, "SMTP_PORT=2525\n");

    let output = envkeepctl_in_clean_dir(&tmpdir)
        .args(["--file", &file, "get", "SMTP_PORT"])
        .output()
        .unwrap(); //#[allow_ci]
    assert!(output.status.success());

    let result = stdout_json(&output);
    assert_eq!(result["key"], "SMTP_PORT");
    assert_eq!(result["value"], "2525");
}

#[test]
fn test_set_preserves_comments_and_appends_new_keys() {
    let tmpdir = tempfile::tempdir().unwrap(); //#[allow_ci]
    let file = seed_env_file(
        &tmpdir,
        "# managed by hand\nADMIN_USER=alice\nLEGACY=1\n",
    );

    let output = envkeepctl_in_clean_dir(&tmpdir)
        .args([
            "--file",
            &file,
            "set",
            "ADMIN_USER=bob",
            "SMTP_HOST=mail.example.com",
        ])
        .output()
        .unwrap(); //#[allow_ci]
    assert!(output.status.success());

    let outcome = stdout_json(&output);
    assert_eq!(
        outcome["updated_keys"],
        serde_json::json!(["ADMIN_USER", "SMTP_HOST"])
    );
    assert_eq!(outcome["requires_restart"], true);

    let content = std::fs::read_to_string(Path::new(&file)).unwrap(); //#[allow_ci]
    assert_eq!(
        content,
        "# managed by hand\nADMIN_USER=bob\nLEGACY=1\n\n\
         # Added by envkeep\nSMTP_HOST=mail.example.com\n"
    );
}

#[test]
fn test_set_unknown_key_fails_without_touching_the_file() {
    let tmpdir = tempfile::tempdir().unwrap(); //#[allow_ci]
    let file = seed_env_file(&tmpdir, "ADMIN_USER=alice\n");

    envkeepctl_in_clean_dir(&tmpdir)
        .args(["--file", &file, "set", "NOT_A_KEY=1"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("USAGE_ERROR"));

    let content = std::fs::read_to_string(Path::new(&file)).unwrap(); //#[allow_ci]
    assert_eq!(content, "ADMIN_USER=alice\n");
}

#[test]
fn test_clear_skips_required_keys() {
    let tmpdir = tempfile::tempdir().unwrap(); //#[allow_ci]
    let file = seed_env_file(
        &tmpdir,
        "ADMIN_USER=alice\nSMTP_HOST=mail\n",
    );

    let output = envkeepctl_in_clean_dir(&tmpdir)
        .args(["--file", &file, "clear", "ADMIN_USER", "SMTP_HOST"])
        .output()
        .unwrap(); //#[allow_ci]
    assert!(output.status.success());

    let outcome = stdout_json(&output);
    assert_eq!(outcome["cleared"], serde_json::json!(["SMTP_HOST"]));
    assert_eq!(
        outcome["skipped_required"],
        serde_json::json!(["ADMIN_USER"])
    );

    let content = std::fs::read_to_string(Path::new(&file)).unwrap(); //#[allow_ci]
    assert!(content.contains("ADMIN_USER=alice\n"));
    assert!(content.contains("SMTP_HOST=\n"));
}

#[test]
fn test_table_format_renders_sections() {
    let tmpdir = tempfile::tempdir().unwrap(); //#[allow_ci]
    let file = seed_env_file(&tmpdir, "ADMIN_USER=alice\n");

    envkeepctl_in_clean_dir(&tmpdir)
        .args([
            "--file",
            &file,
            "--format",
            "table",
            "values",
            "--group",
            "auth",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("auth:"))
        .stdout(predicate::str::contains("ADMIN_USER: alice"));
}
