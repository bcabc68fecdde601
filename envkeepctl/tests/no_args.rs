// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Envkeep Authors

//! Integration tests for envkeepctl no-argument behavior.

#![allow(deprecated)] // cargo_bin deprecation — replacement API not yet stable

use assert_cmd::Command;
use predicates::prelude::*;

/// Create a command that runs from a temporary directory where no config
/// files exist, ensuring predictable default behavior.
fn envkeepctl_in_clean_dir(tmpdir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("envkeepctl").unwrap(); //#[allow_ci]
    cmd.current_dir(tmpdir.path());
    // Point HOME to the temp dir so config search paths based on
    // ~/.config/envkeepctl/ won't find the user's real config files.
    cmd.env("HOME", tmpdir.path());
    cmd.env_remove("XDG_CONFIG_HOME");
    // Suppress env vars that might affect config loading
    cmd.env_remove("ENVKEEP_STORE__FILE");
    cmd.env_remove("ENVKEEP_OUTPUT__FORMAT");
    cmd
}

#[test]
fn test_no_args_exits_successfully() {
    let tmpdir = tempfile::tempdir().unwrap(); //#[allow_ci]
    envkeepctl_in_clean_dir(&tmpdir).assert().success();
}

#[test]
fn test_no_args_shows_store_summary() {
    let tmpdir = tempfile::tempdir().unwrap(); //#[allow_ci]
    let output = envkeepctl_in_clean_dir(&tmpdir).output().unwrap(); //#[allow_ci]

    let stderr = String::from_utf8_lossy(&output.stderr);
    // Store summary goes to stderr
    assert!(
        stderr.contains("Settings file:"),
        "Expected store summary with 'Settings file:' on stderr, got: {stderr}"
    );
    assert!(
        stderr.contains("Catalogue:"),
        "Expected store summary with 'Catalogue:' on stderr, got: {stderr}"
    );
    assert!(
        stderr.contains("(defaults)"),
        "Expected '(defaults)' since no config file exists, got: {stderr}"
    );
}

#[test]
fn test_no_args_shows_help_with_subcommands() {
    let tmpdir = tempfile::tempdir().unwrap(); //#[allow_ci]
    let output = envkeepctl_in_clean_dir(&tmpdir).output().unwrap(); //#[allow_ci]

    let stdout = String::from_utf8_lossy(&output.stdout);
    // clap help goes to stdout
    assert!(
        stdout.contains("Usage:"),
        "Expected 'Usage:' in help output on stdout, got: {stdout}"
    );
    // Dynamically generated subcommand list should include these
    assert!(
        stdout.contains("schema"),
        "Expected 'schema' subcommand in help output, got: {stdout}"
    );
    assert!(
        stdout.contains("values"),
        "Expected 'values' subcommand in help output, got: {stdout}"
    );
    assert!(
        stdout.contains("set"),
        "Expected 'set' subcommand in help output, got: {stdout}"
    );
}

#[test]
fn test_no_args_no_config_file_message() {
    let tmpdir = tempfile::tempdir().unwrap(); //#[allow_ci]
    let output = envkeepctl_in_clean_dir(&tmpdir).output().unwrap(); //#[allow_ci]

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("No configuration file found"),
        "Expected 'No configuration file found' message, got: {stderr}"
    );
}

#[test]
fn test_help_flag_works() {
    let tmpdir = tempfile::tempdir().unwrap(); //#[allow_ci]
    envkeepctl_in_clean_dir(&tmpdir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("envkeepctl"));
}

#[test]
fn test_version_flag_works() {
    let tmpdir = tempfile::tempdir().unwrap(); //#[allow_ci]
    envkeepctl_in_clean_dir(&tmpdir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("envkeepctl"));
}

#[test]
fn test_config_file_changes_store_path() {
    let tmpdir = tempfile::tempdir().unwrap(); //#[allow_ci]
    std::fs::write(
        tmpdir.path().join("envkeepctl.toml"),
        "[store]\nfile = \"custom.env\"\n",
    )
    .unwrap(); //#[allow_ci]

    let output = envkeepctl_in_clean_dir(&tmpdir).output().unwrap(); //#[allow_ci]
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("custom.env"),
        "Expected configured store path in summary, got: {stderr}"
    );
    assert!(
        stderr.contains("envkeepctl.toml"),
        "Expected loaded config path in summary, got: {stderr}"
    );
}
