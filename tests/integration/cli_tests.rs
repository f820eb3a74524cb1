//! Integration tests for the CLI binary.
//!
//! Drives the `spore` binary against config and snapshot fixtures.
//!
//! This test is registered as a [[test]] in the spore-cobuild-cli crate
//! so that CARGO_BIN_EXE_spore is available.

use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;

const CONFIG: &str = r#"{
    "spore": [{ "version": "v2", "code_hash": "0x2222222222222222222222222222222222222222222222222222222222222222", "hash_type": "data1", "cobuild": true }],
    "cluster": [{ "version": "v2", "code_hash": "0x4444444444444444444444444444444444444444444444444444444444444444", "hash_type": "data1", "cobuild": true }]
}"#;

const LOCK: &str = r#"{ "code_hash": "0x9b9b9b9b9b9b9b9b9b9b9b9b9b9b9b9b9b9b9b9b9b9b9b9b9b9b9b9b9b9b9b9b", "hash_type": "type", "args": "0x0101010101010101010101010101010101010101" }"#;

/// Get a Command pointing to the `spore` binary.
fn spore_binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_spore"))
}

/// Write the config and a one-cell signer snapshot into `dir`.
fn write_fixtures(dir: &Path) {
    std::fs::write(dir.join("config.json"), CONFIG).unwrap();
    let snapshot = format!(
        r#"{{
            "lock": {LOCK},
            "cells": [{{
                "out_point": {{ "tx_hash": "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "index": 0 }},
                "output": {{ "capacity": 6100000000, "lock": {LOCK} }},
                "data": "0x"
            }}]
        }}"#
    );
    std::fs::write(dir.join("chain.json"), snapshot).unwrap();
}

fn run(dir: &Path, args: &[&str]) -> Output {
    spore_binary()
        .current_dir(dir)
        .args(["--config", "config.json", "--chain", "chain.json"])
        .args(args)
        .output()
        .expect("failed to execute spore")
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "spore should exit with success, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn cli_responds_to_help() {
    let output = spore_binary()
        .arg("--help")
        .output()
        .expect("failed to execute spore --help");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Usage") && stdout.contains("create"),
        "spore --help output should list commands, got: {stdout}"
    );
}

#[test]
fn cli_responds_to_version() {
    let output = spore_binary()
        .arg("--version")
        .output()
        .expect("failed to execute spore --version");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("0.1"), "got: {stdout}");
}

#[test]
fn cli_exits_with_error_on_unknown_flag() {
    let output = spore_binary()
        .arg("--nonexistent-flag")
        .output()
        .expect("failed to execute spore");
    assert!(!output.status.success());
}

#[test]
fn cli_create_then_decode_witness() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());

    let created = stdout_json(&run(
        dir.path(),
        &["create", "--content-type", "text/plain", "--content", "hello"],
    ));
    let ids = created["ids"].as_array().unwrap();
    assert_eq!(ids.len(), 1);
    assert_eq!(created["tx"]["outputs"].as_array().unwrap().len(), 1);
    assert_eq!(created["tx"]["inputs"].as_array().unwrap().len(), 1);

    std::fs::write(dir.path().join("tx.json"), created["tx"].to_string()).unwrap();
    let actions = stdout_json(&run(dir.path(), &["--tx", "tx.json", "witness", "decode"]));
    let actions = actions.as_array().unwrap();
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0]["action"]["type"], "create_spore");
    assert_eq!(actions[0]["action"]["spore_id"], ids[0]);
}

#[test]
fn cli_id_matches_create() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());

    let created = stdout_json(&run(
        dir.path(),
        &["create", "--content-type", "text/plain", "--content-hex", "0x00ff"],
    ));

    // The same skeleton minus its outputs predicts the created identifier.
    let mut skeleton = created["tx"].clone();
    skeleton["outputs"] = Value::Array(Vec::new());
    skeleton["outputs_data"] = Value::Array(Vec::new());
    std::fs::write(dir.path().join("skeleton.json"), skeleton.to_string()).unwrap();

    let ids = stdout_json(&run(dir.path(), &["--tx", "skeleton.json", "id"]));
    assert_eq!(ids[0], created["ids"][0]);
}

#[test]
fn cli_create_requires_cluster_mode_for_cluster() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());

    let output = run(
        dir.path(),
        &[
            "create",
            "--content-type",
            "text/plain",
            "--content",
            "x",
            "--cluster",
            "0xc1c1c1c1c1c1c1c1c1c1c1c1c1c1c1c1c1c1c1c1c1c1c1c1c1c1c1c1c1c1c1c1",
        ],
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("clusterMode"), "got: {stderr}");
}

#[test]
fn cli_cluster_create_writes_out_file() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());

    let output = run(
        dir.path(),
        &["cluster", "create", "--name", "Gallery", "--out", "cluster.json"],
    );
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let text = std::fs::read_to_string(dir.path().join("cluster.json")).unwrap();
    let created: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(created["ids"].as_array().unwrap().len(), 1);
}
