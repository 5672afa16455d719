#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const CONFIG: &str = r#"{
  "filters": {
    "active": { "kind": "boolean", "field": "active", "key": true, "label": "Active only" },
    "price":  { "kind": "range", "field": "price", "type": "number" },
    "status": { "kind": "select", "field": "status" },
    "tags":   { "kind": "multi_select", "field": "tags" },
    "search": { "kind": "transformer", "transformer": "full_text" }
  }
}"#;

fn filterstate_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin("filterstate"));
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

/// A temp project with `.filterstate/config.json` in place.
fn project() -> TempDir {
    let temp = TempDir::new().unwrap();
    let config_dir = temp.path().join(".filterstate");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.json"), CONFIG).unwrap();
    temp
}

fn write_json(dir: &Path, name: &str, value: Value) {
    fs::write(dir.join(name), value.to_string()).unwrap();
}

fn stdout_json(output: &[u8]) -> Value {
    serde_json::from_slice(output).unwrap()
}

#[test]
fn merge_reads_filter_sub_map() {
    let temp = project();
    write_json(
        temp.path(),
        "params.json",
        json!({"filters": {"active": "true", "tags": ["a", "", "b"]}, "page": "2"}),
    );

    let output = filterstate_cmd(temp.path())
        .args(["merge", "--params", "params.json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    assert_eq!(
        stdout_json(&output),
        json!({"filters": {"active": true, "tags": {"selected": ["a", "b"]}}})
    );
}

#[test]
fn merge_keeps_previous_state_and_siblings() {
    let temp = project();
    write_json(
        temp.path(),
        "state.json",
        json!({"filters": {"active": true, "status": {"id": [1]}}, "sort": {"name": "asc"}}),
    );
    write_json(temp.path(), "params.json", json!({"active": "false"}));

    let output = filterstate_cmd(temp.path())
        .args(["merge", "--params", "params.json", "--state", "state.json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    assert_eq!(
        stdout_json(&output),
        json!({"filters": {"status": {"id": [1]}}, "sort": {"name": "asc"}})
    );
}

#[test]
fn apply_prints_state_and_wire() {
    let temp = project();
    write_json(
        temp.path(),
        "params.json",
        json!({"price": {"min": "1", "max": "10"}, "status": ["[42]"]}),
    );

    let output = filterstate_cmd(temp.path())
        .args(["apply", "--params", "params.json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value = stdout_json(&output);
    assert_eq!(
        value["state"]["filters"],
        json!({"price": {"min": "1", "max": "10"}, "status": {"id": [42]}})
    );
    assert_eq!(
        value["wire"],
        json!({"price": {"min": 1, "max": 10}, "status": {"id": [42]}})
    );
}

#[test]
fn encode_reads_state_from_stdin() {
    let temp = project();
    let state = json!({"filters": {"tags": {"selected": []}, "search": {"term": "x"}}});

    let output = filterstate_cmd(temp.path())
        .args(["encode", "--state", "-"])
        .write_stdin(state.to_string())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    assert_eq!(stdout_json(&output), json!({"search": {"term": "x"}}));
}

#[test]
fn malformed_bracket_value_exits_with_client_error() {
    let temp = project();
    write_json(temp.path(), "params.json", json!({"status": ["[not valid]"]}));

    filterstate_cmd(temp.path())
        .args(["merge", "--params", "params.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid filter value for 'status'"));
}

#[test]
fn missing_params_file_is_an_error() {
    let temp = project();

    filterstate_cmd(temp.path())
        .args(["merge", "--params", "nope.json"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("IO error"));
}

#[test]
fn filters_lists_registry() {
    let temp = project();

    filterstate_cmd(temp.path())
        .arg("filters")
        .assert()
        .success()
        .stdout(predicate::str::contains("active"))
        .stdout(predicate::str::contains("multi_select"))
        .stdout(predicate::str::contains("Active only"));
}

#[test]
fn explicit_config_path_wins() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("custom.json");
    fs::write(
        &config,
        r#"{"filters": {"done": {"kind": "boolean", "field": "done", "key": "yes"}}}"#,
    )
    .unwrap();
    write_json(temp.path(), "params.json", json!({"done": "true"}));

    let output = filterstate_cmd(temp.path())
        .args(["--config", "custom.json", "apply", "--params", "params.json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    assert_eq!(stdout_json(&output)["wire"], json!({"done": "yes"}));
}
