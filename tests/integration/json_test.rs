use tempfile::TempDir;

use crate::{add_secret, authed_cmd, vaultkeep_cmd};

fn parse_stdout(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_get_json() {
    let home = TempDir::new().unwrap();
    add_secret(&home, "api-key", "sk-123");

    let output = authed_cmd(&home)
        .args(["get", "api-key", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json = parse_stdout(&output);
    assert_eq!(json["name"], "api-key");
    assert_eq!(json["value"], "sk-123");
}

#[test]
fn test_list_json() {
    let home = TempDir::new().unwrap();
    add_secret(&home, "beta", "b");
    add_secret(&home, "alpha", "a");

    let output = vaultkeep_cmd(&home)
        .args(["--json", "list"])
        .output()
        .unwrap();
    let json = parse_stdout(&output);
    assert_eq!(json["secrets"], serde_json::json!(["alpha", "beta"]));
}

#[test]
fn test_history_json() {
    let home = TempDir::new().unwrap();
    add_secret(&home, "db", "v1");
    authed_cmd(&home)
        .args(["update", "db"])
        .write_stdin("v2")
        .assert()
        .success();

    let output = authed_cmd(&home)
        .args(["history", "db", "--json"])
        .output()
        .unwrap();
    let json = parse_stdout(&output);
    let records = json["records"].as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["current"], false);
    assert_eq!(records[1]["current"], true);
    assert_eq!(records[1]["index"], 1);
}

#[test]
fn test_write_json() {
    let home = TempDir::new().unwrap();
    let output = authed_cmd(&home)
        .args(["add", "k", "--json"])
        .write_stdin("v")
        .output()
        .unwrap();
    let json = parse_stdout(&output);
    assert_eq!(json["operation"], "add");
    assert_eq!(json["name"], "k");
    assert!(json.get("records").is_none());
}

#[test]
fn test_error_json() {
    let home = TempDir::new().unwrap();
    add_secret(&home, "k", "v");

    let output = authed_cmd(&home)
        .args(["get", "missing", "--json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
    assert!(output.stdout.is_empty());
    let json: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(json["error"]["code"], "not_found");
    assert_eq!(json["error"]["exit_code"], 3);
    assert!(json["error"]["message"]
        .as_str()
        .unwrap()
        .contains("missing"));
}
