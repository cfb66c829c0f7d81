use predicates::prelude::*;
use tempfile::TempDir;

use crate::{add_secret, authed_cmd, store_file, vaultkeep_cmd};

fn audit_file(home: &TempDir) -> std::path::PathBuf {
    let mut path = store_file(home).into_os_string();
    path.push(".audit");
    path.into()
}

#[test]
fn test_operations_are_audited() {
    let home = TempDir::new().unwrap();
    add_secret(&home, "k", "v");
    authed_cmd(&home).args(["get", "k"]).assert().success();
    authed_cmd(&home).args(["delete", "k"]).assert().success();

    assert!(audit_file(&home).exists());
    vaultkeep_cmd(&home)
        .args(["audit", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("delete"))
        .stderr(predicate::str::contains("3 entries shown of 3 total"));
}

#[test]
fn test_audit_never_records_values() {
    let home = TempDir::new().unwrap();
    add_secret(&home, "k", "super-secret-value");
    authed_cmd(&home).args(["get", "k"]).assert().success();

    let log = std::fs::read_to_string(audit_file(&home)).unwrap();
    assert!(!log.contains("super-secret-value"));
    assert!(!log.contains("testpass"));
}

#[test]
fn test_audit_show_count() {
    let home = TempDir::new().unwrap();
    add_secret(&home, "a", "1");
    add_secret(&home, "b", "2");
    add_secret(&home, "c", "3");

    let output = vaultkeep_cmd(&home)
        .args(["audit", "show", "-n", "2", "--json"])
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["shown"], 2);
    assert_eq!(json["total"], 3);
    assert_eq!(json["entries"][1]["secret"], "c");
}

#[test]
fn test_audit_verify() {
    let home = TempDir::new().unwrap();
    add_secret(&home, "k", "v");
    authed_cmd(&home).args(["get", "k"]).assert().success();

    authed_cmd(&home)
        .args(["audit", "verify"])
        .assert()
        .success()
        .stdout(predicate::str::contains("chain intact"));
}

#[test]
fn test_audit_verify_after_passwd() {
    let home = TempDir::new().unwrap();
    add_secret(&home, "k", "v");
    authed_cmd(&home)
        .args(["passwd", "--new-password", "second"])
        .assert()
        .success();

    let output = vaultkeep_cmd(&home)
        .env("VAULTKEEP_PASSWORD", "second")
        .args(["audit", "verify", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["total"], 2);
    assert_eq!(json["verified"], 1);
    assert_eq!(json["intact"], true);
}

#[test]
fn test_audit_tamper_detected() {
    let home = TempDir::new().unwrap();
    add_secret(&home, "k", "v");
    authed_cmd(&home).args(["get", "k"]).assert().success();

    let log = std::fs::read_to_string(audit_file(&home)).unwrap();
    std::fs::write(audit_file(&home), log.replacen("\"get\"", "\"delete\"", 1)).unwrap();

    authed_cmd(&home)
        .args(["audit", "verify"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("INTEGRITY FAILURE"));
}

#[test]
fn test_audit_disabled_in_config() {
    let home = TempDir::new().unwrap();
    std::fs::create_dir_all(home.path().join(".vaultkeep")).unwrap();
    std::fs::write(
        home.path().join(".vaultkeep").join("vaultkeep.toml"),
        "[audit]\nenabled = false\n",
    )
    .unwrap();

    add_secret(&home, "k", "v");
    assert!(!audit_file(&home).exists());

    vaultkeep_cmd(&home)
        .args(["audit", "show"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No audit log entries"));
}
