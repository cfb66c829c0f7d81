use tempfile::TempDir;

use crate::{add_secret, authed_cmd, store_file, vaultkeep_cmd};

#[test]
fn test_exit_code_success() {
    let home = TempDir::new().unwrap();
    add_secret(&home, "test-secret", "val");

    let output = authed_cmd(&home)
        .args(["get", "test-secret"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_exit_code_auth_failed() {
    let home = TempDir::new().unwrap();
    add_secret(&home, "k", "v");

    let output = vaultkeep_cmd(&home)
        .env("VAULTKEEP_PASSWORD", "nottheone")
        .args(["get", "k"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2)); // AuthFailed
}

#[test]
fn test_exit_code_secret_not_found() {
    let home = TempDir::new().unwrap();
    add_secret(&home, "k", "v");

    let output = authed_cmd(&home)
        .args(["get", "nonexistent"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3)); // SecretNotFound

    let output = authed_cmd(&home)
        .args(["delete", "nonexistent"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_exit_code_already_exists() {
    let home = TempDir::new().unwrap();
    add_secret(&home, "dup", "v1");

    let output = authed_cmd(&home)
        .args(["add", "dup"])
        .write_stdin("v2")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(5)); // SecretAlreadyExists
}

#[test]
fn test_exit_code_validation() {
    let home = TempDir::new().unwrap();
    add_secret(&home, "k", "v");

    let output = authed_cmd(&home)
        .args(["update", "never-added"])
        .write_stdin("v")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(5)); // Validation

    let long = TempDir::new().unwrap();
    let output = vaultkeep_cmd(&long)
        .env("VAULTKEEP_PASSWORD", "this-is-too-long-for-aes128")
        .args(["add", "k"])
        .write_stdin("v")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(5));
    assert!(!store_file(&long).exists());
}

#[test]
fn test_exit_code_parse_error() {
    let home = TempDir::new().unwrap();
    std::fs::create_dir_all(store_file(&home).parent().unwrap()).unwrap();
    std::fs::write(store_file(&home), "{ definitely not json").unwrap();

    let output = vaultkeep_cmd(&home).args(["list"]).output().unwrap();
    assert_eq!(output.status.code(), Some(6)); // Parse
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Malformed store file"));
}

#[test]
fn test_empty_store_file_is_empty_store() {
    let home = TempDir::new().unwrap();
    std::fs::create_dir_all(store_file(&home).parent().unwrap()).unwrap();
    std::fs::write(store_file(&home), "").unwrap();

    vaultkeep_cmd(&home).args(["list"]).assert().success().stdout("");
    add_secret(&home, "k", "v");
}
