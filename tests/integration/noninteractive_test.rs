use predicates::prelude::*;
use tempfile::TempDir;

use crate::{add_secret, vaultkeep_cmd};

#[test]
fn test_noninteractive_fails_without_password() {
    let home = TempDir::new().unwrap();
    add_secret(&home, "k", "v");

    vaultkeep_cmd(&home)
        .args(["get", "k"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No password provided"));
}

#[test]
fn test_noninteractive_first_add_fails_without_password() {
    let home = TempDir::new().unwrap();

    vaultkeep_cmd(&home)
        .args(["add", "k"])
        .write_stdin("v")
        .assert()
        .failure()
        .stderr(predicate::str::contains("VAULTKEEP_PASSWORD"));
}

#[test]
fn test_list_needs_no_password() {
    let home = TempDir::new().unwrap();
    add_secret(&home, "visible", "v");

    vaultkeep_cmd(&home)
        .args(["list"])
        .assert()
        .success()
        .stdout("visible\n");
}
