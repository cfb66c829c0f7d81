//! CLI integration tests. Every test runs the binary against a throwaway HOME,
//! so the default store lands in `<tmp>/.vaultkeep/secrets.json`.

mod audit_test;
mod error_test;
mod json_test;
mod noninteractive_test;

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

pub const PASSWORD: &str = "testpass";

pub fn vaultkeep_cmd(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("vaultkeep").unwrap();
    cmd.env("HOME", home.path());
    cmd.env("VAULTKEEP_NON_INTERACTIVE", "1");
    cmd.env_remove("VAULTKEEP_PASSWORD");
    cmd.env_remove("VAULTKEEP_NEW_PASSWORD");
    cmd.env_remove("VAULTKEEP_FILE");
    cmd.env_remove("VAULTKEEP_LOG");
    cmd
}

/// Command with the store password already in the environment.
pub fn authed_cmd(home: &TempDir) -> Command {
    let mut cmd = vaultkeep_cmd(home);
    cmd.env("VAULTKEEP_PASSWORD", PASSWORD);
    cmd
}

pub fn store_file(home: &TempDir) -> PathBuf {
    home.path().join(".vaultkeep").join("secrets.json")
}

pub fn add_secret(home: &TempDir, name: &str, value: &str) {
    authed_cmd(home)
        .args(["add", name])
        .write_stdin(value)
        .assert()
        .success();
}
