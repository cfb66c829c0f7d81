use zeroize::Zeroizing;

use crate::cli::common::{self, Session};
use crate::cli::json_output::WriteResponse;
use vaultkeep::auth;
use vaultkeep::error::{Result, VaultkeepError};

pub fn run(session: &Session, new_password: Option<&str>, json: bool) -> Result<()> {
    let mut client = session.unlock()?;

    let new_password = match new_password {
        Some(p) => Zeroizing::new(p.to_string()),
        None => prompt_new_password()?,
    };

    let count = client.rotate_password(&new_password)?;

    if json {
        common::print_json(&WriteResponse {
            operation: "passwd".into(),
            name: None,
            records: Some(count),
        })?;
    } else {
        eprintln!("Store password changed; {} records re-encrypted.", count);
    }
    Ok(())
}

fn prompt_new_password() -> Result<Zeroizing<String>> {
    if auth::is_non_interactive() {
        return Err(VaultkeepError::AuthFailed(
            "Cannot prompt for a new password in non-interactive mode. Use --new-password or VAULTKEEP_NEW_PASSWORD."
                .to_string(),
        ));
    }
    dialoguer::Password::new()
        .with_prompt("Enter new store password (1-16 bytes)")
        .with_confirmation("Confirm new password", "Passwords don't match")
        .interact()
        .map(Zeroizing::new)
        .map_err(|e| VaultkeepError::AuthFailed(format!("Failed to read password: {}", e)))
}
