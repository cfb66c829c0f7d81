use std::io::{self, Read};
use std::path::{Path, PathBuf};

use serde::Serialize;
use zeroize::Zeroizing;

use vaultkeep::api::StoreClient;
use vaultkeep::auth;
use vaultkeep::config::Config;
use vaultkeep::error::{Result, VaultkeepError};
use vaultkeep::vault;

/// Config and store location resolved once per invocation.
pub struct Session {
    pub config: Config,
    pub path: PathBuf,
}

impl Session {
    pub fn open(file: Option<&Path>) -> Result<Self> {
        let config = Config::load(&vault::config_path()?)?;
        let path = config.store_path(file)?;
        Ok(Self { config, path })
    }

    /// A client that needs no password (listing, audit reads).
    pub fn client_without_password(&self) -> StoreClient {
        StoreClient::with_password(&self.path, "").with_config(&self.config)
    }

    /// Resolve the store password and build a client. When the store has no
    /// password yet, an interactive prompt asks for it twice.
    pub fn unlock(&self) -> Result<StoreClient> {
        let store = vault::load_store(&self.path, self.config.store.cipher)?;
        let password = resolve_password(!store.has_password())?;
        Ok(StoreClient::with_password(&self.path, &password)
            .with_config(&self.config)
            .with_actor(actor_name()))
    }
}

/// Password from VAULTKEEP_PASSWORD, falling back to a TTY prompt.
pub fn resolve_password(creating: bool) -> Result<Zeroizing<String>> {
    if let Some(password) = auth::password_from_env() {
        return Ok(password);
    }
    if auth::is_non_interactive() {
        return Err(VaultkeepError::AuthFailed(
            "No password provided. Set the VAULTKEEP_PASSWORD environment variable.".into(),
        ));
    }

    let prompt = dialoguer::Password::new();
    let prompt = if creating {
        prompt
            .with_prompt("Create store password (1-16 bytes)")
            .with_confirmation("Confirm password", "Passwords don't match")
    } else {
        prompt.with_prompt("Enter store password")
    };
    prompt
        .interact()
        .map(Zeroizing::new)
        .map_err(|e| VaultkeepError::AuthFailed(format!("Failed to read password: {}", e)))
}

/// Read a secret value from stdin, trimming one trailing newline.
pub fn read_value() -> Result<Zeroizing<String>> {
    let mut value = Zeroizing::new(String::new());
    io::stdin()
        .read_to_string(&mut value)
        .map_err(|e| VaultkeepError::Other(format!("Failed to read from stdin: {}", e)))?;

    // Trim trailing newline (common when piping echo)
    let trimmed = value
        .strip_suffix("\r\n")
        .or_else(|| value.strip_suffix('\n'))
        .unwrap_or(&value);
    Ok(Zeroizing::new(trimmed.to_string()))
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out =
        serde_json::to_string(value).map_err(|e| VaultkeepError::Serialization(e.to_string()))?;
    println!("{}", out);
    Ok(())
}

fn actor_name() -> String {
    match std::env::var("USER") {
        Ok(user) if !user.is_empty() => format!("cli({})", user),
        _ => "cli".to_string(),
    }
}
