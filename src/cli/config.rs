use crate::cli::common::Session;
use crate::cli::ConfigCommands;
use vaultkeep::error::{Result, VaultkeepError};

pub fn run(session: &Session, cmd: &ConfigCommands) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show(session),
    }
}

fn show(session: &Session) -> Result<()> {
    let mut config = session.config.clone();
    config.store.path = Some(session.path.clone());
    let toml_str = toml::to_string_pretty(&config)
        .map_err(|e| VaultkeepError::Serialization(format!("Config serialize error: {}", e)))?;
    println!("{}", toml_str);
    Ok(())
}
