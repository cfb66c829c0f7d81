use crate::cli::common::{self, Session};
use crate::cli::json_output::WriteResponse;
use vaultkeep::error::Result;

pub fn run(session: &Session, name: &str, json: bool) -> Result<()> {
    let client = session.unlock()?;
    client.delete(name)?;

    if json {
        common::print_json(&WriteResponse {
            operation: "delete".into(),
            name: Some(name.to_string()),
            records: None,
        })?;
    } else {
        eprintln!("Secret '{}' deleted. `vaultkeep add {}` restores it.", name, name);
    }
    Ok(())
}
