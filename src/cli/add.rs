use crate::cli::common::{self, Session};
use crate::cli::json_output::WriteResponse;
use vaultkeep::error::Result;

pub fn run(session: &Session, name: &str, json: bool) -> Result<()> {
    let client = session.unlock()?;
    let value = common::read_value()?;
    client.add(name, &value)?;

    if json {
        common::print_json(&WriteResponse {
            operation: "add".into(),
            name: Some(name.to_string()),
            records: None,
        })?;
    } else {
        eprintln!("Secret '{}' added.", name);
    }
    Ok(())
}
