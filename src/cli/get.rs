use crate::cli::common::{self, Session};
use crate::cli::json_output::GetResponse;
use vaultkeep::error::Result;

pub fn run(session: &Session, name: &str, json: bool) -> Result<()> {
    let client = session.unlock()?;
    let value = client.get(name)?;

    if json {
        common::print_json(&GetResponse {
            name: name.to_string(),
            value,
        })?;
    } else {
        print!("{}", value);
    }
    Ok(())
}
