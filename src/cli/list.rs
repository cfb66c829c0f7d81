use crate::cli::common::{self, Session};
use crate::cli::json_output::ListResponse;
use vaultkeep::error::Result;

pub fn run(session: &Session, json: bool) -> Result<()> {
    let names = session.client_without_password().list()?;

    if json {
        common::print_json(&ListResponse { secrets: names })?;
    } else {
        for name in &names {
            println!("{}", name);
        }
    }
    Ok(())
}
