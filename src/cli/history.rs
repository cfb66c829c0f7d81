use crate::cli::common::{self, Session};
use crate::cli::json_output::{HistoryItem, HistoryResponse};
use vaultkeep::error::Result;

pub fn run(session: &Session, name: &str, json: bool) -> Result<()> {
    let client = session.unlock()?;
    let records = client.history(name)?;

    if json {
        let records = records
            .iter()
            .map(|r| HistoryItem {
                index: r.index,
                time: r.time.to_rfc3339(),
                current: r.current,
            })
            .collect();
        common::print_json(&HistoryResponse {
            name: name.to_string(),
            records,
        })?;
    } else {
        for r in &records {
            println!(
                "{:>3}  {}{}",
                r.index,
                r.time.format("%Y-%m-%d %H:%M:%S"),
                if r.current { "  (current)" } else { "" }
            );
        }
    }
    Ok(())
}
