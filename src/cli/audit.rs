use crate::cli::common::{self, Session};
use crate::cli::json_output::{AuditEntryItem, AuditShowResponse, AuditVerifyResponse};
use crate::cli::AuditCommands;
use vaultkeep::error::Result;

pub fn run(session: &Session, cmd: &AuditCommands, json: bool) -> Result<()> {
    match cmd {
        AuditCommands::Show { count } => show(session, *count, json),
        AuditCommands::Verify => verify(session, json),
    }
}

fn show(session: &Session, count: usize, json: bool) -> Result<()> {
    let entries = session.client_without_password().audit_entries()?;

    let display = if count == 0 {
        &entries[..]
    } else {
        let start = entries.len().saturating_sub(count);
        &entries[start..]
    };

    if json {
        let items: Vec<AuditEntryItem> = display
            .iter()
            .map(|e| AuditEntryItem {
                timestamp: e.timestamp.to_rfc3339(),
                operation: e.operation.clone(),
                secret: e.secret.clone(),
                actor: e.actor.clone(),
                outcome: e.outcome.clone(),
                detail: e.detail.clone(),
            })
            .collect();
        return common::print_json(&AuditShowResponse {
            shown: items.len(),
            total: entries.len(),
            entries: items,
        });
    }

    if entries.is_empty() {
        eprintln!("No audit log entries.");
        return Ok(());
    }

    for entry in display {
        let secret_str = entry.secret.as_deref().unwrap_or("-");
        let detail_str = entry.detail.as_deref().unwrap_or("");
        println!(
            "{} | {:<8} | {:<8} | {:<16} | {} {}",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            entry.operation,
            entry.outcome,
            entry.actor,
            secret_str,
            detail_str,
        );
    }

    eprintln!("\n({} entries shown of {} total)", display.len(), entries.len());
    Ok(())
}

fn verify(session: &Session, json: bool) -> Result<()> {
    let client = session.unlock()?;

    match client.verify_audit_chain() {
        Ok(report) if json => common::print_json(&AuditVerifyResponse {
            total: report.total,
            verified: report.verified,
            intact: true,
        }),
        Ok(report) => {
            println!(
                "Audit log integrity verified. {} of {} entries checked since the last password change, chain intact.",
                report.verified, report.total
            );
            Ok(())
        }
        Err(e) => {
            if !json {
                eprintln!("INTEGRITY FAILURE: {}", e);
            }
            Err(e)
        }
    }
}
