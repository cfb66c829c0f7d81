use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use subtle::ConstantTimeEq;

use crate::error::{Result, VaultkeepError};
use crate::types::*;

type HmacSha256 = Hmac<Sha256>;

/// Operation name logged for a password rotation.
pub const ROTATION_OP: &str = "passwd";

const KEY_ID_LABEL: &str = "vaultkeep-audit-key-id";

/// A single audit log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub operation: String,
    pub secret: Option<String>,
    pub actor: String,
    pub outcome: String,
    pub detail: Option<String>,
    /// Identifies the key the entry was chained under.
    #[serde(default)]
    pub key_id: String,
    pub chain_hmac: String,
}

impl AuditEntry {
    fn chain_data(&self, prev_hmac: &str) -> String {
        format!(
            "{}|{}|{}|{}|{:?}|{}|{}|{:?}",
            prev_hmac,
            self.key_id,
            self.timestamp.to_rfc3339(),
            self.operation,
            self.secret,
            self.actor,
            self.outcome,
            self.detail,
        )
    }
}

/// Result of walking the chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainReport {
    /// Entries in the log.
    pub total: usize,
    /// Trailing entries chained under the current key.
    pub verified: usize,
}

/// Append an audit entry to the log file.
pub fn log_event(
    audit_path: &Path,
    operation: &str,
    secret: Option<&str>,
    actor: &str,
    outcome: &str,
    detail: Option<&str>,
    hmac_key: &[u8],
) -> Result<()> {
    let prev_hmac = read_last_hmac(audit_path);

    let mut entry = AuditEntry {
        timestamp: Utc::now(),
        operation: operation.to_string(),
        secret: secret.map(|s| s.to_string()),
        actor: actor.to_string(),
        outcome: outcome.to_string(),
        detail: detail.map(|s| s.to_string()),
        key_id: key_id(hmac_key)?,
        chain_hmac: String::new(),
    };
    entry.chain_hmac = compute_chain_hmac(&entry.chain_data(&prev_hmac), hmac_key)?;

    let json_line =
        serde_json::to_string(&entry).map_err(|e| VaultkeepError::Serialization(e.to_string()))?;

    if let Some(dir) = audit_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(audit_path)?;
    writeln!(file, "{}", json_line)?;

    Ok(())
}

/// Read all audit entries from the log file.
pub fn read_entries(audit_path: &Path) -> Result<Vec<AuditEntry>> {
    if !audit_path.exists() {
        return Ok(Vec::new());
    }

    let file = fs::File::open(audit_path)?;
    let reader = BufReader::new(file);
    let mut entries = Vec::new();

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let entry: AuditEntry =
            serde_json::from_str(&line).map_err(|e| VaultkeepError::Parse(e.to_string()))?;
        entries.push(entry);
    }

    Ok(entries)
}

/// Verify the HMAC chain over the trailing run of entries written under
/// `hmac_key`.
///
/// Earlier entries were keyed with a password the store no longer has; they are
/// counted in `total` but not checked. The run is anchored on the HMAC of the
/// entry just before it, whether or not the rotation itself was logged.
pub fn verify_chain(audit_path: &Path, hmac_key: &[u8]) -> Result<ChainReport> {
    let entries = read_entries(audit_path)?;
    let current = key_id(hmac_key)?;
    let start = entries
        .iter()
        .rposition(|e| e.key_id != current)
        .map_or(0, |i| i + 1);
    let mut prev_hmac = match start {
        0 => String::new(),
        i => entries[i - 1].chain_hmac.clone(),
    };

    for (i, entry) in entries.iter().enumerate().skip(start) {
        let expected = compute_chain_hmac(&entry.chain_data(&prev_hmac), hmac_key)?;
        if !bool::from(expected.as_bytes().ct_eq(entry.chain_hmac.as_bytes())) {
            return Err(VaultkeepError::AuditChainBroken(i));
        }
        prev_hmac = entry.chain_hmac.clone();
    }

    Ok(ChainReport {
        total: entries.len(),
        verified: entries.len() - start,
    })
}

fn read_last_hmac(audit_path: &Path) -> String {
    if !audit_path.exists() {
        return String::new();
    }

    if let Ok(content) = fs::read_to_string(audit_path) {
        for line in content.lines().rev() {
            if !line.trim().is_empty() {
                if let Ok(entry) = serde_json::from_str::<AuditEntry>(line) {
                    return entry.chain_hmac;
                }
            }
        }
    }

    String::new()
}

fn compute_chain_hmac(data: &str, hmac_key: &[u8]) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(hmac_key)
        .map_err(|e| VaultkeepError::Other(format!("HMAC init failed: {}", e)))?;
    mac.update(data.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Short public tag of an audit key, used to find where a key's entries begin.
fn key_id(hmac_key: &[u8]) -> Result<String> {
    let tag = compute_chain_hmac(KEY_ID_LABEL, hmac_key)?;
    Ok(tag[..16].to_string())
}

/// Derive the audit HMAC key from the store password.
pub fn derive_audit_key(password: &str) -> Result<Vec<u8>> {
    crate::vault::crypto::derive_key(password.as_bytes(), b"audit-hmac", 32)
}
