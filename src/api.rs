//! High-level programmatic API for a vaultkeep store file.
//!
//! [`StoreClient`] provides a simple facade over the store, handling
//! load → operate → save → audit in every method call. Only successful
//! writes touch the file.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::audit::{self, AuditEntry, ChainReport};
use crate::auth;
use crate::config::Config;
use crate::error::{Result, VaultkeepError};
use crate::vault::crypto::CipherSuite;
use crate::vault::secret::RecordInfo;
use crate::vault::{self, SecretStore};

/// High-level client bound to one store file and one password.
pub struct StoreClient {
    path: PathBuf,
    password: Zeroizing<String>,
    /// Suite for the store if it is still empty.
    cipher: CipherSuite,
    audit_enabled: bool,
    /// Human-readable actor label for audit entries.
    actor: String,
}

impl StoreClient {
    /// Open the store at `path` with a password.
    pub fn with_password(path: impl Into<PathBuf>, password: &str) -> Self {
        Self {
            path: path.into(),
            password: Zeroizing::new(password.to_string()),
            cipher: CipherSuite::Aes128Gcm,
            audit_enabled: true,
            actor: "api".to_string(),
        }
    }

    /// Authenticate from `VAULTKEEP_PASSWORD`.
    ///
    /// This does **not** fall through to interactive prompts; it only reads env vars.
    pub fn from_env(path: impl Into<PathBuf>) -> Result<Self> {
        let password = auth::password_from_env().ok_or_else(|| {
            VaultkeepError::AuthFailed("No password found. Set VAULTKEEP_PASSWORD.".into())
        })?;
        Ok(Self::with_password(path, &password))
    }

    /// Apply the cipher and audit settings from a config file.
    pub fn with_config(mut self, config: &Config) -> Self {
        self.cipher = config.store.cipher;
        self.audit_enabled = config.audit.enabled;
        self
    }

    /// Choose the cipher suite used if this client creates the store.
    pub fn with_cipher(mut self, cipher: CipherSuite) -> Self {
        self.cipher = cipher;
        self
    }

    /// Turn audit logging on or off.
    pub fn with_audit(mut self, enabled: bool) -> Self {
        self.audit_enabled = enabled;
        self
    }

    /// Override the actor label used in audit entries.
    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = actor.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn audit_path(&self) -> PathBuf {
        vault::audit_path(&self.path)
    }

    /// Load the store without authenticating.
    pub fn load(&self) -> Result<SecretStore> {
        vault::load_store(&self.path, self.cipher)
    }

    /// Add a secret; the first add sets the store password.
    pub fn add(&self, name: &str, value: &str) -> Result<()> {
        debug!(name, "add");
        let mut store = self.load()?;
        store.add(&self.password, name, value)?;
        vault::save_store(&store, &self.path)?;
        self.audit("add", Some(name), None);
        Ok(())
    }

    /// Decrypt the current value of a secret.
    pub fn get(&self, name: &str) -> Result<String> {
        debug!(name, "get");
        let store = self.load()?;
        let value = store.read(&self.password, name)?;
        self.audit("get", Some(name), None);
        Ok(value)
    }

    /// Append a new version of an existing secret.
    pub fn update(&self, name: &str, value: &str) -> Result<()> {
        debug!(name, "update");
        let mut store = self.load()?;
        store.update(&self.password, name, value)?;
        vault::save_store(&store, &self.path)?;
        let versions = store.entries.get(name).map_or(0, |e| e.history.len());
        self.audit("update", Some(name), Some(&format!("versions={}", versions)));
        Ok(())
    }

    /// Soft-delete a secret.
    pub fn delete(&self, name: &str) -> Result<()> {
        debug!(name, "delete");
        let mut store = self.load()?;
        store.delete(&self.password, name)?;
        vault::save_store(&store, &self.path)?;
        self.audit("delete", Some(name), None);
        Ok(())
    }

    /// Active secret names in display order. Needs no password.
    pub fn list(&self) -> Result<Vec<String>> {
        Ok(self.load()?.list_active_names())
    }

    /// Version metadata for a secret.
    pub fn history(&self, name: &str) -> Result<Vec<RecordInfo>> {
        debug!(name, "history");
        let store = self.load()?;
        let history = store.history(&self.password, name)?;
        self.audit("history", Some(name), None);
        Ok(history)
    }

    /// Re-encrypt the whole store under a new password. The client keeps
    /// working with the new password afterwards. Returns the records rewritten.
    pub fn rotate_password(&mut self, new_password: &str) -> Result<usize> {
        let mut store = self.load()?;
        let count = store.rotate_password(&self.password, new_password)?;
        vault::save_store(&store, &self.path)?;
        self.password = Zeroizing::new(new_password.to_string());
        self.audit(
            audit::ROTATION_OP,
            None,
            Some(&format!("records={}", count)),
        );
        Ok(count)
    }

    /// Read all audit entries from the log.
    pub fn audit_entries(&self) -> Result<Vec<AuditEntry>> {
        audit::read_entries(&self.audit_path())
    }

    /// Verify the audit chain under the current password.
    pub fn verify_audit_chain(&self) -> Result<ChainReport> {
        self.load()?.authenticate(&self.password)?;
        let key = audit::derive_audit_key(&self.password)?;
        audit::verify_chain(&self.audit_path(), &key)
    }

    // ── internal helpers ─────────────────────────────────────────

    fn audit(&self, operation: &str, secret: Option<&str>, detail: Option<&str>) {
        if !self.audit_enabled {
            return;
        }
        let result = audit::derive_audit_key(&self.password).and_then(|key| {
            audit::log_event(
                &self.audit_path(),
                operation,
                secret,
                &self.actor,
                "success",
                detail,
                &key,
            )
        });
        if let Err(e) = result {
            warn!(operation, error = %e, "failed to write audit entry");
        }
    }
}
