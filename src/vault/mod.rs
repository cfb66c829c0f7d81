pub mod crypto;
pub mod secret;

use std::fs;
use std::io::Write;

use tracing::{debug, info};

use crate::auth::verifier;
use crate::collate;
use crate::error::{Result, VaultkeepError};
use crate::types::*;
use crate::vault::crypto::CipherSuite;
use crate::vault::secret::{Entry, Record, RecordInfo};

/// The in-memory representation of a store file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretStore {
    /// Verifier digest; empty until the first entry is added.
    #[serde(rename = "password", default)]
    pub password_hash: String,
    #[serde(default)]
    pub cipher: CipherSuite,
    #[serde(rename = "data", default, deserialize_with = "null_as_empty")]
    pub entries: BTreeMap<String, Entry>,
}

/// Older writers emit `"data": null` for a store that never held an entry.
fn null_as_empty<'de, D>(
    deserializer: D,
) -> std::result::Result<BTreeMap<String, Entry>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}

impl SecretStore {
    /// Create a new empty store sealing with the given suite.
    pub fn new(cipher: CipherSuite) -> Self {
        Self {
            password_hash: String::new(),
            cipher,
            entries: BTreeMap::new(),
        }
    }

    pub fn has_password(&self) -> bool {
        !self.password_hash.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_password() && self.entries.is_empty()
    }

    /// Check the password against the stored digest.
    pub fn authenticate(&self, password: &str) -> Result<()> {
        if !self.has_password() {
            return Err(VaultkeepError::AuthFailed(
                "store has no password yet; add a secret first".into(),
            ));
        }
        if !verifier::verify(&self.password_hash, password) {
            return Err(VaultkeepError::AuthFailed("wrong password".into()));
        }
        Ok(())
    }

    /// Add a secret. The first add establishes the store password; adding over
    /// a deleted entry brings it back with its history intact.
    pub fn add(&mut self, password: &str, name: &str, value: &str) -> Result<()> {
        let new_hash = if self.has_password() {
            self.authenticate(password)?;
            None
        } else {
            verifier::check_password(password)?;
            Some(password)
        };
        check_name(name)?;
        check_value(value)?;
        if self.entries.get(name).is_some_and(|e| !e.deleted) {
            return Err(VaultkeepError::SecretAlreadyExists(name.to_string()));
        }

        let record = self.seal(password, value)?;
        // Hash last so a failure above leaves the store untouched.
        if let Some(password) = new_hash {
            self.password_hash = verifier::hash(password)?;
            info!("store password established");
        }
        match self.entries.get_mut(name) {
            Some(entry) => {
                debug!(name, "reactivating deleted entry");
                entry.push(record);
            }
            None => {
                self.entries.insert(name.to_string(), Entry::new(record));
            }
        }
        Ok(())
    }

    /// Decrypt the current version of an active entry.
    pub fn read(&self, password: &str, name: &str) -> Result<String> {
        self.authenticate(password)?;
        let entry = self
            .entries
            .get(name)
            .filter(|e| !e.deleted)
            .ok_or_else(|| VaultkeepError::SecretNotFound(name.to_string()))?;
        let record = entry
            .current()
            .ok_or_else(|| VaultkeepError::Parse(format!("entry '{}' has no records", name)))?;
        self.cipher.open(&record.data, password)
    }

    /// Append a new version to an existing entry, deleted or not.
    pub fn update(&mut self, password: &str, name: &str, value: &str) -> Result<()> {
        self.authenticate(password)?;
        check_name(name)?;
        check_value(value)?;
        if !self.entries.contains_key(name) {
            return Err(VaultkeepError::Validation(format!(
                "cannot update '{}': no such entry",
                name
            )));
        }

        let record = self.seal(password, value)?;
        if let Some(entry) = self.entries.get_mut(name) {
            entry.push(record);
        }
        Ok(())
    }

    /// Tombstone an entry. Its history is kept.
    pub fn delete(&mut self, password: &str, name: &str) -> Result<()> {
        self.authenticate(password)?;
        let entry = self
            .entries
            .get_mut(name)
            .ok_or_else(|| VaultkeepError::SecretNotFound(name.to_string()))?;
        entry.deleted = true;
        Ok(())
    }

    /// Re-encrypt every record of every entry under a new password.
    ///
    /// All new ciphertexts are staged first; the store changes only if every
    /// record decrypted. Returns the number of records rewritten.
    pub fn rotate_password(&mut self, old: &str, new: &str) -> Result<usize> {
        self.authenticate(old)?;
        verifier::check_password(new)?;

        let mut staged: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut count = 0;
        for (name, entry) in &self.entries {
            let mut sealed = Vec::with_capacity(entry.history.len());
            for (i, record) in entry.history.iter().enumerate() {
                let plaintext = zeroize::Zeroizing::new(
                    self.cipher.open(&record.data, old).map_err(|e| {
                        VaultkeepError::Decryption(format!(
                            "record {} of '{}' cannot be re-encrypted: {}",
                            i, name, e
                        ))
                    })?,
                );
                sealed.push(self.cipher.seal(&plaintext, new)?);
            }
            count += sealed.len();
            staged.insert(name.clone(), sealed);
        }
        let new_hash = verifier::hash(new)?;

        for (name, sealed) in staged {
            if let Some(entry) = self.entries.get_mut(&name) {
                for (record, data) in entry.history.iter_mut().zip(sealed) {
                    record.data = data;
                }
            }
        }
        if verifier::is_legacy(&self.password_hash) {
            info!("replacing legacy bcrypt digest with argon2");
        }
        self.password_hash = new_hash;
        info!(records = count, "store password rotated");
        Ok(count)
    }

    /// Names of entries that are not deleted, in display order.
    pub fn list_active_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, e)| !e.deleted)
            .map(|(name, _)| name.clone())
            .collect();
        collate::sort_names(&mut names);
        names
    }

    /// Version metadata for an entry, including deleted ones.
    pub fn history(&self, password: &str, name: &str) -> Result<Vec<RecordInfo>> {
        self.authenticate(password)?;
        let entry = self
            .entries
            .get(name)
            .ok_or_else(|| VaultkeepError::SecretNotFound(name.to_string()))?;
        let current = entry.current_index();
        Ok(entry
            .history
            .iter()
            .enumerate()
            .map(|(index, r)| RecordInfo {
                index,
                time: r.time,
                current: Some(index) == current,
            })
            .collect())
    }

    fn seal(&self, password: &str, value: &str) -> Result<Record> {
        Ok(Record {
            time: Utc::now(),
            data: self.cipher.seal(value, password)?,
        })
    }

    /// Reject files that break the data model's invariants.
    fn validate(&self) -> Result<()> {
        if !self.has_password() && !self.entries.is_empty() {
            return Err(VaultkeepError::Parse(
                "store has entries but no password hash".into(),
            ));
        }
        if self.has_password() && self.entries.is_empty() {
            return Err(VaultkeepError::Parse(
                "store has a password hash but no entries".into(),
            ));
        }
        if let Some((name, _)) = self.entries.iter().find(|(_, e)| e.history.is_empty()) {
            return Err(VaultkeepError::Parse(format!(
                "entry '{}' has an empty history",
                name
            )));
        }
        if self.entries.contains_key("") {
            return Err(VaultkeepError::Parse("entry with an empty name".into()));
        }
        Ok(())
    }
}

fn check_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(VaultkeepError::Validation("secret name is empty".into()));
    }
    Ok(())
}

fn check_value(value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(VaultkeepError::Validation("secret value is empty".into()));
    }
    Ok(())
}

/// Get the default vaultkeep directory path (~/.vaultkeep).
pub fn vaultkeep_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(".vaultkeep"))
        .ok_or_else(|| VaultkeepError::Other("Could not determine home directory".into()))
}

/// Get the default store file path.
pub fn default_store_path() -> Result<PathBuf> {
    Ok(vaultkeep_dir()?.join("secrets.json"))
}

/// Get the config file path.
pub fn config_path() -> Result<PathBuf> {
    Ok(vaultkeep_dir()?.join("vaultkeep.toml"))
}

/// The audit log kept beside a store file.
pub fn audit_path(store_path: &Path) -> PathBuf {
    let mut name = store_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "secrets.json".into());
    name.push(".audit");
    store_path.with_file_name(name)
}

/// Load a store from disk. A missing or blank file is an empty store; an empty
/// store adopts `preferred` since nothing has been sealed yet.
pub fn load_store(path: &Path, preferred: CipherSuite) -> Result<SecretStore> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "store file missing, starting empty");
            return Ok(SecretStore::new(preferred));
        }
        Err(e) => return Err(e.into()),
    };
    if bytes.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(SecretStore::new(preferred));
    }

    let mut store: SecretStore =
        serde_json::from_slice(&bytes).map_err(|e| VaultkeepError::Parse(e.to_string()))?;
    store.validate()?;
    if store.is_empty() {
        store.cipher = preferred;
    }
    Ok(store)
}

/// Serialize and save the store with atomic rename.
pub fn save_store(store: &SecretStore, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }

    let json =
        serde_json::to_vec(store).map_err(|e| VaultkeepError::Serialization(e.to_string()))?;

    // Atomic write: write to temp file, then rename
    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);
    if let Err(e) = write_private(&tmp_path, &json).and_then(|()| fs::rename(&tmp_path, path)) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    info!(path = %path.display(), entries = store.entries.len(), "store saved");
    Ok(())
}

/// Create (or truncate) a file readable only by its owner and write `bytes`.
fn write_private(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}
