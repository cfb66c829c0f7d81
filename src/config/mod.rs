use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, VaultkeepError};
use crate::vault::crypto::CipherSuite;

/// Configuration file format (~/.vaultkeep/vaultkeep.toml).
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub audit: AuditConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
    /// Store file; defaults to ~/.vaultkeep/secrets.json
    pub path: Option<PathBuf>,
    /// Cipher suite for newly created stores
    #[serde(default = "default_cipher")]
    pub cipher: CipherSuite,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: None,
            cipher: default_cipher(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

fn default_cipher() -> CipherSuite {
    CipherSuite::Aes128Gcm
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load config from a path. Returns default config if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| VaultkeepError::Other(format!("Invalid config: {}", e)))?;
        Ok(config)
    }

    /// Resolve the store file: explicit override, then config, then the default.
    pub fn store_path(&self, explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }
        match &self.store.path {
            Some(path) => Ok(path.clone()),
            None => crate::vault::default_store_path(),
        }
    }
}
