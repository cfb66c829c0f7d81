//! vaultkeep: a local secret store encrypted under a single password.
//!
//! Secrets keep their full version history, deletes are soft, and the store
//! password can be rotated, re-encrypting every version. The store is a JSON
//! file; the CLI is gated behind the `cli` feature and private to the binary.
//!
//! # Quick start
//!
//! ```no_run
//! use vaultkeep::api::StoreClient;
//!
//! let client = StoreClient::with_password("secrets.json", "my-password");
//! client.add("api-key", "sk-secret-value")?;
//! let value = client.get("api-key")?;
//! # Ok::<(), vaultkeep::error::VaultkeepError>(())
//! ```

pub mod api;
pub mod audit;
pub mod auth;
pub mod collate;
pub mod config;
pub mod error;
pub mod types;
pub mod vault;
