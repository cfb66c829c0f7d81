use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VaultkeepError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Secret already exists: {0} (use `update` to change it)")]
    SecretAlreadyExists(String),

    #[error("Secret not found: {0}")]
    SecretNotFound(String),

    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    #[error("Encryption error: {0}")]
    Encryption(String),

    #[error("Decryption error: {0}")]
    Decryption(String),

    #[error("Malformed store file: {0}")]
    Parse(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Audit chain integrity violation at entry {0}")]
    AuditChainBroken(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl VaultkeepError {
    /// Return a typed exit code for this error category.
    pub fn exit_code(&self) -> i32 {
        match self {
            VaultkeepError::Validation(_) => 5,
            VaultkeepError::SecretAlreadyExists(_) => 5,
            VaultkeepError::SecretNotFound(_) => 3,
            VaultkeepError::AuthFailed(_) => 2,
            VaultkeepError::Encryption(_) => 1,
            VaultkeepError::Decryption(_) => 2,
            VaultkeepError::Parse(_) => 6,
            VaultkeepError::Serialization(_) => 1,
            VaultkeepError::AuditChainBroken(_) => 1,
            VaultkeepError::Io(_) => 1,
            VaultkeepError::Other(_) => 1,
        }
    }

    /// Return a string error code identifier.
    pub fn error_code(&self) -> &'static str {
        match self {
            VaultkeepError::Validation(_) => "validation_error",
            VaultkeepError::SecretAlreadyExists(_) => "already_exists",
            VaultkeepError::SecretNotFound(_) => "not_found",
            VaultkeepError::AuthFailed(_) => "auth_failed",
            VaultkeepError::Encryption(_) => "encryption_error",
            VaultkeepError::Decryption(_) => "decryption_error",
            VaultkeepError::Parse(_) => "parse_error",
            VaultkeepError::Serialization(_) => "serialization_error",
            VaultkeepError::AuditChainBroken(_) => "audit_chain_broken",
            VaultkeepError::Io(_) => "io_error",
            VaultkeepError::Other(_) => "error",
        }
    }
}

/// JSON error response for --json mode.
#[derive(Serialize)]
pub struct JsonError {
    pub error: JsonErrorDetail,
}

#[derive(Serialize)]
pub struct JsonErrorDetail {
    pub code: String,
    pub message: String,
    pub exit_code: i32,
}

impl JsonError {
    pub fn from_error(e: &VaultkeepError) -> Self {
        Self {
            error: JsonErrorDetail {
                code: e.error_code().to_string(),
                message: e.to_string(),
                exit_code: e.exit_code(),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, VaultkeepError>;
