use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::rngs::OsRng;

use crate::error::{Result, VaultkeepError};

/// Longest password the store accepts, in bytes.
pub const MAX_PASSWORD_LEN: usize = 16;

/// Enforce the 1..=16 byte password policy.
pub fn check_password(password: &str) -> Result<()> {
    if password.is_empty() || password.len() > MAX_PASSWORD_LEN {
        return Err(VaultkeepError::Validation(format!(
            "password length must be between 1 and {} bytes",
            MAX_PASSWORD_LEN
        )));
    }
    Ok(())
}

/// Produce a salted Argon2id PHC string for the password.
pub fn hash(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| VaultkeepError::Other(format!("Password hashing failed: {}", e)))
}

/// Check a candidate password against a stored digest.
///
/// Accepts Argon2 PHC strings and the bcrypt digests found in legacy files.
/// Anything unparseable verifies as false.
pub fn verify(digest: &str, candidate: &str) -> bool {
    if is_bcrypt(digest) {
        return bcrypt::verify(candidate, digest).unwrap_or(false);
    }
    match PasswordHash::new(digest) {
        Ok(parsed) => Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Whether the digest predates Argon2 and should be replaced on rotation.
pub fn is_legacy(digest: &str) -> bool {
    is_bcrypt(digest)
}

fn is_bcrypt(digest: &str) -> bool {
    ["$2a$", "$2b$", "$2y$", "$2x$"]
        .iter()
        .any(|prefix| digest.starts_with(prefix))
}
