pub mod verifier;

use std::env;
use std::io::IsTerminal;

use zeroize::Zeroizing;

pub const VAULTKEEP_PASSWORD_ENV: &str = "VAULTKEEP_PASSWORD";
pub const VAULTKEEP_NEW_PASSWORD_ENV: &str = "VAULTKEEP_NEW_PASSWORD";
pub const VAULTKEEP_NON_INTERACTIVE_ENV: &str = "VAULTKEEP_NON_INTERACTIVE";

/// Check if we are in non-interactive mode.
/// Returns true if stdin is not a TTY or VAULTKEEP_NON_INTERACTIVE=1 is set.
pub fn is_non_interactive() -> bool {
    if env::var(VAULTKEEP_NON_INTERACTIVE_ENV)
        .map(|v| v == "1")
        .unwrap_or(false)
    {
        return true;
    }
    !std::io::stdin().is_terminal()
}

/// Read the store password from VAULTKEEP_PASSWORD, if set.
pub fn password_from_env() -> Option<Zeroizing<String>> {
    env::var(VAULTKEEP_PASSWORD_ENV).ok().map(Zeroizing::new)
}

/// Read the replacement password from VAULTKEEP_NEW_PASSWORD, if set.
pub fn new_password_from_env() -> Option<Zeroizing<String>> {
    env::var(VAULTKEEP_NEW_PASSWORD_ENV).ok().map(Zeroizing::new)
}
