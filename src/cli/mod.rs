pub mod add;
pub mod audit;
pub mod common;
pub mod config;
pub mod delete;
pub mod get;
pub mod history;
pub mod json_output;
pub mod list;
pub mod passwd;
pub mod update;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "vaultkeep", version, about = "Local password-encrypted secret store")]
pub struct Cli {
    /// Output results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Store file (defaults to the config value, then ~/.vaultkeep/secrets.json)
    #[arg(long, global = true, env = "VAULTKEEP_FILE")]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a secret (reads value from stdin); the first add sets the store password
    Add {
        /// Secret name
        name: String,
    },

    /// Decrypt and print the current value of a secret
    Get {
        /// Secret name
        name: String,
    },

    /// Record a new version of an existing secret (reads value from stdin)
    Update {
        /// Secret name
        name: String,
    },

    /// Hide a secret; its history is kept and `add` brings it back
    Delete {
        /// Secret name
        name: String,
    },

    /// List active secret names
    List,

    /// Show the version history of a secret
    History {
        /// Secret name
        name: String,
    },

    /// Change the store password, re-encrypting every version
    Passwd {
        /// New password (prompted for if omitted)
        #[arg(long, env = "VAULTKEEP_NEW_PASSWORD", hide_env_values = true)]
        new_password: Option<String>,
    },

    /// View and verify audit logs
    Audit {
        #[command(subcommand)]
        command: AuditCommands,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum AuditCommands {
    /// Show recent audit log entries
    Show {
        /// Number of entries to show (0 = all)
        #[arg(long, short = 'n', default_value = "20")]
        count: usize,
    },
    /// Verify audit log integrity
    Verify,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
}
