//! CLI interface for codecommit.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod credential;
pub mod credential_helper;

pub use credential::CredentialCommand;
pub use credential_helper::{CredentialHelperCommand, Operation};

/// codecommit: Git credentials for AWS CodeCommit.
#[derive(Parser)]
#[command(name = "codecommit")]
#[command(about = "Git credentials for AWS CodeCommit", long_about = None)]
#[command(version)]
pub struct Cli {
    /// The main command to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Main commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Emits credentials for a CodeCommit URL.
    Credential(CredentialCommand),
    /// Emits credentials for Git's credential-helper API.
    CredentialHelper(CredentialHelperCommand),
}

impl Cli {
    /// Executes the CLI command.
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Credential(credential_cmd) => credential_cmd.execute(),
            Commands::CredentialHelper(helper_cmd) => helper_cmd.execute(),
        }
    }
}
