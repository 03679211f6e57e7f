//! # codecommit-credential
//!
//! Git credential helper for AWS CodeCommit.
//!
//! Reads Git's credential-helper requests, resolves an AWS identity (optionally
//! assuming an IAM role), and emits the signed username and password that
//! CodeCommit's HTTPS Git endpoint accepts.
//!
//! ## Quick Start
//!
//! ```sh
//! git config --global credential.helper '!codecommit credential-helper $@'
//! git config --global credential.UseHttpPath true
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod cli;
pub mod codecommit;
pub mod config;
pub mod error;
pub mod git;
pub mod template;

pub use crate::cli::Cli;
pub use crate::error::CredentialError;

/// The current version of codecommit-credential.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
