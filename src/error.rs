//! Error taxonomy for credential issuance.

use thiserror::Error;

/// Errors raised while resolving, signing, or emitting CodeCommit credentials.
#[derive(Error, Debug)]
pub enum CredentialError {
    /// No URL was supplied by flag or configuration.
    #[error("URL not specified. Pass --url or set {0}")]
    MissingUrl(&'static str),

    /// The URL is not a CodeCommit HTTPS clone URL.
    #[error("Invalid CodeCommit URL '{url}': {reason}")]
    InvalidUrl {
        /// The URL as supplied.
        url: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Role assumption failed.
    #[error("Failed to assume role {role_arn}: {message}")]
    Authorization {
        /// ARN of the role that could not be assumed.
        role_arn: String,
        /// Message reported by the identity service.
        message: String,
    },

    /// Base AWS credentials could not be obtained.
    #[error("Failed to obtain AWS credentials: {0}")]
    CredentialService(String),

    /// The output template could not be compiled.
    #[error("Invalid template at byte {offset}: {message}")]
    TemplateSyntax {
        /// Byte offset of the offending action.
        offset: usize,
        /// Description of the problem.
        message: String,
    },

    /// Reading the credential-helper request failed.
    #[error("Failed to read credential request")]
    Read(#[source] std::io::Error),

    /// Writing rendered credentials failed.
    #[error("Failed to write credentials")]
    Write(#[source] std::io::Error),
}

impl CredentialError {
    pub(crate) fn invalid_url(url: &str, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.to_string(),
            reason: reason.into(),
        }
    }
}
