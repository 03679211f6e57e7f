//! AWS CodeCommit Git credentials.

use std::fmt;

pub mod clone_url;
pub mod identity;
pub mod resolver;
pub mod signer;

#[cfg(test)]
pub(crate) mod test_utils;

pub use clone_url::CloneUrl;
pub use identity::{AwsCredentials, IdentityFuture, IdentityProvider, SdkIdentityProvider};
pub use resolver::{resolve, resolve_at};

/// Username and password accepted by CodeCommit's HTTPS Git endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Access key id, followed by `%<session token>` for temporary credentials.
    pub username: String,
    /// Signing timestamp and SigV4 signature.
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"** redacted **")
            .finish()
    }
}
