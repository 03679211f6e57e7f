//! AWS identity resolution.
//!
//! Base credentials come from the SDK default provider chain (environment,
//! shared profiles, SSO, container and instance metadata). Role assumption
//! goes through STS.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use aws_config::sts::AssumeRoleProvider;
use aws_config::{BehaviorVersion, ConfigLoader, Region};
use aws_credential_types::provider::ProvideCredentials;
use aws_credential_types::Credentials;
use tracing::{debug, info};

use crate::error::CredentialError;

/// Session name recorded in CloudTrail for assumed-role sessions.
pub const ROLE_SESSION_NAME: &str = "codecommit-credential";

/// AWS access keys used to sign Git credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct AwsCredentials {
    /// Access key id.
    pub access_key_id: String,
    /// Secret access key.
    pub secret_access_key: String,
    /// Session token for temporary credentials.
    pub session_token: Option<String>,
}

impl fmt::Debug for AwsCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| "** redacted **"),
            )
            .finish()
    }
}

impl From<&Credentials> for AwsCredentials {
    fn from(creds: &Credentials) -> Self {
        Self {
            access_key_id: creds.access_key_id().to_string(),
            secret_access_key: creds.secret_access_key().to_string(),
            session_token: creds.session_token().map(str::to_string),
        }
    }
}

/// Future returned by [`IdentityProvider`] methods.
pub type IdentityFuture<'a> =
    Pin<Box<dyn Future<Output = Result<AwsCredentials, CredentialError>> + Send + 'a>>;

/// Source of AWS identities for signing.
pub trait IdentityProvider: Send + Sync {
    /// Resolves the caller's own credentials for `region`.
    fn base_credentials<'a>(&'a self, region: &'a str) -> IdentityFuture<'a>;

    /// Exchanges `base` for credentials of the role `role_arn`.
    fn assume_role<'a>(
        &'a self,
        region: &'a str,
        role_arn: &'a str,
        base: &'a AwsCredentials,
    ) -> IdentityFuture<'a>;
}

/// Identity provider backed by the AWS SDK.
#[derive(Debug, Default, Clone, Copy)]
pub struct SdkIdentityProvider;

impl SdkIdentityProvider {
    fn config_loader(region: &str) -> ConfigLoader {
        aws_config::defaults(BehaviorVersion::latest()).region(Region::new(region.to_string()))
    }
}

impl IdentityProvider for SdkIdentityProvider {
    fn base_credentials<'a>(&'a self, region: &'a str) -> IdentityFuture<'a> {
        Box::pin(async move {
            let config = Self::config_loader(region).load().await;
            let provider = config.credentials_provider().ok_or_else(|| {
                CredentialError::CredentialService("no credentials provider configured".to_string())
            })?;

            info!(region, "Resolving AWS credentials from default provider chain");
            let creds = provider
                .provide_credentials()
                .await
                .map_err(|e| CredentialError::CredentialService(e.to_string()))?;

            debug!(access_key_id = creds.access_key_id(), "Resolved base credentials");
            Ok(AwsCredentials::from(&creds))
        })
    }

    fn assume_role<'a>(
        &'a self,
        region: &'a str,
        role_arn: &'a str,
        base: &'a AwsCredentials,
    ) -> IdentityFuture<'a> {
        Box::pin(async move {
            let base_provider = Credentials::new(
                &base.access_key_id,
                &base.secret_access_key,
                base.session_token.clone(),
                None,
                "codecommit-base",
            );
            let config = Self::config_loader(region)
                .credentials_provider(base_provider)
                .load()
                .await;

            info!(role_arn, region, "Assuming role");
            let provider = AssumeRoleProvider::builder(role_arn)
                .session_name(ROLE_SESSION_NAME)
                .configure(&config)
                .build()
                .await;

            let creds = provider.provide_credentials().await.map_err(|e| {
                CredentialError::Authorization {
                    role_arn: role_arn.to_string(),
                    message: e.to_string(),
                }
            })?;

            debug!(access_key_id = creds.access_key_id(), "Assumed role");
            Ok(AwsCredentials::from(&creds))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_secrets() {
        let creds = AwsCredentials {
            access_key_id: "AKIDEXAMPLE".to_string(),
            secret_access_key: "very-secret".to_string(),
            session_token: Some("session-token".to_string()),
        };

        let rendered = format!("{creds:?}");
        assert!(rendered.contains("AKIDEXAMPLE"));
        assert!(!rendered.contains("very-secret"));
        assert!(!rendered.contains("session-token"));
    }

    #[test]
    fn converts_sdk_credentials() {
        let sdk = Credentials::new("AKID", "secret", Some("token".to_string()), None, "test");
        let creds = AwsCredentials::from(&sdk);
        assert_eq!(creds.access_key_id, "AKID");
        assert_eq!(creds.secret_access_key, "secret");
        assert_eq!(creds.session_token.as_deref(), Some("token"));
    }
}
