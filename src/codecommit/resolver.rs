//! Credential resolution for a clone URL.

use chrono::{DateTime, Utc};
use tracing::debug;

use super::clone_url::CloneUrl;
use super::identity::IdentityProvider;
use super::signer;
use super::Credentials;
use crate::error::CredentialError;

/// Produces Git credentials for `url`, assuming `role_arn` first when given.
pub async fn resolve(
    provider: &dyn IdentityProvider,
    url: &str,
    role_arn: Option<&str>,
) -> Result<Credentials, CredentialError> {
    resolve_at(provider, url, role_arn, Utc::now()).await
}

/// Like [`resolve`], signing at a fixed instant.
pub async fn resolve_at(
    provider: &dyn IdentityProvider,
    url: &str,
    role_arn: Option<&str>,
    now: DateTime<Utc>,
) -> Result<Credentials, CredentialError> {
    let clone_url = CloneUrl::parse(url)?;
    debug!(
        region = %clone_url.region,
        repository = %clone_url.repository,
        "Resolved clone URL"
    );

    let base = provider.base_credentials(&clone_url.region).await;

    let identity = match role_arn {
        // Without base credentials the role cannot be assumed
        Some(role_arn) => {
            let base = base.map_err(|err| CredentialError::Authorization {
                role_arn: role_arn.to_string(),
                message: err.to_string(),
            })?;
            provider
                .assume_role(&clone_url.region, role_arn, &base)
                .await?
        }
        None => base?,
    };

    Ok(signer::sign(&clone_url, &identity, now))
}
