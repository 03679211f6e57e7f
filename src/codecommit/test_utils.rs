//! Shared test utilities for the `codecommit` module.

use std::sync::{Arc, Mutex};

use super::identity::{AwsCredentials, IdentityFuture, IdentityProvider};
use crate::error::CredentialError;

/// A call observed by [`RecordingIdentityProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    /// `base_credentials(region)`.
    Base(String),
    /// `assume_role(region, role_arn, base)`.
    AssumeRole {
        region: String,
        role_arn: String,
        base_access_key_id: String,
    },
}

/// Identity provider that records calls and returns canned identities.
///
/// Base credentials use access key `AKIDBASE` without a session token; assumed
/// roles use `AKIDROLE` with session token `role-session-token`.
#[derive(Default)]
pub(crate) struct RecordingIdentityProvider {
    calls: Arc<Mutex<Vec<Call>>>,
    fail_base: bool,
    fail_role: bool,
}

impl RecordingIdentityProvider {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Makes `base_credentials` fail with a service error.
    pub(crate) fn failing_base(mut self) -> Self {
        self.fail_base = true;
        self
    }

    /// Makes `assume_role` fail with an authorization error.
    pub(crate) fn failing_role(mut self) -> Self {
        self.fail_role = true;
        self
    }

    /// Returns the calls made so far, in order.
    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: Call) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

impl IdentityProvider for RecordingIdentityProvider {
    fn base_credentials<'a>(&'a self, region: &'a str) -> IdentityFuture<'a> {
        Box::pin(async move {
            self.record(Call::Base(region.to_string()));
            if self.fail_base {
                return Err(CredentialError::CredentialService(
                    "no credentials in chain".to_string(),
                ));
            }
            Ok(AwsCredentials {
                access_key_id: "AKIDBASE".to_string(),
                secret_access_key: "base-secret".to_string(),
                session_token: None,
            })
        })
    }

    fn assume_role<'a>(
        &'a self,
        region: &'a str,
        role_arn: &'a str,
        base: &'a AwsCredentials,
    ) -> IdentityFuture<'a> {
        Box::pin(async move {
            self.record(Call::AssumeRole {
                region: region.to_string(),
                role_arn: role_arn.to_string(),
                base_access_key_id: base.access_key_id.clone(),
            });
            if self.fail_role {
                return Err(CredentialError::Authorization {
                    role_arn: role_arn.to_string(),
                    message: "AccessDenied".to_string(),
                });
            }
            Ok(AwsCredentials {
                access_key_id: "AKIDROLE".to_string(),
                secret_access_key: "role-secret".to_string(),
                session_token: Some("role-session-token".to_string()),
            })
        })
    }
}
