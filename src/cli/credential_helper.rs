//! Credential-helper command — speaks Git's credential-helper protocol.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, warn};

use crate::codecommit::{self, IdentityProvider, SdkIdentityProvider};
use crate::config::{self, ConfigSource, ProcessEnv};
use crate::error::CredentialError;
use crate::git::GitRequest;
use crate::template::{self, DEFAULT_TEMPLATE};

/// Credential-helper command options.
#[derive(Parser)]
#[command(
    long_about = "Emits credentials for Git's credential-helper API.

See: https://git-scm.com/docs/api-credentials#_credential_helpers for more details.

Only the \"get\" operation produces output. \"store\" and \"erase\" are accepted \
and do nothing. A role to assume can be set with CODECOMMIT_ROLE_ARN.

Example usage:

  git clone --config=credential.helper='!codecommit credential-helper $@' \\
    --config=credential.UseHttpPath=true \\
    https://git-codecommit.us-east-1.amazonaws.com/v1/repos/your-repo ."
)]
pub struct CredentialHelperCommand {
    /// Operation requested by Git: get, store or erase.
    #[arg(value_name = "OPERATION")]
    pub operation: String,
}

/// Credential-helper operations defined by Git.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Return credentials for the request.
    Get,
    /// Remember credentials Git reports as working.
    Store,
    /// Forget credentials Git reports as rejected.
    Erase,
}

impl Operation {
    /// Maps an operation name to an operation. Unknown names are treated as `get`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "get" => Self::Get,
            "store" => Self::Store,
            "erase" => Self::Erase,
            other => {
                warn!(operation = other, "Unknown credential helper operation, treating as get");
                Self::Get
            }
        }
    }
}

impl CredentialHelperCommand {
    /// Executes the credential-helper command.
    pub fn execute(self) -> Result<()> {
        let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
        let stdin = io::stdin().lock();
        let mut stdout = io::stdout().lock();

        rt.block_on(self.run(stdin, &ProcessEnv, &SdkIdentityProvider, &mut stdout))
    }

    /// Reads a request from `input` and answers it on `out`.
    pub async fn run<R: BufRead, W: Write>(
        self,
        mut input: R,
        source: &dyn ConfigSource,
        provider: &dyn IdentityProvider,
        out: &mut W,
    ) -> Result<()> {
        let operation = Operation::from_name(&self.operation);

        if operation != Operation::Get {
            // Nothing is cached, so there is nothing to store or erase
            io::copy(&mut input, &mut io::sink()).map_err(CredentialError::Read)?;
            debug!(?operation, "Ignoring credential helper operation");
            return Ok(());
        }

        let request = GitRequest::parse(input)?;
        let url = request.url();
        let role_arn = config::resolve_role_arn(source);

        let credentials = codecommit::resolve(provider, &url, role_arn.as_deref()).await?;
        template::render(DEFAULT_TEMPLATE, &credentials, out)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_names() {
        assert_eq!(Operation::from_name("get"), Operation::Get);
        assert_eq!(Operation::from_name("store"), Operation::Store);
        assert_eq!(Operation::from_name("erase"), Operation::Erase);
        assert_eq!(Operation::from_name("capability"), Operation::Get);
    }
}
