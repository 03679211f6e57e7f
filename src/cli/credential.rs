//! Credential command — emits CodeCommit credentials for a URL.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use crate::codecommit::{self, IdentityProvider, SdkIdentityProvider};
use crate::config::{self, ConfigSource, DirectFlags, ProcessEnv};
use crate::template::{RenderContext, Template};

/// Credential command options.
#[derive(Parser)]
#[command(
    long_about = "Emits CodeCommit credentials.

The CodeCommit URL can alternately be set from the environment variable \
\"CODECOMMIT_URL\".

Output can be templated with {{ .Credentials.Username }} and \
{{ .Credentials.Password }}. Whitespace next to an action is trimmed by \
writing {{- or -}}. No other template syntax is supported.

Example, standard Git credential helper output (the default):

  codecommit credential \\
    --url https://git-codecommit.us-east-1.amazonaws.com/v1/repos/your-repo \\
    --template 'username={{ .Credentials.Username }}
  password={{ .Credentials.Password }}
  '"
)]
pub struct CredentialCommand {
    /// Emits credentials for this clone URL [default: $CODECOMMIT_URL].
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Output template.
    #[arg(long, value_name = "TEMPLATE")]
    pub template: Option<String>,

    /// Role to assume before signing [default: $CODECOMMIT_ROLE_ARN].
    #[arg(long, value_name = "ARN")]
    pub role_arn: Option<String>,
}

impl CredentialCommand {
    /// Executes the credential command.
    pub fn execute(self) -> Result<()> {
        let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
        let mut stdout = io::stdout().lock();

        rt.block_on(self.run(&ProcessEnv, &SdkIdentityProvider, &mut stdout))
    }

    /// Resolves options, fetches credentials and renders them into `out`.
    pub async fn run<W: Write>(
        self,
        source: &dyn ConfigSource,
        provider: &dyn IdentityProvider,
        out: &mut W,
    ) -> Result<()> {
        let flags = DirectFlags {
            url: self.url,
            role_arn: self.role_arn,
            template: self.template,
        };
        let options = config::resolve_direct(flags, source)?;
        debug!(
            url = %options.url,
            role_arn = ?options.role_arn,
            "Resolved credential options"
        );

        // Compile first so a bad template fails before any AWS calls
        let template = Template::compile(&options.template)?;

        let credentials =
            codecommit::resolve(provider, &options.url, options.role_arn.as_deref()).await?;

        template.render(
            &RenderContext {
                credentials: &credentials,
            },
            out,
        )?;

        Ok(())
    }
}
