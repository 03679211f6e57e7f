//! Configuration resolution.
//!
//! Command-line flags always win. When a flag is absent or empty, the value is
//! looked up through a [`ConfigSource`], which in production is the process
//! environment.

use std::collections::HashMap;
use std::env;

use crate::error::CredentialError;
use crate::template::DEFAULT_TEMPLATE;

/// Variable holding the clone URL for direct mode.
pub const URL_ENV: &str = "CODECOMMIT_URL";

/// Variable holding the ARN of a role to assume before signing.
pub const ROLE_ARN_ENV: &str = "CODECOMMIT_ROLE_ARN";

/// Lookup of named configuration values.
pub trait ConfigSource {
    /// Returns the value for `key`, if set.
    fn get(&self, key: &str) -> Option<String>;
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl ConfigSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

impl ConfigSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

/// Flag values given to the `credential` command.
#[derive(Debug, Clone, Default)]
pub struct DirectFlags {
    /// `--url`
    pub url: Option<String>,
    /// `--role-arn`
    pub role_arn: Option<String>,
    /// `--template`
    pub template: Option<String>,
}

/// Fully resolved options for the `credential` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectOptions {
    /// Clone URL to sign for.
    pub url: String,
    /// Role to assume first, if any.
    pub role_arn: Option<String>,
    /// Output template.
    pub template: String,
}

/// Resolves direct-mode options from flags with configuration fallback.
pub fn resolve_direct(
    flags: DirectFlags,
    source: &dyn ConfigSource,
) -> Result<DirectOptions, CredentialError> {
    let url = non_empty(flags.url)
        .or_else(|| non_empty(source.get(URL_ENV)))
        .ok_or(CredentialError::MissingUrl(URL_ENV))?;

    let role_arn = non_empty(flags.role_arn).or_else(|| resolve_role_arn(source));
    let template = non_empty(flags.template).unwrap_or_else(|| DEFAULT_TEMPLATE.to_string());

    Ok(DirectOptions {
        url,
        role_arn,
        template,
    })
}

/// Resolves the role ARN from configuration alone.
pub fn resolve_role_arn(source: &dyn ConfigSource) -> Option<String> {
    non_empty(source.get(ROLE_ARN_ENV))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const URL: &str = "https://git-codecommit.us-east-1.amazonaws.com/v1/repos/demo";
    const ROLE: &str = "arn:aws:iam::123456789012:role/reader";

    fn source(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn flags_take_precedence() {
        let env = source(&[(URL_ENV, "https://env.example/"), (ROLE_ARN_ENV, "env-role")]);
        let flags = DirectFlags {
            url: Some(URL.to_string()),
            role_arn: Some(ROLE.to_string()),
            template: Some("{{ .Credentials.Password }}".to_string()),
        };

        let options = resolve_direct(flags, &env).unwrap();

        assert_eq!(options.url, URL);
        assert_eq!(options.role_arn.as_deref(), Some(ROLE));
        assert_eq!(options.template, "{{ .Credentials.Password }}");
    }

    #[test]
    fn empty_flags_fall_back_to_configuration() {
        let env = source(&[(URL_ENV, URL), (ROLE_ARN_ENV, ROLE)]);
        let flags = DirectFlags {
            url: Some(String::new()),
            role_arn: Some(String::new()),
            template: Some(String::new()),
        };

        let options = resolve_direct(flags, &env).unwrap();

        assert_eq!(options.url, URL);
        assert_eq!(options.role_arn.as_deref(), Some(ROLE));
        assert_eq!(options.template, DEFAULT_TEMPLATE);
    }

    #[test]
    fn missing_url_is_an_error() {
        let err = resolve_direct(DirectFlags::default(), &source(&[])).unwrap_err();
        assert!(matches!(err, CredentialError::MissingUrl(URL_ENV)));

        let err = resolve_direct(DirectFlags::default(), &source(&[(URL_ENV, "")])).unwrap_err();
        assert!(matches!(err, CredentialError::MissingUrl(_)));
    }

    #[test]
    fn role_arn_is_optional() {
        let options = resolve_direct(DirectFlags::default(), &source(&[(URL_ENV, URL)])).unwrap();
        assert_eq!(options.role_arn, None);

        assert_eq!(resolve_role_arn(&source(&[(ROLE_ARN_ENV, "")])), None);
    }

    #[test]
    fn process_env_reads_variables() {
        const KEY: &str = "CODECOMMIT_CREDENTIAL_TEST_PROCESS_ENV";

        env::set_var(KEY, "value");
        assert_eq!(ProcessEnv.get(KEY).as_deref(), Some("value"));

        env::remove_var(KEY);
        assert_eq!(ProcessEnv.get(KEY), None);
    }

    #[test]
    fn empty_process_env_url_is_missing() {
        // Only this test touches the real variable
        env::set_var(URL_ENV, "");
        let err = resolve_direct(DirectFlags::default(), &ProcessEnv).unwrap_err();
        env::remove_var(URL_ENV);

        assert!(matches!(err, CredentialError::MissingUrl(URL_ENV)));
    }
}
