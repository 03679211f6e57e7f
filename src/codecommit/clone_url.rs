//! CodeCommit HTTPS clone URL validation.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::error::CredentialError;

#[allow(clippy::expect_used)]
static CODECOMMIT_HOST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^git-codecommit(?:-fips)?\.([a-z0-9-]+)\.amazonaws\.com(?:\.cn)?$")
        .expect("valid host regex")
});

#[allow(clippy::expect_used)]
static REPOSITORY_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/v1/repos/([^/]+)/?$").expect("valid path regex"));

/// A validated CodeCommit clone URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneUrl {
    /// Host name the Git client connects to.
    pub host: String,
    /// URL path that is signed, e.g. `/v1/repos/demo`.
    pub path: String,
    /// AWS region encoded in the host name.
    pub region: String,
    /// Repository name.
    pub repository: String,
}

impl CloneUrl {
    /// Parses and validates a clone URL such as
    /// `https://git-codecommit.us-east-1.amazonaws.com/v1/repos/demo`.
    pub fn parse(raw: &str) -> Result<Self, CredentialError> {
        let url = Url::parse(raw).map_err(|e| CredentialError::invalid_url(raw, e.to_string()))?;

        if url.scheme() != "https" {
            return Err(CredentialError::invalid_url(
                raw,
                format!("unsupported scheme '{}', expected https", url.scheme()),
            ));
        }

        if url.port().is_some() {
            return Err(CredentialError::invalid_url(raw, "explicit ports are not supported"));
        }

        let host = url
            .host_str()
            .ok_or_else(|| CredentialError::invalid_url(raw, "missing host"))?;
        let region = CODECOMMIT_HOST
            .captures(host)
            .map(|c| c[1].to_string())
            .ok_or_else(|| {
                CredentialError::invalid_url(raw, format!("'{host}' is not a CodeCommit host"))
            })?;

        let path = url.path();
        let repository = REPOSITORY_PATH
            .captures(path)
            .map(|c| c[1].to_string())
            .ok_or_else(|| {
                CredentialError::invalid_url(raw, "path must be /v1/repos/<repository>")
            })?;

        Ok(Self {
            host: host.to_string(),
            path: path.to_string(),
            region,
            repository,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_standard_endpoint() {
        let url =
            CloneUrl::parse("https://git-codecommit.eu-west-2.amazonaws.com/v1/repos/demo").unwrap();

        assert_eq!(url.host, "git-codecommit.eu-west-2.amazonaws.com");
        assert_eq!(url.path, "/v1/repos/demo");
        assert_eq!(url.region, "eu-west-2");
        assert_eq!(url.repository, "demo");
    }

    #[test]
    fn parses_fips_and_china_endpoints() {
        let fips =
            CloneUrl::parse("https://git-codecommit-fips.us-gov-west-1.amazonaws.com/v1/repos/r")
                .unwrap();
        assert_eq!(fips.region, "us-gov-west-1");

        let china =
            CloneUrl::parse("https://git-codecommit.cn-north-1.amazonaws.com.cn/v1/repos/r/")
                .unwrap();
        assert_eq!(china.region, "cn-north-1");
        assert_eq!(china.repository, "r");
        assert_eq!(china.path, "/v1/repos/r/");
    }

    #[test]
    fn ignores_userinfo() {
        let url =
            CloneUrl::parse("https://someone@git-codecommit.us-east-1.amazonaws.com/v1/repos/demo")
                .unwrap();
        assert_eq!(url.host, "git-codecommit.us-east-1.amazonaws.com");
    }

    #[test]
    fn rejects_degenerate_url() {
        let err = CloneUrl::parse("://").unwrap_err();
        assert!(matches!(err, CredentialError::InvalidUrl { .. }));
    }

    #[test]
    fn rejects_other_shapes() {
        for raw in [
            "http://git-codecommit.us-east-1.amazonaws.com/v1/repos/demo",
            "https://github.com/v1/repos/demo",
            "https://git-codecommit.us-east-1.amazonaws.com:8443/v1/repos/demo",
            "https://git-codecommit.us-east-1.amazonaws.com/v1/repos/",
            "https://git-codecommit.us-east-1.amazonaws.com/v1/repos/a/b",
            "https://git-codecommit.us-east-1.amazonaws.com",
            "ssh://git-codecommit.us-east-1.amazonaws.com/v1/repos/demo",
        ] {
            let err = CloneUrl::parse(raw).unwrap_err();
            assert!(
                matches!(err, CredentialError::InvalidUrl { .. }),
                "expected InvalidUrl for {raw}"
            );
        }
    }
}
