//! CodeCommit Git password signing.
//!
//! CodeCommit accepts a SigV4 signature over a synthetic `GIT` request as the
//! HTTPS password. The signature covers only the repository path and host.

use std::time::SystemTime;

use aws_sigv4::sign::v4;
use chrono::{DateTime, Utc};

use super::clone_url::CloneUrl;
use super::identity::AwsCredentials;
use super::Credentials;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";
const SERVICE: &str = "codecommit";

/// Signs Git credentials for `clone_url` at instant `now`.
pub fn sign(clone_url: &CloneUrl, aws: &AwsCredentials, now: DateTime<Utc>) -> Credentials {
    let timestamp = now.format("%Y%m%dT%H%M%S").to_string();
    let date = now.format("%Y%m%d");

    let canonical_request = format!("GIT\n{}\n\nhost:{}\n\nhost\n", clone_url.path, clone_url.host);
    let scope = format!("{date}/{}/{SERVICE}/aws4_request", clone_url.region);
    let string_to_sign = format!(
        "{ALGORITHM}\n{timestamp}\n{scope}\n{}",
        v4::sha256_hex_string(canonical_request.as_bytes())
    );

    let signing_key = v4::generate_signing_key(
        &aws.secret_access_key,
        SystemTime::from(now),
        &clone_url.region,
        SERVICE,
    );
    let signature = v4::calculate_signature(signing_key, string_to_sign.as_bytes());

    let username = match &aws.session_token {
        Some(token) => format!("{}%{token}", aws.access_key_id),
        None => aws.access_key_id.clone(),
    };

    Credentials {
        username,
        password: format!("{timestamp}Z{signature}"),
    }
}
