//! Git credential-helper request parsing.
//!
//! Git writes a request to the helper's standard input as `key=value` lines.
//! See <https://git-scm.com/docs/git-credential#IOFMT>.

use std::io::BufRead;
use std::sync::LazyLock;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use regex::Regex;
use tracing::debug;

use crate::error::CredentialError;

#[allow(clippy::expect_used)]
static ATTRIBUTE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+)=(.+)$").expect("valid attribute regex"));

/// Characters escaped when a request path is placed into a URL.
///
/// `%` is included so an already-escaped path stays distinct from its decoded form.
const PATH_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Characters escaped in the host. `:` (port) and `[` `]` (IPv6) pass through.
const HOST_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'@')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Attributes of a credential request that identify the remote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitRequest {
    /// URL scheme, e.g. `https`.
    pub protocol: String,
    /// Remote host name, possibly with a port.
    pub host: String,
    /// Repository path, only sent when `credential.useHttpPath` is set.
    pub path: String,
}

impl GitRequest {
    /// Reads a request until the input is exhausted.
    ///
    /// Unknown attributes and lines that are not `key=value` are skipped. When an
    /// attribute repeats, the last value wins. Bytes that are not valid UTF-8 are
    /// replaced rather than rejected; only I/O failures are errors.
    pub fn parse<R: BufRead>(mut input: R) -> Result<Self, CredentialError> {
        let mut request = Self::default();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if input
                .read_until(b'\n', &mut buf)
                .map_err(CredentialError::Read)?
                == 0
            {
                break;
            }

            let line = String::from_utf8_lossy(&buf);
            request.apply_line(line.trim_end_matches('\n').trim_end_matches('\r'));
        }

        debug!(
            protocol = %request.protocol,
            host = %request.host,
            path = %request.path,
            "Parsed credential request"
        );

        Ok(request)
    }

    fn apply_line(&mut self, line: &str) {
        let Some(captures) = ATTRIBUTE_LINE.captures(line) else {
            return;
        };

        let value = captures[2].to_string();
        match &captures[1] {
            "protocol" => self.protocol = value,
            "host" => self.host = value,
            "path" => self.path = value,
            other => debug!(key = other, "Ignoring credential request attribute"),
        }
    }

    /// Builds the remote URL as `protocol://host/path`.
    pub fn url(&self) -> String {
        let mut url = format!("{}://", self.protocol);
        url.extend(utf8_percent_encode(&self.host, HOST_ESCAPE));

        if !self.path.is_empty() {
            if !self.path.starts_with('/') {
                url.push('/');
            }
            url.extend(utf8_percent_encode(&self.path, PATH_ESCAPE));
        }

        url
    }
}
