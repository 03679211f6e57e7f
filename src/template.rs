//! Output templates for issued credentials.
//!
//! Templates use a reduced form of Go template syntax: literal text with
//! `{{ .Credentials.Username }}` and `{{ .Credentials.Password }}` actions.
//! `{{- ` and ` -}}` trim whitespace next to an action. Nothing else is
//! recognized inside an action.

use std::io::Write;

use crate::codecommit::Credentials;
use crate::error::CredentialError;

/// Template producing Git credential-helper output.
pub const DEFAULT_TEMPLATE: &str = "username={{ .Credentials.Username }}
password={{ .Credentials.Password }}
";

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Values available to a template.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Credentials being emitted.
    pub credentials: &'a Credentials,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Username,
    Password,
}

impl Field {
    fn from_path(path: &str) -> Option<Self> {
        match path {
            ".Credentials.Username" => Some(Self::Username),
            ".Credentials.Password" => Some(Self::Password),
            _ => None,
        }
    }

    fn value<'a>(self, context: &RenderContext<'a>) -> &'a str {
        match self {
            Self::Username => &context.credentials.username,
            Self::Password => &context.credentials.password,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment<'t> {
    Text(&'t str),
    Field(Field),
}

/// A compiled template.
#[derive(Debug, Clone)]
pub struct Template<'t> {
    segments: Vec<Segment<'t>>,
}

impl<'t> Template<'t> {
    /// Compiles `source`, rejecting unclosed actions and unknown fields.
    pub fn compile(source: &'t str) -> Result<Self, CredentialError> {
        let mut segments = Vec::new();
        let mut rest = source;
        let mut offset = 0;

        while let Some(start) = rest.find(OPEN) {
            let mut text = &rest[..start];
            let after_open = &rest[start + OPEN.len()..];
            let end = after_open.find(CLOSE).ok_or_else(|| CredentialError::TemplateSyntax {
                offset: offset + start,
                message: "unclosed action".to_string(),
            })?;

            let mut action = &after_open[..end];
            let trim_before = trim_marker_prefix(action);
            if let Some(stripped) = trim_before {
                action = stripped;
                text = text.trim_end();
            }
            let trim_after = trim_marker_suffix(action);
            if let Some(stripped) = trim_after {
                action = stripped;
            }

            if !text.is_empty() {
                segments.push(Segment::Text(text));
            }

            let path = action.trim();
            if path.is_empty() {
                return Err(CredentialError::TemplateSyntax {
                    offset: offset + start,
                    message: "empty action".to_string(),
                });
            }
            let field = Field::from_path(path).ok_or_else(|| CredentialError::TemplateSyntax {
                offset: offset + start,
                message: format!(
                    "unknown field '{path}', expected .Credentials.Username or .Credentials.Password"
                ),
            })?;
            segments.push(Segment::Field(field));

            let consumed = start + OPEN.len() + end + CLOSE.len();
            rest = &rest[consumed..];
            offset += consumed;

            if trim_after.is_some() {
                let trimmed = rest.trim_start();
                offset += rest.len() - trimmed.len();
                rest = trimmed;
            }
        }

        if !rest.is_empty() {
            segments.push(Segment::Text(rest));
        }

        Ok(Self { segments })
    }

    /// Writes the template to `out`.
    pub fn render<W: Write>(
        &self,
        context: &RenderContext<'_>,
        out: &mut W,
    ) -> Result<(), CredentialError> {
        for segment in &self.segments {
            let chunk = match segment {
                Segment::Text(text) => *text,
                Segment::Field(field) => field.value(context),
            };
            out.write_all(chunk.as_bytes()).map_err(CredentialError::Write)?;
        }
        out.flush().map_err(CredentialError::Write)
    }
}

/// Strips a leading `-` trim marker, which must be followed by whitespace.
fn trim_marker_prefix(action: &str) -> Option<&str> {
    action
        .strip_prefix('-')
        .filter(|rest| rest.starts_with(char::is_whitespace))
}

/// Strips a trailing `-` trim marker, which must be preceded by whitespace.
fn trim_marker_suffix(action: &str) -> Option<&str> {
    action
        .strip_suffix('-')
        .filter(|rest| rest.ends_with(char::is_whitespace))
}

/// Compiles `template` and renders `credentials` through it into `out`.
pub fn render<W: Write>(
    template: &str,
    credentials: &Credentials,
    out: &mut W,
) -> Result<(), CredentialError> {
    let compiled = Template::compile(template)?;
    compiled.render(&RenderContext { credentials }, out)
}
