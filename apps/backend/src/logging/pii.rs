//! PII redaction for log fields.
//!
//! Emails keep their first character and domain; bearer tokens and other
//! long opaque strings are replaced wholesale.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::unwrap_used)]
static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b").unwrap());

/// Compact JWS: three base64url segments separated by dots.
#[allow(clippy::unwrap_used)]
static JWT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]{8,}\b").unwrap()
});

/// Base64 or hex runs of 16+ characters (hashes, secrets).
#[allow(clippy::unwrap_used)]
static OPAQUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z0-9+/]{16,}={0,2}").unwrap());

const REDACTED_TOKEN: &str = "[REDACTED_TOKEN]";

pub fn redact(input: &str) -> String {
    let emails = EMAIL.replace_all(input, |caps: &regex::Captures| {
        let full = &caps[0];
        match full.split_once('@') {
            Some((local, domain)) if !local.is_empty() => {
                let first: String = local.chars().take(1).collect();
                format!("{first}***@{domain}")
            }
            _ => full.to_string(),
        }
    });
    let jwts = JWT.replace_all(&emails, REDACTED_TOKEN);
    OPAQUE.replace_all(&jwts, REDACTED_TOKEN).into_owned()
}

/// Display wrapper that redacts on format, for use in tracing fields:
/// `email = %Redacted(&email)`.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}
