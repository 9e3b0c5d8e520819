//! Canonical request signing shared by outbound API calls and inbound webhooks.
//!
//! The canonical string is five fields joined by `\n`, in this exact order:
//!
//! ```text
//! UPPER(method)
//! uri                      (path + optional "?query", no scheme/host)
//! timestamp                (unix seconds, plain decimal)
//! identifier               (client id)
//! base64(sha256(body))     (standard alphabet, padded)
//! ```
//!
//! The signature is `hex(hmac_sha256(canonical, secret))`. Note the body hash
//! is base64 while the outer MAC is hex.

use base64::Engine;
use sha2::{Digest, Sha256};
use url::Url;

/// Base used to resolve relative request targets such as `/webhook?x=1`.
const RELATIVE_BASE: &str = "http://localhost";

/// Build the canonical string that is the exact HMAC input.
///
/// `body` is hashed as raw bytes; it need not be valid UTF-8.
pub fn build_canonical_string(
    method: &str,
    uri: &str,
    timestamp: i64,
    identifier: &str,
    body: impl AsRef<[u8]>,
) -> String {
    let body_hash =
        base64::engine::general_purpose::STANDARD.encode(Sha256::digest(body.as_ref()));

    [
        method.to_uppercase(),
        uri.to_string(),
        timestamp.to_string(),
        identifier.to_string(),
        body_hash,
    ]
    .join("\n")
}

/// Extract the `path?query` portion of a URL.
///
/// The path defaults to `/`; the query is appended only when non-empty.
/// Relative targets (`/a/b?x=1`) are accepted as-is. Anything that fails to
/// parse yields `/`.
pub fn extract_uri(url: &str) -> String {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            match Url::parse(RELATIVE_BASE).and_then(|base| base.join(url)) {
                Ok(parsed) => parsed,
                Err(_) => return "/".to_string(),
            }
        }
        Err(_) => return "/".to_string(),
    };

    let path = match parsed.path() {
        "" => "/",
        path => path,
    };

    match parsed.query() {
        Some(query) if !query.is_empty() => format!("{path}?{query}"),
        _ => path.to_string(),
    }
}

/// Computes canonical-scheme signatures. Stateless; the secret is passed per
/// call and is never logged.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignatureService;

impl SignatureService {
    pub fn new() -> Self {
        Self
    }

    /// Sign a request. Returns 64 lowercase hex characters.
    pub fn sign(
        &self,
        method: &str,
        uri: &str,
        timestamp: i64,
        identifier: &str,
        secret: &[u8],
        body: impl AsRef<[u8]>,
    ) -> String {
        let canonical = self.canonical_string(method, uri, timestamp, identifier, body);
        crate::hmac::compute_hmac(secret, canonical.as_bytes())
    }

    pub fn canonical_string(
        &self,
        method: &str,
        uri: &str,
        timestamp: i64,
        identifier: &str,
        body: impl AsRef<[u8]>,
    ) -> String {
        build_canonical_string(method, uri, timestamp, identifier, body)
    }

    pub fn extract_uri(&self, url: &str) -> String {
        extract_uri(url)
    }
}
