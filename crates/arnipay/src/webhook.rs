//! Inbound webhook verification.
//!
//! Two signing schemes are supported and kept separate:
//!
//! - [`CanonicalVerifier`] (`CanonicalSigningV1`): HMAC over the canonical
//!   string (method, URI, timestamp, client id, body hash) carried in
//!   `X-Signature`. Failures are reported as errors.
//! - [`SimpleVerifier`] (`SimpleSharedSecret`): HMAC over the raw body carried
//!   in `X-Webhook-Signature: sha256=<hex>`. Failures yield `None`.

use std::fmt;

use http::HeaderMap;

use crate::constants::{
    CLIENT_ID_HEADER, DEFAULT_WEBHOOK_METHOD, ORIGINAL_URI_HEADER, SIGNATURE_HEADER,
    TIMESTAMP_HEADER,
};
use crate::error::ArnipayError;
use crate::event::WebhookEvent;
use crate::hmac::{compute_prefixed_hmac, verify_hmac};
use crate::security::signature_matches;
use crate::signature::{extract_uri, SignatureService};

/// Metadata of one inbound webhook request, captured from the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookRequest {
    pub method: String,
    pub request_uri: String,
    pub timestamp: String,
    pub client_id: String,
    /// Raw body bytes, exactly as received.
    pub payload: Vec<u8>,
    pub signature: String,
}

impl WebhookRequest {
    /// Map transport-level request data to webhook metadata.
    ///
    /// - `method` defaults to `POST` and is uppercased.
    /// - The URI comes from `request_target`, falling back to the
    ///   `X-Original-URI` header, then `/`; it is always reduced to `path?query`.
    /// - Missing `X-Timestamp`, `X-Client-ID` and `X-Signature` headers become
    ///   empty strings.
    /// - The body is kept as raw bytes; it is not required to be UTF-8.
    pub fn capture(
        method: Option<&str>,
        request_target: Option<&str>,
        headers: &HeaderMap,
        body: impl AsRef<[u8]>,
    ) -> Self {
        let method = method
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_WEBHOOK_METHOD)
            .to_uppercase();

        let raw_uri = request_target
            .filter(|t| !t.is_empty())
            .or_else(|| header_str(headers, ORIGINAL_URI_HEADER).filter(|t| !t.is_empty()))
            .unwrap_or("/");

        Self {
            method,
            request_uri: extract_uri(raw_uri),
            timestamp: header_string(headers, TIMESTAMP_HEADER),
            client_id: header_string(headers, CLIENT_ID_HEADER),
            payload: body.as_ref().to_vec(),
            signature: header_string(headers, SIGNATURE_HEADER),
        }
    }
}

pub(crate) fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

fn header_string(headers: &HeaderMap, name: &str) -> String {
    header_str(headers, name).unwrap_or_default().to_string()
}

/// Read the leading integer of `timestamp`, the way the gateway casts it.
///
/// Leading whitespace and one sign are allowed, anything after the digits is
/// ignored, and out-of-range values saturate. No leading digits means `0`.
fn parse_timestamp(timestamp: &str) -> i64 {
    let trimmed = timestamp.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, b| {
            let digit = i64::from(b - b'0');
            if negative {
                acc.saturating_mul(10).saturating_sub(digit)
            } else {
                acc.saturating_mul(10).saturating_add(digit)
            }
        })
}

/// Verifier for the canonical multi-field scheme.
///
/// The caller-supplied client id is used only as signing input; binding a
/// client id to a specific secret is the caller's responsibility.
#[derive(Clone)]
pub struct CanonicalVerifier {
    secret: Vec<u8>,
    signatures: SignatureService,
}

impl fmt::Debug for CanonicalVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CanonicalVerifier")
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl CanonicalVerifier {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
            signatures: SignatureService::new(),
        }
    }

    /// Check a signature against the request it claims to cover.
    pub fn verify(
        &self,
        method: &str,
        request_uri: &str,
        timestamp: &str,
        client_id: &str,
        payload: impl AsRef<[u8]>,
        signature: &str,
    ) -> bool {
        let expected = self.signatures.sign(
            method,
            request_uri,
            parse_timestamp(timestamp),
            client_id,
            &self.secret,
            payload,
        );
        signature_matches(&expected, signature)
    }

    /// Verify, then parse. Checks run in a fixed order: signature (401),
    /// JSON validity (400), event shape (422).
    pub fn process(
        &self,
        method: &str,
        request_uri: &str,
        timestamp: &str,
        client_id: &str,
        payload: impl AsRef<[u8]>,
        signature: &str,
    ) -> Result<WebhookEvent, ArnipayError> {
        let payload = payload.as_ref();
        if !self.verify(method, request_uri, timestamp, client_id, payload, signature) {
            tracing::warn!(
                method = %method,
                uri = %request_uri,
                client_id = %client_id,
                "rejected webhook with invalid signature"
            );
            return Err(ArnipayError::Authentication);
        }

        let event = WebhookEvent::from_slice(payload).inspect_err(|e| {
            tracing::warn!(uri = %request_uri, error = %e, "rejected webhook payload");
        })?;

        tracing::debug!(event = %event.event(), client_id = %client_id, "webhook verified");
        Ok(event)
    }

    pub fn process_request(
        &self,
        request: &WebhookRequest,
    ) -> Result<WebhookEvent, ArnipayError> {
        self.process(
            &request.method,
            &request.request_uri,
            &request.timestamp,
            &request.client_id,
            &request.payload,
            &request.signature,
        )
    }

    pub fn capture_request(
        &self,
        method: Option<&str>,
        request_target: Option<&str>,
        headers: &HeaderMap,
        body: impl AsRef<[u8]>,
    ) -> WebhookRequest {
        WebhookRequest::capture(method, request_target, headers, body)
    }

    /// Capture and process in one step.
    pub fn handle_request(
        &self,
        method: Option<&str>,
        request_target: Option<&str>,
        headers: &HeaderMap,
        body: impl AsRef<[u8]>,
    ) -> Result<WebhookEvent, ArnipayError> {
        let request = self.capture_request(method, request_target, headers, body);
        self.process_request(&request)
    }
}

/// Verifier for the simple shared-secret scheme: `hmac_sha256(payload, secret)`.
#[derive(Clone)]
pub struct SimpleVerifier {
    secret: Vec<u8>,
}

impl fmt::Debug for SimpleVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleVerifier")
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl SimpleVerifier {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// The expected header value for `payload`, including the `sha256=` prefix.
    pub fn signature_header(&self, payload: impl AsRef<[u8]>) -> String {
        compute_prefixed_hmac(&self.secret, payload)
    }

    /// Accepts the signature with or without the `sha256=` prefix.
    pub fn verify(&self, payload: impl AsRef<[u8]>, signature: &str) -> bool {
        verify_hmac(&self.secret, payload, signature)
    }

    /// Verify, then parse. Every failure yields `None`.
    pub fn process(&self, payload: impl AsRef<[u8]>, signature: &str) -> Option<WebhookEvent> {
        let payload = payload.as_ref();
        if !self.verify(payload, signature) {
            tracing::warn!("dropped webhook with invalid signature");
            return None;
        }

        match WebhookEvent::from_slice(payload) {
            Ok(event) => Some(event),
            Err(e) => {
                tracing::warn!(error = %e, "dropped webhook payload");
                None
            }
        }
    }
}
