//! Strategy-selecting webhook handler.
//!
//! The two schemes have different failure policies and are never merged:
//!
//! | Scheme | Signature header | On failure |
//! |--------|------------------|------------|
//! | [`WebhookScheme::CanonicalSigningV1`] | `X-Signature` | `Err(ArnipayError)` |
//! | [`WebhookScheme::SimpleSharedSecret`] | `X-Webhook-Signature` | `Ok(None)` |
//!
//! The canonical scheme also reads `X-Timestamp` and `X-Client-ID`.

use std::str::FromStr;

use http::HeaderMap;

use crate::constants::WEBHOOK_SIGNATURE_HEADER;
use crate::error::ArnipayError;
use crate::event::WebhookEventView;
use crate::webhook::{header_str, CanonicalVerifier, SimpleVerifier, WebhookRequest};

/// Which signing scheme inbound webhooks use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WebhookScheme {
    #[default]
    CanonicalSigningV1,
    SimpleSharedSecret,
}

impl FromStr for WebhookScheme {
    type Err = ArnipayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "canonical" | "canonical-v1" | "v1" => Ok(Self::CanonicalSigningV1),
            "simple" | "shared-secret" => Ok(Self::SimpleSharedSecret),
            other => Err(ArnipayError::Config(format!(
                "unknown webhook scheme: {other} (expected canonical-v1 or simple)"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
enum Strategy {
    Canonical(CanonicalVerifier),
    Simple(SimpleVerifier),
}

/// Verifies inbound webhooks with the configured scheme and hands back a
/// [`WebhookEventView`].
#[derive(Debug, Clone)]
pub struct WebhookHandler {
    strategy: Strategy,
}

impl WebhookHandler {
    /// Handler for the canonical scheme.
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self::with_scheme(secret, WebhookScheme::CanonicalSigningV1)
    }

    pub fn with_scheme(secret: impl Into<Vec<u8>>, scheme: WebhookScheme) -> Self {
        let strategy = match scheme {
            WebhookScheme::CanonicalSigningV1 => {
                Strategy::Canonical(CanonicalVerifier::new(secret))
            }
            WebhookScheme::SimpleSharedSecret => Strategy::Simple(SimpleVerifier::new(secret)),
        };
        Self { strategy }
    }

    /// Build from `ARNIPAY_WEBHOOK_SECRET` and `ARNIPAY_WEBHOOK_SCHEME`
    /// (default `canonical-v1`). A `.env` file is loaded first if present.
    pub fn from_env() -> Result<Self, ArnipayError> {
        dotenvy::dotenv().ok();

        let secret = std::env::var("ARNIPAY_WEBHOOK_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ArnipayError::Config("ARNIPAY_WEBHOOK_SECRET is required".into()))?;

        let scheme = match std::env::var("ARNIPAY_WEBHOOK_SCHEME") {
            Ok(s) if !s.trim().is_empty() => s.parse()?,
            _ => WebhookScheme::default(),
        };

        Ok(Self::with_scheme(secret, scheme))
    }

    pub fn scheme(&self) -> WebhookScheme {
        match self.strategy {
            Strategy::Canonical(_) => WebhookScheme::CanonicalSigningV1,
            Strategy::Simple(_) => WebhookScheme::SimpleSharedSecret,
        }
    }

    /// Verify and parse one inbound request.
    ///
    /// Canonical scheme: every failure is an `Err`; never returns `Ok(None)`.
    /// Simple scheme: never returns `Err`; every failure is `Ok(None)`.
    pub fn process(
        &self,
        method: Option<&str>,
        request_target: Option<&str>,
        headers: &HeaderMap,
        body: impl AsRef<[u8]>,
    ) -> Result<Option<WebhookEventView>, ArnipayError> {
        match &self.strategy {
            Strategy::Canonical(verifier) => {
                let request = WebhookRequest::capture(method, request_target, headers, body);
                verifier
                    .process_request(&request)
                    .map(|event| Some(event.into()))
            }
            Strategy::Simple(verifier) => {
                let signature =
                    header_str(headers, WEBHOOK_SIGNATURE_HEADER).unwrap_or_default();
                Ok(verifier.process(body, signature).map(Into::into))
            }
        }
    }

    /// Run `callback` on the verified event. The callback is not invoked when
    /// the simple scheme drops the request.
    pub fn handle<F, R>(
        &self,
        method: Option<&str>,
        request_target: Option<&str>,
        headers: &HeaderMap,
        body: impl AsRef<[u8]>,
        callback: F,
    ) -> Result<Option<R>, ArnipayError>
    where
        F: FnOnce(WebhookEventView) -> R,
    {
        Ok(self
            .process(method, request_target, headers, body)?
            .map(callback))
    }
}
