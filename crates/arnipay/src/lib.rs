//! Request signing and webhook verification for the Arnipay payment gateway.
//!
//! # Canonical signing (`CanonicalSigningV1`)
//!
//! Outbound API calls and inbound webhooks share one signature format: an
//! HMAC-SHA256 over a newline-joined canonical string of method, URI,
//! timestamp, client id and the base64 SHA-256 of the body. See
//! [`signature`] for the exact layout.
//!
//! # Simple shared secret (`SimpleSharedSecret`)
//!
//! An older webhook format signs only the raw body:
//! `X-Webhook-Signature: sha256=<hex>`. See [`SimpleVerifier`].
//!
//! # Quick example (webhook)
//!
//! ```no_run
//! use arnipay::WebhookHandler;
//! use http::HeaderMap;
//!
//! let handler = WebhookHandler::new("whsec_...");
//! # let headers = HeaderMap::new();
//! # let body = "";
//! match handler.process(Some("POST"), Some("/webhooks/arnipay"), &headers, body) {
//!     Ok(Some(event)) if event.is_paid() => {
//!         println!("paid: {:?}", event.get_str("payment_id"));
//!     }
//!     Ok(_) => {}
//!     Err(e) => eprintln!("rejected ({:?}): {e}", e.status_code()),
//! }
//! ```

pub mod constants;
pub mod error;
pub mod event;
pub mod handler;
pub mod hmac;
pub mod security;
pub mod signature;
pub mod webhook;

#[cfg(feature = "actix")]
pub mod actix;

pub use constants::*;
pub use error::ArnipayError;
pub use event::{WebhookEvent, WebhookEventView};
pub use handler::{WebhookHandler, WebhookScheme};
pub use signature::{build_canonical_string, extract_uri, SignatureService};
pub use webhook::{CanonicalVerifier, SimpleVerifier, WebhookRequest};
