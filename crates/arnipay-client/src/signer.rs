//! Signs outgoing API requests with the canonical scheme.

use std::fmt;

use arnipay::{
    extract_uri, ArnipayError, SignatureService, CLIENT_ID_HEADER, SIGNATURE_HEADER,
    TIMESTAMP_HEADER,
};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};

/// Authentication headers for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    pub client_id: String,
    pub timestamp: i64,
    pub signature: String,
}

impl SignedHeaders {
    /// Full header set: content type plus the three authentication headers.
    pub fn to_header_map(&self) -> Result<HeaderMap, ArnipayError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            HeaderName::from_static("x-client-id"),
            header_value(CLIENT_ID_HEADER, &self.client_id)?,
        );
        headers.insert(
            HeaderName::from_static("x-timestamp"),
            HeaderValue::from(self.timestamp),
        );
        headers.insert(
            HeaderName::from_static("x-signature"),
            header_value(SIGNATURE_HEADER, &self.signature)?,
        );
        Ok(headers)
    }
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, ArnipayError> {
    HeaderValue::from_str(value).map_err(|_| {
        ArnipayError::Config(format!("{name} contains characters not allowed in a header"))
    })
}

/// Produces `X-Client-ID` / `X-Timestamp` / `X-Signature` for outgoing calls.
#[derive(Clone)]
pub struct OutboundRequestSigner {
    client_id: String,
    private_key: Vec<u8>,
    signatures: SignatureService,
}

impl fmt::Debug for OutboundRequestSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutboundRequestSigner")
            .field("client_id", &self.client_id)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

impl OutboundRequestSigner {
    pub fn new(client_id: impl Into<String>, private_key: impl Into<Vec<u8>>) -> Self {
        Self {
            client_id: client_id.into(),
            private_key: private_key.into(),
            signatures: SignatureService::new(),
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Sign with the current time. Every call takes a fresh timestamp.
    pub fn sign(&self, method: &str, url: &str, body: &str) -> SignedHeaders {
        self.sign_at(method, url, body, chrono::Utc::now().timestamp())
    }

    /// Sign with an explicit timestamp. Same inputs give the same signature.
    pub fn sign_at(&self, method: &str, url: &str, body: &str, timestamp: i64) -> SignedHeaders {
        let uri = extract_uri(url);
        let signature = self.signatures.sign(
            method,
            &uri,
            timestamp,
            &self.client_id,
            &self.private_key,
            body,
        );
        SignedHeaders {
            client_id: self.client_id.clone(),
            timestamp,
            signature,
        }
    }
}
