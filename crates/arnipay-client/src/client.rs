use arnipay::ArnipayError;
use reqwest::Method;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::signer::OutboundRequestSigner;
use crate::transport::{ReqwestTransport, Transport, TransportRequest, TransportResponse};

const DEFAULT_ERROR_MESSAGE: &str = "API request failed";

/// Authenticated client for the Arnipay REST API.
///
/// Every request is signed with a fresh timestamp before it reaches the
/// transport; a request that cannot be fully signed is never sent.
#[derive(Debug, Clone)]
pub struct Client<T = ReqwestTransport> {
    config: ClientConfig,
    signer: OutboundRequestSigner,
    transport: T,
}

impl Client<ReqwestTransport> {
    pub fn new(config: ClientConfig) -> Result<Self, ArnipayError> {
        config.validate()?;
        let transport = ReqwestTransport::new(&config)?;
        Self::with_transport(config, transport)
    }

    pub fn from_env() -> Result<Self, ArnipayError> {
        Self::new(ClientConfig::from_env()?)
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self, ArnipayError> {
        config.validate()?;
        let signer =
            OutboundRequestSigner::new(config.client_id.clone(), config.private_key.as_bytes());
        Ok(Self {
            config,
            signer,
            transport,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send a signed request to `endpoint` (relative to the base URL) and
    /// return the decoded JSON response.
    ///
    /// `data` is sent as a JSON body only for POST/PUT/PATCH and only when it
    /// is non-empty. Status codes >= 400 become [`ArnipayError::Http`].
    pub async fn request(
        &self,
        method: Method,
        endpoint: &str,
        data: Option<&Value>,
    ) -> Result<Value, ArnipayError> {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), endpoint);

        let body = match data {
            Some(data) if sends_body(&method) && !is_empty(data) => serde_json::to_string(data)?,
            _ => String::new(),
        };

        let headers = self
            .signer
            .sign(method.as_str(), &url, &body)
            .to_header_map()?;

        tracing::debug!(method = %method, endpoint = %endpoint, "sending API request");

        let response = self
            .transport
            .send(TransportRequest {
                method: method.clone(),
                url,
                headers,
                body,
            })
            .await
            .inspect_err(|e| {
                tracing::warn!(
                    method = %method,
                    endpoint = %endpoint,
                    error = %e,
                    "API request failed"
                )
            })?;

        decode_response(response).inspect_err(|e| {
            tracing::warn!(
                method = %method,
                endpoint = %endpoint,
                status = ?e.status_code(),
                error = %e,
                "API returned an error"
            )
        })
    }
}

fn sends_body(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH)
}

fn is_empty(data: &Value) -> bool {
    match data {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

fn decode_response(response: TransportResponse) -> Result<Value, ArnipayError> {
    if response.status >= 400 {
        let parsed: Option<Value> = serde_json::from_slice(&response.body).ok();
        let message = parsed
            .as_ref()
            .and_then(|v| v.get("message"))
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_ERROR_MESSAGE)
            .to_string();
        let errors = parsed
            .as_ref()
            .and_then(|v| v.get("errors"))
            .and_then(Value::as_object)
            .cloned();

        return Err(ArnipayError::Http {
            status: response.status,
            message,
            errors,
        });
    }

    if response.body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_slice(&response.body)?)
}

/// The response's `data` member, or `default` when it is absent or null.
pub(crate) fn take_data(mut response: Value, default: Value) -> Value {
    match response.get_mut("data").map(Value::take) {
        Some(Value::Null) | None => default,
        Some(data) => data,
    }
}
