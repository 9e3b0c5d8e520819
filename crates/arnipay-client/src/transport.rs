//! HTTP transport seam. The client only builds and signs requests; sending
//! them is delegated to a [`Transport`].

use std::future::Future;

use arnipay::ArnipayError;
use reqwest::header::HeaderMap;
use reqwest::Method;

use crate::config::ClientConfig;

/// A fully signed request, ready to send.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Sends signed requests. Connection failures map to
/// [`ArnipayError::Transport`]; any HTTP status is a successful send.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: TransportRequest,
    ) -> impl Future<Output = Result<TransportResponse, ArnipayError>> + Send;
}

/// Default transport backed by `reqwest`. Redirects are disabled.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, ArnipayError> {
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .danger_accept_invalid_certs(!config.verify_ssl)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ArnipayError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http })
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, ArnipayError> {
        let mut builder = self
            .http
            .request(request.method, &request.url)
            .headers(request.headers);
        if !request.body.is_empty() {
            builder = builder.body(request.body);
        }

        let resp = builder
            .send()
            .await
            .map_err(|e| ArnipayError::Transport(format!("request failed: {e}")))?;

        let status = resp.status().as_u16();
        let body = resp
            .bytes()
            .await
            .map_err(|e| ArnipayError::Transport(format!("failed to read response body: {e}")))?;

        Ok(TransportResponse {
            status,
            body: body.to_vec(),
        })
    }
}
