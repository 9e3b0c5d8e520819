//! actix-web ingress adapter.
//!
//! Lets an actix handler feed a request straight into [`WebhookHandler`] and
//! return [`ArnipayError`] as an HTTP response with the matching status.

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use http::{HeaderMap, HeaderName, HeaderValue};

use crate::error::ArnipayError;
use crate::event::WebhookEventView;
use crate::handler::WebhookHandler;
use crate::webhook::WebhookRequest;

/// Copy actix headers into an `http::HeaderMap`. Headers that do not
/// round-trip are skipped.
fn header_map(req: &HttpRequest) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(req.headers().len());
    for (name, value) in req.headers().iter() {
        let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_str().as_bytes()),
            HeaderValue::from_bytes(value.as_bytes()),
        ) else {
            continue;
        };
        headers.append(name, value);
    }
    headers
}

impl WebhookRequest {
    /// Capture webhook metadata from an actix request and its raw body.
    pub fn from_actix(req: &HttpRequest, body: &[u8]) -> Self {
        let target = req.uri().to_string();
        Self::capture(
            Some(req.method().as_str()),
            Some(target.as_str()),
            &header_map(req),
            body,
        )
    }
}

impl WebhookHandler {
    pub fn process_actix(
        &self,
        req: &HttpRequest,
        body: &[u8],
    ) -> Result<Option<WebhookEventView>, ArnipayError> {
        let target = req.uri().to_string();
        self.process(
            Some(req.method().as_str()),
            Some(target.as_str()),
            &header_map(req),
            body,
        )
    }
}

impl ResponseError for ArnipayError {
    /// Inbound failures map to 401/400/422. Failures talking to the gateway
    /// are 502 whatever status upstream returned.
    fn status_code(&self) -> StatusCode {
        match self {
            ArnipayError::Authentication => StatusCode::UNAUTHORIZED,
            ArnipayError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            ArnipayError::Schema(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ArnipayError::Transport(_) | ArnipayError::Http { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (error, message) = match self {
            ArnipayError::Authentication => ("invalid_signature", "Invalid webhook signature"),
            ArnipayError::MalformedPayload(_) => ("malformed_payload", "Invalid JSON payload"),
            ArnipayError::Schema(_) => ("invalid_payload", "Invalid webhook payload"),
            ArnipayError::Transport(_) | ArnipayError::Http { .. } => {
                tracing::warn!(error = %self, "upstream request failed");
                ("gateway_error", "Upstream request failed")
            }
            _ => {
                tracing::error!(error = %self, "webhook handling failed");
                ("internal_error", "An internal error occurred")
            }
        };
        HttpResponse::build(ResponseError::status_code(self)).json(serde_json::json!({
            "error": error,
            "message": message
        }))
    }
}
