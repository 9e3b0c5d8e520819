use serde_json::{Map, Value};
use thiserror::Error;

/// Errors returned by Arnipay operations.
///
/// Messages never contain secrets or expected signature values.
#[derive(Debug, Error)]
pub enum ArnipayError {
    /// Network or connection failure; no HTTP status was received.
    #[error("transport error: {0}")]
    Transport(String),

    /// The gateway answered with a status code >= 400.
    #[error("gateway error ({status}): {message}")]
    Http {
        status: u16,
        message: String,
        errors: Option<Map<String, Value>>,
    },

    /// Webhook signature did not match.
    #[error("Invalid webhook signature")]
    Authentication,

    /// Webhook body was not valid JSON.
    #[error("Invalid JSON payload: {0}")]
    MalformedPayload(String),

    /// Webhook body was JSON but not a `{event, data}` object.
    #[error("Invalid webhook payload: {0}")]
    Schema(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

impl ArnipayError {
    /// HTTP status associated with this failure, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ArnipayError::Http { status, .. } => Some(*status),
            ArnipayError::Authentication => Some(401),
            ArnipayError::MalformedPayload(_) => Some(400),
            ArnipayError::Schema(_) => Some(422),
            _ => None,
        }
    }

    /// Validation errors reported by the gateway, keyed by field.
    pub fn errors(&self) -> Option<&Map<String, Value>> {
        match self {
            ArnipayError::Http { errors, .. } => errors.as_ref(),
            _ => None,
        }
    }
}
