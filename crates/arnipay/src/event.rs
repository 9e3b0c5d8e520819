//! Verified webhook events and a read-only view over them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::{EVENT_AUTO_REFUNDED, EVENT_PAYMENT_COMPLETED, EVENT_PENDING_REFUND};
use crate::error::ArnipayError;

/// A webhook payload that passed schema validation: a JSON object with a
/// string `event` and a non-null `data` member. Other top-level keys are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct WebhookEvent {
    raw: Map<String, Value>,
}

impl WebhookEvent {
    /// Parse and validate a raw webhook body.
    ///
    /// Invalid JSON is a [`ArnipayError::MalformedPayload`]; JSON of the wrong
    /// shape is a [`ArnipayError::Schema`].
    pub fn parse(payload: &str) -> Result<Self, ArnipayError> {
        Self::from_slice(payload.as_bytes())
    }

    /// [`WebhookEvent::parse`] over raw body bytes. Bytes that are not valid
    /// UTF-8 are a [`ArnipayError::MalformedPayload`].
    pub fn from_slice(payload: &[u8]) -> Result<Self, ArnipayError> {
        let value: Value = serde_json::from_slice(payload)
            .map_err(|e| ArnipayError::MalformedPayload(e.to_string()))?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, ArnipayError> {
        match value {
            Value::Object(map) => Self::try_from(map),
            _ => Err(ArnipayError::Schema("payload is not a JSON object".into())),
        }
    }

    pub fn event(&self) -> &str {
        self.raw
            .get("event")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn data(&self) -> &Value {
        self.raw.get("data").unwrap_or(&Value::Null)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.raw
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.raw
    }
}

impl TryFrom<Map<String, Value>> for WebhookEvent {
    type Error = ArnipayError;

    fn try_from(raw: Map<String, Value>) -> Result<Self, Self::Error> {
        match raw.get("event") {
            Some(Value::String(_)) => {}
            Some(Value::Null) | None => {
                return Err(ArnipayError::Schema("missing \"event\" key".into()))
            }
            Some(_) => return Err(ArnipayError::Schema("\"event\" must be a string".into())),
        }
        match raw.get("data") {
            Some(Value::Null) | None => {
                Err(ArnipayError::Schema("missing \"data\" key".into()))
            }
            Some(_) => Ok(Self { raw }),
        }
    }
}

impl From<WebhookEvent> for Map<String, Value> {
    fn from(event: WebhookEvent) -> Self {
        event.raw
    }
}

/// Read-only accessor over webhook event data.
///
/// Field lookups check the nested `data` object first and fall back to the
/// top level, so `data` fields shadow top-level fields with the same name.
#[derive(Debug, Clone, PartialEq)]
pub struct WebhookEventView {
    raw: Value,
}

impl WebhookEventView {
    /// Wrap arbitrary event data. Use `From<WebhookEvent>` for verified events.
    pub fn from_value(raw: Value) -> Self {
        Self { raw }
    }

    /// The `event` field, if present and a string.
    pub fn kind(&self) -> Option<&str> {
        self.raw.get("event").and_then(Value::as_str)
    }

    pub fn is_paid(&self) -> bool {
        self.kind() == Some(EVENT_PAYMENT_COMPLETED)
    }

    pub fn is_pending_refund(&self) -> bool {
        self.kind() == Some(EVENT_PENDING_REFUND)
    }

    pub fn is_auto_refunded(&self) -> bool {
        self.kind() == Some(EVENT_AUTO_REFUNDED)
    }

    /// Look up a field: `data.<name>` first, then top-level `<name>`.
    ///
    /// `"type"` is an alias for the event kind.
    pub fn get(&self, name: &str) -> Option<&Value> {
        if name == "type" {
            return self.raw.get("event");
        }

        [self.raw.get("data"), Some(&self.raw)]
            .into_iter()
            .flatten()
            .filter_map(Value::as_object)
            .find_map(|candidate| candidate.get(name))
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// The nested `data` member, if any.
    pub fn data(&self) -> Option<&Value> {
        self.raw.get("data")
    }

    pub fn as_value(&self) -> &Value {
        &self.raw
    }

    pub fn into_value(self) -> Value {
        self.raw
    }
}

impl From<WebhookEvent> for WebhookEventView {
    fn from(event: WebhookEvent) -> Self {
        Self {
            raw: Value::Object(event.into_map()),
        }
    }
}
