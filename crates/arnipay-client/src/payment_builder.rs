use arnipay::ArnipayError;
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::client::Client;
use crate::payment_link::PaymentLinks;
use crate::transport::Transport;

/// Fluent builder for payment links.
///
/// ```no_run
/// # async fn demo(arnipay: arnipay_client::Arnipay) -> Result<(), arnipay::ArnipayError> {
/// let url = arnipay
///     .payment()
///     .amount(150000.0)
///     .title("Order 42")
///     .allow(["card", "qr"])
///     .redirect("https://shop.example/ok", Some("https://shop.example/fail"))
///     .create_url()
///     .await?;
/// # Ok(()) }
/// ```
#[derive(Debug)]
pub struct PaymentBuilder<'a, T> {
    client: &'a Client<T>,
    amount: Option<f64>,
    title: Option<String>,
    description: Option<String>,
    extra: Map<String, Value>,
    error: Option<serde_json::Error>,
}

impl<'a, T: Transport> PaymentBuilder<'a, T> {
    pub fn new(client: &'a Client<T>) -> Self {
        Self {
            client,
            amount: None,
            title: None,
            description: None,
            extra: Map::new(),
            error: None,
        }
    }

    pub fn amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Restrict the payment methods offered on the link.
    pub fn allow<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let methods: Vec<String> = methods.into_iter().map(Into::into).collect();
        self.extra.insert("payment_methods".into(), json!(methods));
        self
    }

    /// Merchant-side reference echoed back in webhooks.
    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.extra.insert("reference".into(), Value::String(reference.into()));
        self
    }

    pub fn redirect(mut self, success: impl Into<String>, failure: Option<&str>) -> Self {
        self.extra
            .insert("approved_redirection_url".into(), Value::String(success.into()));
        if let Some(failure) = failure {
            self.extra
                .insert("failed_redirection_url".into(), json!(failure));
        }
        self
    }

    /// Any other field accepted by the `/payment` endpoint.
    /// A value that fails to serialize makes [`into_body`](Self::into_body) fail.
    pub fn with(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        match serde_json::to_value(value) {
            Ok(value) => {
                self.extra.insert(key.into(), value);
            }
            Err(e) if self.error.is_none() => self.error = Some(e),
            Err(_) => {}
        }
        self
    }

    /// The request body this builder would send.
    pub fn into_body(self) -> Result<Map<String, Value>, ArnipayError> {
        if let Some(e) = self.error {
            return Err(ArnipayError::SerdeError(e));
        }
        let amount = self
            .amount
            .ok_or_else(|| ArnipayError::InvalidRequest("payment amount is required".into()))?;
        let title = self
            .title
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ArnipayError::InvalidRequest("payment title is required".into()))?;

        Ok(crate::payment_link::create_body(
            amount,
            title,
            self.description.as_deref(),
            self.extra,
        ))
    }

    /// Create the payment link and return the API's `data` object.
    pub async fn create(self) -> Result<Value, ArnipayError> {
        let client = self.client;
        let body = self.into_body()?;
        PaymentLinks::new(client).create_from_body(body).await
    }

    /// Create the payment link and return only its checkout URL.
    pub async fn create_url(self) -> Result<Option<String>, ArnipayError> {
        let link = self.create().await?;
        Ok(link.get("url").and_then(Value::as_str).map(str::to_string))
    }
}
