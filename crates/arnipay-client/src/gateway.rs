use arnipay::{ArnipayError, WebhookHandler};
use reqwest::Method;
use serde_json::{json, Value};

use crate::client::{take_data, Client};
use crate::config::ClientConfig;
use crate::payment_builder::PaymentBuilder;
use crate::payment_link::PaymentLinks;
use crate::transaction::Transactions;
use crate::transport::{ReqwestTransport, Transport};

/// Entry point bundling the signed client with its endpoint groups.
#[derive(Debug, Clone)]
pub struct Arnipay<T = ReqwestTransport> {
    client: Client<T>,
}

impl Arnipay<ReqwestTransport> {
    /// Production client, or the sandbox when `sandbox` is set.
    pub fn new(
        client_id: impl Into<String>,
        private_key: impl Into<String>,
        sandbox: bool,
    ) -> Result<Self, ArnipayError> {
        let mut config = ClientConfig::new(client_id, private_key);
        if sandbox {
            config = config.sandbox();
        }
        Ok(Self::with_client(Client::new(config)?))
    }

    pub fn from_env() -> Result<Self, ArnipayError> {
        Ok(Self::with_client(Client::from_env()?))
    }
}

impl<T: Transport> Arnipay<T> {
    pub fn with_client(client: Client<T>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Client<T> {
        &self.client
    }

    /// Start building a payment link.
    pub fn payment(&self) -> PaymentBuilder<'_, T> {
        PaymentBuilder::new(&self.client)
    }

    pub fn payment_links(&self) -> PaymentLinks<'_, T> {
        PaymentLinks::new(&self.client)
    }

    pub fn transaction(&self) -> Transactions<'_, T> {
        Transactions::new(&self.client)
    }

    /// Webhook handler for the canonical scheme keyed with `secret`.
    pub fn webhook(&self, secret: impl Into<Vec<u8>>) -> WebhookHandler {
        WebhookHandler::new(secret)
    }

    /// Payment methods enabled for this merchant.
    pub async fn payment_methods(&self) -> Result<Value, ArnipayError> {
        let response = self
            .client
            .request(Method::GET, "/payment_methods", None)
            .await?;
        Ok(take_data(response, json!([])))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockTransport;
    use arnipay::WebhookScheme;

    fn arnipay(transport: MockTransport) -> Arnipay<MockTransport> {
        let config = ClientConfig::new("demo-client", "pk");
        Arnipay::with_client(Client::with_transport(config, transport).unwrap())
    }

    #[test]
    fn sandbox_flag_selects_base_url() {
        let live = Arnipay::new("demo-client", "pk", false).unwrap();
        assert_eq!(live.client().config().base_url, arnipay::DEFAULT_BASE_URL);

        let sandbox = Arnipay::new("demo-client", "pk", true).unwrap();
        assert_eq!(sandbox.client().config().base_url, arnipay::SANDBOX_BASE_URL);
    }

    #[test]
    fn rejects_missing_credentials() {
        assert!(matches!(
            Arnipay::new("", "pk", false),
            Err(ArnipayError::Config(_))
        ));
    }

    #[tokio::test]
    async fn payment_methods_returns_data() {
        let sdk = arnipay(MockTransport::ok(json!({"data": ["card", "qr"]})));
        assert_eq!(sdk.payment_methods().await.unwrap(), json!(["card", "qr"]));
        assert_eq!(
            sdk.client().transport().last_request().url,
            "https://arnipay.com.py/api/v1/payment_methods"
        );
    }

    #[tokio::test]
    async fn payment_methods_defaults_to_empty() {
        let sdk = arnipay(MockTransport::ok(json!({"message": "ok"})));
        assert_eq!(sdk.payment_methods().await.unwrap(), json!([]));
    }

    #[test]
    fn webhook_uses_canonical_scheme() {
        let sdk = arnipay(MockTransport::ok(json!({})));
        assert_eq!(sdk.webhook("whsec").scheme(), WebhookScheme::CanonicalSigningV1);
    }
}
