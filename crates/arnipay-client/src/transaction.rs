use arnipay::ArnipayError;
use reqwest::Method;
use serde_json::{json, Value};

use crate::client::{take_data, Client};
use crate::payment_link::reason_body;
use crate::transport::Transport;

/// Transaction endpoints (`/transactions`).
#[derive(Debug)]
pub struct Transactions<'a, T> {
    client: &'a Client<T>,
}

impl<'a, T: Transport> Transactions<'a, T> {
    pub fn new(client: &'a Client<T>) -> Self {
        Self { client }
    }

    /// List transactions, e.g. `list(&[("link_payment_id", "10"), ("page", "1")])`.
    pub async fn list(&self, filters: &[(&str, &str)]) -> Result<Value, ArnipayError> {
        let response = self
            .client
            .request(Method::GET, &list_endpoint(filters), None)
            .await?;
        Ok(take_data(response, json!([])))
    }

    pub async fn get(&self, id: &str) -> Result<Value, ArnipayError> {
        let endpoint = format!("/transactions/{}", urlencoding::encode(id));
        let response = self.client.request(Method::GET, &endpoint, None).await?;
        Ok(take_data(response, json!({})))
    }

    /// Reverse (refund) a transaction.
    pub async fn reverse(&self, id: &str, reason: Option<&str>) -> Result<Value, ArnipayError> {
        let endpoint = format!("/transactions/{}/reverse", urlencoding::encode(id));
        let response = self
            .client
            .request(Method::POST, &endpoint, Some(&reason_body(reason)))
            .await?;
        Ok(take_data(response, json!({})))
    }
}

fn list_endpoint(filters: &[(&str, &str)]) -> String {
    if filters.is_empty() {
        return "/transactions".to_string();
    }
    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(filters)
        .finish();
    format!("/transactions?{query}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::testing::MockTransport;

    fn client(transport: MockTransport) -> Client<MockTransport> {
        Client::with_transport(ClientConfig::new("demo-client", "pk"), transport).unwrap()
    }

    #[test]
    fn filters_are_url_encoded() {
        assert_eq!(list_endpoint(&[]), "/transactions");
        assert_eq!(
            list_endpoint(&[("link_payment_id", "10"), ("page", "1")]),
            "/transactions?link_payment_id=10&page=1"
        );
        assert_eq!(
            list_endpoint(&[("status", "paid & settled")]),
            "/transactions?status=paid+%26+settled"
        );
    }

    #[tokio::test]
    async fn list_hits_filtered_endpoint() {
        let client = client(MockTransport::ok(json!({"data": []})));
        Transactions::new(&client)
            .list(&[("link_payment_id", "10"), ("page", "1")])
            .await
            .unwrap();
        assert_eq!(
            client.transport().last_request().url,
            "https://arnipay.com.py/api/v1/transactions?link_payment_id=10&page=1"
        );
    }

    #[tokio::test]
    async fn get_returns_data() {
        let client = client(MockTransport::ok(json!({"data": {"id": "tx-123"}})));
        let tx = Transactions::new(&client).get("tx-123").await.unwrap();
        assert_eq!(tx["id"], "tx-123");
        assert_eq!(
            client.transport().last_request().url,
            "https://arnipay.com.py/api/v1/transactions/tx-123"
        );
    }

    #[tokio::test]
    async fn reverse_posts_reason() {
        let client = client(MockTransport::ok(json!({"data": {"status": "processing_refund"}})));
        let result = Transactions::new(&client)
            .reverse("tx-123", Some("Refund"))
            .await
            .unwrap();
        assert_eq!(result["status"], "processing_refund");

        let sent = client.transport().last_request();
        assert_eq!(sent.method, Method::POST);
        assert_eq!(sent.url, "https://arnipay.com.py/api/v1/transactions/tx-123/reverse");
        assert_eq!(sent.body, r#"{"reason":"Refund"}"#);
    }

    #[tokio::test]
    async fn reverse_without_reason_sends_no_body() {
        let client = client(MockTransport::ok(json!({"data": {}})));
        Transactions::new(&client).reverse("tx-123", None).await.unwrap();
        assert!(client.transport().last_request().body.is_empty());
    }
}
