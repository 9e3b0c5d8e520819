use arnipay::ArnipayError;
use reqwest::Method;
use serde_json::{json, Map, Value};

use crate::client::{take_data, Client};
use crate::transport::Transport;

/// Payment-link endpoints (`/payment`).
#[derive(Debug)]
pub struct PaymentLinks<'a, T> {
    client: &'a Client<T>,
}

impl<'a, T: Transport> PaymentLinks<'a, T> {
    pub fn new(client: &'a Client<T>) -> Self {
        Self { client }
    }

    /// Create a payment link. Keys in `options` override `price`/`title`;
    /// `description`, when given, is applied last.
    pub async fn create(
        &self,
        price: f64,
        title: &str,
        description: Option<&str>,
        options: Map<String, Value>,
    ) -> Result<Value, ArnipayError> {
        self.create_from_body(create_body(price, title, description, options))
            .await
    }

    pub(crate) async fn create_from_body(
        &self,
        body: Map<String, Value>,
    ) -> Result<Value, ArnipayError> {
        let response = self
            .client
            .request(Method::POST, "/payment", Some(&Value::Object(body)))
            .await?;
        Ok(take_data(response, json!({})))
    }

    pub async fn get(&self, id: &str) -> Result<Value, ArnipayError> {
        let endpoint = format!("/payment/{}", urlencoding::encode(id));
        let response = self.client.request(Method::GET, &endpoint, None).await?;
        Ok(take_data(response, json!({})))
    }

    pub async fn list(&self) -> Result<Value, ArnipayError> {
        let response = self.client.request(Method::GET, "/payment", None).await?;
        Ok(take_data(response, json!([])))
    }

    /// Reverse (refund) the payment made through a link.
    pub async fn reverse(&self, id: &str, reason: Option<&str>) -> Result<Value, ArnipayError> {
        let endpoint = format!("/payment/{}/reverse", urlencoding::encode(id));
        let response = self
            .client
            .request(Method::POST, &endpoint, Some(&reason_body(reason)))
            .await?;
        Ok(take_data(response, json!({})))
    }
}

pub(crate) fn create_body(
    price: f64,
    title: &str,
    description: Option<&str>,
    options: Map<String, Value>,
) -> Map<String, Value> {
    let mut body = Map::new();
    body.insert("price".into(), json!(price));
    body.insert("title".into(), json!(title));
    body.extend(options);
    if let Some(description) = description {
        body.insert("description".into(), json!(description));
    }
    body
}

pub(crate) fn reason_body(reason: Option<&str>) -> Value {
    let mut body = Map::new();
    if let Some(reason) = reason {
        body.insert("reason".into(), json!(reason));
    }
    Value::Object(body)
}
