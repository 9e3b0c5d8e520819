//! In-memory transport for unit tests.

use std::sync::Mutex;

use arnipay::ArnipayError;
use serde_json::Value;

use crate::transport::{Transport, TransportRequest, TransportResponse};

enum Reply {
    Response(TransportResponse),
    Fail(String),
}

/// Records every request and answers with a canned reply.
pub struct MockTransport {
    reply: Reply,
    requests: Mutex<Vec<TransportRequest>>,
}

impl MockTransport {
    pub fn ok(body: Value) -> Self {
        Self::status(200, body)
    }

    pub fn status(status: u16, body: Value) -> Self {
        Self::raw(status, serde_json::to_vec(&body).unwrap())
    }

    pub fn raw(status: u16, body: Vec<u8>) -> Self {
        Self {
            reply: Reply::Response(TransportResponse { status, body }),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Reply::Fail(message.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn last_request(&self) -> TransportRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, ArnipayError> {
        self.requests.lock().unwrap().push(request);
        match &self.reply {
            Reply::Response(response) => Ok(response.clone()),
            Reply::Fail(message) => Err(ArnipayError::Transport(message.clone())),
        }
    }
}
