//! Arnipay API client.
//!
//! Every call is signed with the canonical HMAC scheme from the [`arnipay`]
//! crate and sent over a pluggable [`Transport`] (reqwest by default).
//!
//! # Quick Example
//!
//! ```no_run
//! use arnipay_client::Arnipay;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), arnipay::ArnipayError> {
//! let arnipay = Arnipay::new("your-client-id", "your-private-key", true)?;
//!
//! let url = arnipay
//!     .payment()
//!     .amount(150000.0)
//!     .title("Order 42")
//!     .create_url()
//!     .await?;
//!
//! let refunds = arnipay
//!     .transaction()
//!     .list(&[("status", "processing_refund")])
//!     .await?;
//! # let _ = (url, refunds);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
mod gateway;
pub mod payment_builder;
pub mod payment_link;
pub mod signer;
#[cfg(test)]
mod testing;
pub mod transaction;
pub mod transport;

pub use client::Client;
pub use config::ClientConfig;
pub use gateway::Arnipay;
pub use payment_builder::PaymentBuilder;
pub use payment_link::PaymentLinks;
pub use signer::{OutboundRequestSigner, SignedHeaders};
pub use transaction::Transactions;
pub use transport::{ReqwestTransport, Transport, TransportRequest, TransportResponse};

// Re-export commonly needed types from core
pub use arnipay::{ArnipayError, WebhookEvent, WebhookEventView, WebhookHandler, WebhookScheme};
