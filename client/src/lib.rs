//! Client library for the GOFO freight/parcel REST API.
//!
//! # Overview
//! Exposes the provider's order operations — create a shipment, cancel it,
//! fetch the shipping label, query tracking events — each as a single HTTP
//! round-trip with local request validation and uniform response-envelope
//! unwrapping.
//!
//! # Design
//! - [`Client`] is built once from an immutable [`Config`] and is safe to
//!   share across threads; it holds no per-call state.
//! - Requests are validated in-process before any network call; failures
//!   aggregate every violated field into one deterministic message.
//! - Every response is the `{code, msg, msgEn, data}` envelope. Success is
//!   decided by the envelope code alone, never by the HTTP status.
//! - The transport retries transient failures a fixed number of times and
//!   classifies timeouts separately from other transport errors.
//!
//! # Example
//! ```no_run
//! use gofo_client::{Client, Config, Env};
//!
//! let client = Client::new(Config {
//!     env: Env::Test,
//!     account: "account".to_string(),
//!     password: "secret".to_string(),
//!     timeout: 30,
//!     debug: false,
//! });
//! let events = client.order().track("GF0123456789")?;
//! for event in events {
//!     println!("{} {}", event.operation_time, event.en_context);
//! }
//! # Ok::<(), gofo_client::Error>(())
//! ```

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod order;
pub mod types;

mod transport;
mod validate;

pub use client::Client;
pub use config::{Config, Env};
pub use envelope::Envelope;
pub use error::Error;
pub use order::{
    CancelOrderRequest, CreateOrderRequest, OrderConsignee, OrderGoods, OrderInsurance, OrderItem,
    OrderService, OrderShipper,
};
pub use types::{OrderCreateResult, TrackEvent};
