//! Typed Rust client for the Clickatell REST message API.
//!
//! The crate is split into a domain layer of strong types, a transport layer for the
//! wire format, and a small client layer that validates, batches and posts requests.
//! Recipient lists longer than [`MAX_BATCH_RECIPIENTS`] are sent as consecutive batches
//! with a pause between them.
//!
//! ```rust,no_run
//! use clickatell::{ClickatellClient, Credentials, TracingLogger};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), clickatell::ClickatellError> {
//!     let client = ClickatellClient::builder(Credentials::new("...")?)
//!         .logger(TracingLogger)
//!         .build()?;
//!     let response = client.send_message("hello", ["27999000001"]).await?;
//!     for message in &response.messages {
//!         println!("{} -> {:?}", message.to, message.api_message_id);
//!     }
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    ClickatellClient, ClickatellClientBuilder, ClickatellError, DEFAULT_BULK_BATCH_DELAY,
    ErrorKind, SmsLogger, TracingLogger,
};
pub use domain::{
    Credentials, MAX_BATCH_RECIPIENTS, Message, MessageError, MessageText, RawPhoneNumber,
    SendMessage, SendMessageResponse, ValidationError,
};
