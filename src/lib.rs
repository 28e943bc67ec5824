//! Typed Rust client for the Nexmo REST APIs.
//!
//! The crate is split into a domain layer of strong types, a transport layer
//! for wire-format details (parameter encoding, credential placement, response
//! classification, list pages), a client layer that performs the HTTP round
//! trip, and per-API namespaces that only describe request shapes.
//!
//! API-level failures are values: every call returns
//! `Result<ApiResult<T>, NexmoError>`, where the outer error covers problems
//! that prevented a response from being received.
//!
//! ```rust,no_run
//! use nexmo::{Client, Credentials};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), nexmo::NexmoError> {
//!     let client = Client::new(Credentials::key_secret("key", "secret")?);
//!
//!     let sent = client
//!         .sms()
//!         .send(&json!({"from": "Acme", "to": "447700900000", "text": "hello"}))
//!         .await?;
//!     match sent.into_result() {
//!         Ok(message) => println!("sent {}", message.message_id),
//!         Err(error) => eprintln!("rejected: {error}"),
//!     }
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod api;
pub mod client;
pub mod domain;
pub mod transport;

pub use api::{
    Account, ApiNamespace, Calls, Legs, Members, Number, Numbers, NumbersResponse, Sms, Tfa,
    Verify, VerifyCheck, VerifyStarted,
};
pub use client::{BoxFuture, Client, ClientBuilder, HttpRequest, HttpTransport, NexmoError};
pub use domain::{
    ApiKey, ApiResult, ApiSecret, AuthScheme, BearerToken, CredentialFields, Credentials,
    Encoding, ErrorInfo, Host, KeyTransform, ListPage, Method, Money, Msisdn, Params, RawResponse,
    RequestSpec, ResponseShape, SentMessage, ValidationError, is_gsm7,
};
pub use transport::{CredentialsError, EncodingError, ListCursor};
