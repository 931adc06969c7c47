//! arkquery - minimal client for Ark-compatible multimodal responses APIs
//!
//! Sends one authenticated request built from ordered text and image-URL
//! segments to a responses endpoint and decodes the structured reply. The
//! pieces (credential resolution, request building, transport with retry,
//! response decoding) are composed by [`Client`].

pub mod client;
pub mod credentials;
pub mod error;
pub mod models;
pub mod request;
pub mod transport;

pub use client::Client;
pub use credentials::{CredentialResolver, Credentials};
pub use error::{Error, Result};
pub use models::{Config, ModelResponse, RawResponse, ResponsesRequest, Segment};
pub use request::build_request;
pub use transport::{HttpTransport, MockTransport, Transport};
