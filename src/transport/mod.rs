//! Network transport for the responses API
//!
//! Defines the transport seam plus the reqwest-backed implementation and an
//! in-memory mock for tests.

pub mod http;
pub mod mock;

pub use http::HttpTransport;
pub use mock::MockTransport;

use crate::credentials::Credentials;
use crate::models::{RawResponse, ResponsesRequest};
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        credentials: &Credentials,
        request: &ResponsesRequest,
    ) -> Result<RawResponse>;
}
