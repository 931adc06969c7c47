use crate::credentials::Credentials;
use crate::models::{RawResponse, ResponsesRequest};
use crate::transport::Transport;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tokio_retry::strategy::ExponentialBackoff;
use tokio_retry::RetryIf;

const RESPONSES_PATH: &str = "/responses";
const DEFAULT_MAX_RETRIES: usize = 2;
const BACKOFF_BASE_MS: u64 = 200;

/// Reqwest-backed transport with bounded retry on transient failures.
pub struct HttpTransport {
    client: Client,
    base_url: String,
    max_retries: usize,
}

impl HttpTransport {
    pub fn new(base_url: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self::new_with_client(client, base_url)
    }

    pub fn new_with_client(client: Client, base_url: String) -> Self {
        Self {
            client,
            base_url,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Delays of 200ms then 400ms, each jittered by ±20%.
    fn backoff(&self) -> impl Iterator<Item = Duration> {
        ExponentialBackoff::from_millis(2)
            .factor(BACKOFF_BASE_MS / 2)
            .map(|delay| delay.mul_f64(0.8 + rand::random::<f64>() * 0.4))
            .take(self.max_retries)
    }

    async fn send_once(
        &self,
        credentials: &Credentials,
        request: &ResponsesRequest,
    ) -> Result<RawResponse> {
        let url = format!("{}{}", self.base_url, RESPONSES_PATH);
        tracing::debug!("Sending responses request for model {}", request.model);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", credentials.secret()))
            .json(request)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(classify_transport_error)?;

        if !status.is_success() {
            tracing::error!("API error (status {}): {}", status, body);
            return Err(classify_status(status, body));
        }

        Ok(RawResponse {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        credentials: &Credentials,
        request: &ResponsesRequest,
    ) -> Result<RawResponse> {
        RetryIf::spawn(
            self.backoff(),
            || async {
                match self.send_once(credentials, request).await {
                    Ok(raw) => Ok(raw),
                    Err(e) => {
                        if e.is_retryable() {
                            tracing::warn!("Request attempt failed: {}. Will retry...", e);
                        }
                        Err(e)
                    }
                }
            },
            Error::is_retryable,
        )
        .await
    }
}

fn classify_transport_error(error: reqwest::Error) -> Error {
    if error.is_timeout() {
        Error::Timeout
    } else {
        Error::Network(error.to_string())
    }
}

fn classify_status(status: StatusCode, body: String) -> Error {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::Auth(status.as_u16()),
        s if s.is_server_error() => Error::Server(s.as_u16()),
        s => Error::InvalidRequest(format!("API rejected request (status {}): {}", s, body)),
    }
}
