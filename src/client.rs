//! Client facade composing credential resolution, request building, the
//! transport, and response decoding into one call surface.

use std::time::Duration;

use crate::credentials::{CredentialResolver, Credentials};
use crate::models::{ModelResponse, Segment};
use crate::request::build_request;
use crate::transport::{HttpTransport, Transport};
use crate::Result;

/// Stateless-per-call client for a responses-API endpoint. Credentials and
/// endpoint configuration are fixed at construction; the client is safe to
/// reuse across sequential calls.
pub struct Client {
    credentials: Credentials,
    transport: Box<dyn Transport>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

impl Client {
    pub fn new(credentials: Credentials, base_url: String, timeout: Duration) -> Self {
        Self::with_transport(credentials, Box::new(HttpTransport::new(base_url, timeout)))
    }

    pub fn with_transport(credentials: Credentials, transport: Box<dyn Transport>) -> Self {
        Self {
            credentials,
            transport,
        }
    }

    /// Resolve credentials once, up front. Fails with `MissingCredential`
    /// before any network activity when no source yields a key.
    pub fn from_resolver(
        resolver: &CredentialResolver,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self> {
        let credentials = resolver.resolve()?;
        Ok(Self::new(credentials, base_url, timeout))
    }

    /// Send one multimodal request and decode the reply. Short-circuits on
    /// the first failing stage: build, send, decode.
    pub async fn create(&self, model: &str, segments: &[Segment]) -> Result<ModelResponse> {
        let request = build_request(model, segments)?;
        tracing::debug!(
            "Dispatching request: model {}, {} segment(s)",
            model,
            segments.len()
        );

        let raw = self.transport.send(&self.credentials, &request).await?;
        ModelResponse::decode(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;
    use crate::Error;

    fn test_client(transport: MockTransport) -> Client {
        Client::with_transport(Credentials::new("test-key"), Box::new(transport))
    }

    #[tokio::test]
    async fn test_create_returns_decoded_payload() {
        let client = test_client(MockTransport::new());

        let response = client
            .create(
                "demo-model",
                &[
                    Segment::image("https://example.com/a.png"),
                    Segment::text("describe"),
                ],
            )
            .await
            .unwrap();

        assert!(!response.output.is_empty());
        assert!(!response.output_text().is_empty());
    }

    #[tokio::test]
    async fn test_create_round_trips_segment_content_through_echo() {
        let transport = MockTransport::echo();
        let probe = transport.clone();
        let client = test_client(transport);

        let response = client
            .create(
                "demo-model",
                &[
                    Segment::image("https://example.com/a.png"),
                    Segment::text("describe"),
                ],
            )
            .await
            .unwrap();

        let text = response.output_text();
        assert!(text.contains("https://example.com/a.png"));
        assert!(text.contains("describe"));
        assert_eq!(response.model.as_deref(), Some("demo-model"));

        let sent = probe.last_request().unwrap();
        assert_eq!(sent.input[0].content.len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_request_short_circuits_before_transport() {
        let transport = MockTransport::new();
        let probe = transport.clone();
        let client = test_client(transport);

        let err = client.create("demo-model", &[]).await.unwrap_err();

        assert!(matches!(err, Error::InvalidRequest(_)));
        assert_eq!(probe.get_call_count(), 0);
    }

    #[tokio::test]
    async fn test_decode_failure_surfaces() {
        let client = test_client(MockTransport::new().with_body("{\"id\": \"resp_1\"}"));

        let err = client
            .create("demo-model", &[Segment::text("hello")])
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn test_from_resolver_missing_credential_fails_without_network() {
        let resolver = CredentialResolver::new().with_env_var("ARKQUERY_TEST_CLIENT_NO_KEY");

        let err = Client::from_resolver(
            &resolver,
            "https://example.com".to_string(),
            Duration::from_secs(5),
        )
        .unwrap_err();

        assert!(matches!(err, Error::MissingCredential(_)));
    }

    #[tokio::test]
    async fn test_client_is_reusable_across_calls() {
        let transport = MockTransport::new();
        let probe = transport.clone();
        let client = test_client(transport);

        client
            .create("demo-model", &[Segment::text("first")])
            .await
            .unwrap();
        client
            .create("demo-model", &[Segment::text("second")])
            .await
            .unwrap();

        assert_eq!(probe.get_call_count(), 2);
    }
}
