use crate::credentials::Credentials;
use crate::models::{RawResponse, ResponsesRequest};
use crate::transport::Transport;
use crate::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// In-memory transport for tests. Queued responses cycle; with no queue it
/// either echoes the request content back as output text (echo mode) or
/// returns a minimal valid payload.
#[derive(Clone)]
pub struct MockTransport {
    responses: Arc<Mutex<Vec<RawResponse>>>,
    requests: Arc<Mutex<Vec<ResponsesRequest>>>,
    call_count: Arc<Mutex<usize>>,
    echo: bool,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
            echo: false,
        }
    }

    /// Echo mode: every content part of the request comes back as an
    /// `output_text` part (image parts echo their URL).
    pub fn echo() -> Self {
        Self {
            echo: true,
            ..Self::new()
        }
    }

    pub fn with_response(self, response: RawResponse) -> Self {
        self.responses.lock().unwrap().push(response);
        self
    }

    pub fn with_body(self, body: impl Into<String>) -> Self {
        self.with_response(RawResponse {
            status: 200,
            body: body.into(),
        })
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn last_request(&self) -> Option<ResponsesRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    fn echo_body(request: &ResponsesRequest) -> String {
        use crate::models::ContentPart;

        let parts: Vec<serde_json::Value> = request
            .input
            .iter()
            .flat_map(|message| message.content.iter())
            .map(|part| match part {
                ContentPart::InputText { text } => {
                    serde_json::json!({ "type": "output_text", "text": text })
                }
                ContentPart::InputImage { image_url } => {
                    serde_json::json!({ "type": "output_text", "text": image_url })
                }
            })
            .collect();

        serde_json::json!({
            "id": "resp_mock",
            "model": request.model,
            "output": [{
                "type": "message",
                "role": "assistant",
                "content": parts
            }]
        })
        .to_string()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(
        &self,
        _credentials: &Credentials,
        request: &ResponsesRequest,
    ) -> Result<RawResponse> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;

        self.requests.lock().unwrap().push(request.clone());

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            let body = if self.echo {
                Self::echo_body(request)
            } else {
                serde_json::json!({
                    "id": "resp_mock",
                    "model": request.model,
                    "output": [{
                        "type": "message",
                        "role": "assistant",
                        "content": [{ "type": "output_text", "text": "mock output" }]
                    }]
                })
                .to_string()
            };
            Ok(RawResponse { status: 200, body })
        } else {
            let index = (*count - 1) % responses.len();
            Ok(responses[index].clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Segment;
    use crate::request::build_request;

    #[tokio::test]
    async fn test_mock_transport_counts_and_records_requests() {
        let transport = MockTransport::new();
        let credentials = Credentials::new("test-key");
        let request = build_request("demo-model", &[Segment::text("hello")]).unwrap();

        assert_eq!(transport.get_call_count(), 0);
        transport.send(&credentials, &request).await.unwrap();
        assert_eq!(transport.get_call_count(), 1);
        assert_eq!(transport.last_request().unwrap().model, "demo-model");
    }

    #[tokio::test]
    async fn test_mock_transport_cycles_queued_responses() {
        let transport = MockTransport::new()
            .with_body(r#"{"output": [], "id": "first"}"#)
            .with_body(r#"{"output": [], "id": "second"}"#);
        let credentials = Credentials::new("test-key");
        let request = build_request("demo-model", &[Segment::text("hello")]).unwrap();

        let first = transport.send(&credentials, &request).await.unwrap();
        assert!(first.body.contains("first"));

        let second = transport.send(&credentials, &request).await.unwrap();
        assert!(second.body.contains("second"));

        // Cycles back to the start.
        let third = transport.send(&credentials, &request).await.unwrap();
        assert!(third.body.contains("first"));
    }

    #[tokio::test]
    async fn test_echo_mode_reflects_request_content() {
        let transport = MockTransport::echo();
        let credentials = Credentials::new("test-key");
        let request = build_request(
            "demo-model",
            &[
                Segment::image("https://example.com/a.png"),
                Segment::text("describe"),
            ],
        )
        .unwrap();

        let raw = transport.send(&credentials, &request).await.unwrap();
        assert!(raw.body.contains("https://example.com/a.png"));
        assert!(raw.body.contains("describe"));
    }
}
