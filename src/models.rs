//! Data models and structures
//!
//! Defines request segments, the wire-level request/response payloads for the
//! responses API, and environment-backed configuration.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// One unit of multimodal request content, either text or an image reference.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Text(String),
    Image(String),
}

impl Segment {
    pub fn text(text: impl Into<String>) -> Self {
        Segment::Text(text.into())
    }

    pub fn image(url: impl Into<String>) -> Self {
        Segment::Image(url.into())
    }
}

// Wire-level request models

/// One content part in a user message.
///
/// Serializes to `{"type": "input_text", "text": ...}` or
/// `{"type": "input_image", "image_url": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ContentPart {
    #[serde(rename = "input_text")]
    InputText { text: String },
    #[serde(rename = "input_image")]
    InputImage { image_url: String },
}

impl From<&Segment> for ContentPart {
    fn from(segment: &Segment) -> Self {
        match segment {
            Segment::Text(text) => ContentPart::InputText { text: text.clone() },
            Segment::Image(url) => ContentPart::InputImage {
                image_url: url.clone(),
            },
        }
    }
}

/// One input message carrying ordered content parts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputMessage {
    pub role: String,
    pub content: Vec<ContentPart>,
}

/// Request body for the responses endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResponsesRequest {
    pub model: String,
    pub input: Vec<InputMessage>,
}

// Wire-level response models

/// Raw HTTP-level result handed from the transport to the decoder.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// One content part of an output message. Vendors add part kinds over time,
/// so the shape stays open: `kind` is the discriminator and `text` is only
/// present for text parts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputContent {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// One item in the response `output` list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputItem {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Vec<OutputContent>,
}

/// Token accounting block returned by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub input_tokens: Option<u64>,
    #[serde(default)]
    pub output_tokens: Option<u64>,
    #[serde(default)]
    pub total_tokens: Option<u64>,
}

/// Decoded response payload. Unknown vendor fields are ignored; `output` is
/// the only required field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub output: Vec<OutputItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

impl ModelResponse {
    /// Decode a raw transport payload into a typed response.
    pub fn decode(raw: &RawResponse) -> Result<Self> {
        serde_json::from_str(&raw.body).map_err(|e| Error::Decode(e.to_string()))
    }

    /// Concatenated text of all `output_text` parts across output items.
    pub fn output_text(&self) -> String {
        self.output
            .iter()
            .flat_map(|item| item.content.iter())
            .filter(|part| part.kind == "output_text")
            .filter_map(|part| part.text.as_deref())
            .collect::<Vec<_>>()
            .join("")
    }
}

// Configuration

pub const DEFAULT_BASE_URL: &str = "https://ark.cn-beijing.volces.com/api/v3";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let timeout_secs = match std::env::var("ARK_TIMEOUT_SECS") {
            Ok(value) => value.parse().map_err(|_| {
                Error::InvalidRequest(format!("ARK_TIMEOUT_SECS must be a number, got '{}'", value))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            base_url: std::env::var("ARK_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            timeout_secs,
        })
    }
}
