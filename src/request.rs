//! Request assembly and validation
//!
//! Builds the wire-level request body from ordered content segments. Pure:
//! validation has no side effects and fails on the first violated constraint.

use crate::models::{ContentPart, InputMessage, ResponsesRequest, Segment};
use crate::{Error, Result};

/// Assemble a request for `model` from ordered `segments`.
///
/// Validates that the model id is non-empty, at least one segment is present,
/// text segments are non-empty after trimming, and image URLs are well-formed
/// absolute URLs. The returned body wraps all segments in a single user
/// message, preserving their order.
pub fn build_request(model: &str, segments: &[Segment]) -> Result<ResponsesRequest> {
    if model.trim().is_empty() {
        return Err(Error::InvalidRequest("model must not be empty".to_string()));
    }

    if segments.is_empty() {
        return Err(Error::InvalidRequest(
            "at least one content segment is required".to_string(),
        ));
    }

    for (index, segment) in segments.iter().enumerate() {
        match segment {
            Segment::Text(text) if text.trim().is_empty() => {
                return Err(Error::InvalidRequest(format!(
                    "segment {}: text must not be empty",
                    index
                )));
            }
            Segment::Image(url) if reqwest::Url::parse(url).is_err() => {
                return Err(Error::InvalidRequest(format!(
                    "segment {}: '{}' is not a valid absolute URL",
                    index, url
                )));
            }
            _ => {}
        }
    }

    Ok(ResponsesRequest {
        model: model.to_string(),
        input: vec![InputMessage {
            role: "user".to_string(),
            content: segments.iter().map(ContentPart::from).collect(),
        }],
    })
}
