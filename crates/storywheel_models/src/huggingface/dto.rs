//! Data transfer objects for the OpenAI-compatible chat completions wire format.

use crate::UpstreamError;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A message in the OpenAI chat format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role: "system", "user", or "assistant"
    pub role: String,
    /// Message content
    pub content: String,
}

impl ChatMessage {
    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// OpenAI-compatible chat completion request.
#[derive(Debug, Clone, Serialize, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct ChatRequest {
    /// Model identifier
    model: String,
    /// Conversation messages
    messages: Vec<ChatMessage>,
    /// Maximum tokens to generate
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    /// Sampling temperature
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    /// Top-p sampling parameter
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    /// Enable streaming mode
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<bool>,
}

impl ChatRequest {
    /// Creates a new builder for `ChatRequest`.
    pub fn builder() -> ChatRequestBuilder {
        ChatRequestBuilder::default()
    }

    /// Create a streaming version of this request
    pub fn with_streaming(self) -> Self {
        Self {
            stream: Some(true),
            ..self
        }
    }
}

/// A choice in a blocking chat completion response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    /// The generated message
    pub message: ChatMessage,
}

/// Blocking chat completion response (OpenAI-compatible shape).
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Response choices
    pub choices: Vec<ChatChoice>,
}

/// Legacy inference output: `{"generated_text": "..."}`.
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyGenerated {
    /// Generated text
    pub generated_text: String,
}

/// Decodes a blocking completion body, trying each known provider shape in
/// a fixed fallback order: OpenAI chat response, legacy generated-text list,
/// legacy generated-text object, bare JSON string.
///
/// # Errors
///
/// Returns [`UpstreamError::ResponseParsing`] when no decoder matches.
pub fn decode_completion(body: &str) -> Result<String, UpstreamError> {
    if let Ok(response) = serde_json::from_str::<ChatResponse>(body) {
        if let Some(choice) = response.choices.first() {
            return Ok(choice.message.content.clone());
        }
    }

    if let Ok(outputs) = serde_json::from_str::<Vec<LegacyGenerated>>(body) {
        if let Some(first) = outputs.into_iter().next() {
            return Ok(first.generated_text);
        }
    }

    if let Ok(output) = serde_json::from_str::<LegacyGenerated>(body) {
        return Ok(output.generated_text);
    }

    if let Ok(text) = serde_json::from_str::<String>(body) {
        return Ok(text);
    }

    Err(UpstreamError::ResponseParsing(format!(
        "unexpected completion response: {body}"
    )))
}

/// Streaming chat completion chunk.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChunk {
    /// Delta choices
    #[serde(default)]
    pub choices: Vec<ChunkChoice>,
}

/// A choice in a streaming chunk.
#[derive(Debug, Clone, Deserialize)]
pub struct ChunkChoice {
    /// Incremental delta
    #[serde(default)]
    pub delta: Option<ChunkDelta>,
}

/// Delta content in a streaming chunk.
#[derive(Debug, Clone, Deserialize)]
pub struct ChunkDelta {
    /// Incremental content, in either of the provider's two shapes
    #[serde(default)]
    pub content: Option<DeltaContent>,
}

/// The provider's heterogeneous delta content: a plain string, or a list of
/// segments each carrying a text field.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DeltaContent {
    /// Single incremental string
    Text(String),
    /// Segmented content; segment texts concatenate into one fragment
    Segments(Vec<DeltaSegment>),
}

/// One segment of segmented delta content.
#[derive(Debug, Clone, Deserialize)]
pub struct DeltaSegment {
    /// Text carried by this segment, if any
    #[serde(default)]
    pub text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_openai_chat_shape_first() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"a story"}}]}"#;
        assert_eq!(decode_completion(body).unwrap(), "a story");
    }

    #[test]
    fn falls_back_to_legacy_list_shape() {
        let body = r#"[{"generated_text":"legacy list"}]"#;
        assert_eq!(decode_completion(body).unwrap(), "legacy list");
    }

    #[test]
    fn falls_back_to_legacy_object_shape() {
        let body = r#"{"generated_text":"legacy object"}"#;
        assert_eq!(decode_completion(body).unwrap(), "legacy object");
    }

    #[test]
    fn falls_back_to_bare_string() {
        assert_eq!(decode_completion(r#""just text""#).unwrap(), "just text");
    }

    #[test]
    fn rejects_unknown_shapes() {
        let err = decode_completion(r#"{"unexpected":true}"#).unwrap_err();
        assert!(matches!(err, UpstreamError::ResponseParsing(_)));
    }

    #[test]
    fn chat_request_serializes_without_unset_options() {
        let request = ChatRequest::builder()
            .model("test-model")
            .messages(vec![ChatMessage::user("hi")])
            .build()
            .unwrap();
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("max_tokens"));
        assert!(!json.contains("stream"));
    }

    #[test]
    fn with_streaming_sets_the_stream_flag() {
        let request = ChatRequest::builder()
            .model("test-model")
            .messages(vec![ChatMessage::user("hi")])
            .build()
            .unwrap()
            .with_streaming();
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"stream\":true"));
    }
}
