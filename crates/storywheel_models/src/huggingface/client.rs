//! Client for the OpenAI-compatible chat completions endpoint.

use crate::UpstreamError;
use crate::huggingface::dto::{ChatMessage, ChatRequest, decode_completion};
use async_stream::try_stream;
use futures_util::{Stream, StreamExt};
use reqwest::Client;
use std::time::Duration;
use storywheel_core::AppConfig;
use tracing::{debug, error, instrument};

/// Header routing the request to a concrete inference provider.
const ROUTER_PROVIDER_HEADER: &str = "X-Router-Provider";

/// Connect timeout for both call modes.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

/// Total timeout for blocking calls. Streaming connections are long-lived
/// and carry no total timeout.
const BLOCKING_TIMEOUT: Duration = Duration::from_secs(120);

/// Sampling parameters pinned for every generation call.
const MAX_TOKENS: u32 = 256;
const TEMPERATURE: f32 = 0.7;
const TOP_P: f32 = 0.9;

/// One raw provider event line from the streaming connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawChunk(String);

impl RawChunk {
    /// The raw line, including any wire-format marker prefix.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Client for the text generation endpoint.
///
/// Attaches the bearer credential and provider-routing header to every call
/// and pins model and sampling parameters. Failures are never retried here.
#[derive(Debug, Clone)]
pub struct RouterClient {
    client: Client,
    api_token: String,
    model: String,
    base_url: String,
    router_provider: String,
}

impl RouterClient {
    /// Creates a new router client.
    pub fn new(
        api_token: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        router_provider: impl Into<String>,
    ) -> Self {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .expect("Valid HTTP client");

        Self {
            client,
            api_token: api_token.into(),
            model: model.into(),
            base_url: base_url.into(),
            router_provider: router_provider.into(),
        }
    }

    /// Creates a client from the application configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.api_token(),
            config.model(),
            config.text_base_url(),
            config.router_provider(),
        )
    }

    /// Returns the model name.
    pub fn model_name(&self) -> &str {
        &self.model
    }

    fn chat_request(&self, prompt: &str) -> ChatRequest {
        ChatRequest::builder()
            .model(self.model.clone())
            .messages(vec![ChatMessage::user(prompt)])
            .max_tokens(Some(MAX_TOKENS))
            .temperature(Some(TEMPERATURE))
            .top_p(Some(TOP_P))
            .build()
            .expect("Valid ChatRequest")
    }

    /// Generates the full completion in one blocking call.
    ///
    /// # Errors
    ///
    /// Returns an [`UpstreamError`] on transport failure, non-success
    /// status, or a body matching none of the known provider shapes.
    #[instrument(skip(self, prompt), fields(model = %self.model))]
    pub async fn generate(&self, prompt: &str) -> Result<String, UpstreamError> {
        let request = self.chat_request(prompt);

        debug!(url = %self.base_url, "Sending blocking completion request");

        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(&self.api_token)
            .header(ROUTER_PROVIDER_HEADER, &self.router_provider)
            .timeout(BLOCKING_TIMEOUT)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "HTTP request failed");
                UpstreamError::Http(format!("Request failed: {e}"))
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| UpstreamError::Http(format!("Failed to read body: {e}")))?;

        if !status.is_success() {
            error!(status = %status, body = %body, "Completion call failed");
            return Err(UpstreamError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        if body.is_empty() {
            return Err(UpstreamError::EmptyBody);
        }

        decode_completion(&body)
    }

    /// Opens a streaming completion and yields raw provider event lines.
    ///
    /// Lines are yielded in arrival order until the provider closes the
    /// connection; blank lines and comment lines are dropped, everything
    /// else (including the end sentinel) passes through untouched. The
    /// stream buffers no more than one partially received line.
    ///
    /// Dropping the stream cancels the upstream connection.
    #[instrument(skip(self, prompt), fields(model = %self.model))]
    pub fn generate_stream(
        &self,
        prompt: &str,
    ) -> impl Stream<Item = Result<RawChunk, UpstreamError>> + Send + 'static {
        let request = self.chat_request(prompt).with_streaming();
        let client = self.client.clone();
        let url = self.base_url.clone();
        let token = self.api_token.clone();
        let provider = self.router_provider.clone();

        try_stream! {
            let response = client
                .post(&url)
                .bearer_auth(&token)
                .header(ROUTER_PROVIDER_HEADER, &provider)
                .json(&request)
                .send()
                .await
                .map_err(|e| {
                    error!(error = ?e, "Streaming request failed");
                    UpstreamError::Http(format!("Streaming request failed: {e}"))
                })?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                error!(status = %status, body = %body, "Streaming call failed");
                Err(UpstreamError::Api {
                    status: status.as_u16(),
                    message: body,
                })?;
                return;
            }

            let mut bytes = response.bytes_stream();
            let mut buffer = String::new();

            while let Some(chunk) = bytes.next().await {
                let chunk = chunk.map_err(|e| {
                    error!(error = ?e, "Stream read failed");
                    UpstreamError::Http(format!("Stream read failed: {e}"))
                })?;
                buffer.push_str(&String::from_utf8_lossy(&chunk));

                while let Some(pos) = buffer.find('\n') {
                    let line: String = buffer.drain(..=pos).collect();
                    let line = line.trim_end_matches(['\r', '\n']);
                    if line.is_empty() || line.starts_with(':') {
                        continue;
                    }
                    yield RawChunk(line.to_string());
                }
            }

            // Connection closed mid-line: flush what arrived.
            let tail = buffer.trim();
            if !tail.is_empty() && !tail.starts_with(':') {
                yield RawChunk(tail.to_string());
            }
        }
    }
}
