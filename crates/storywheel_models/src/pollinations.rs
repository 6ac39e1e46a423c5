//! One-shot image generation client.

use crate::UpstreamError;
use derive_getters::Getters;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Content type assumed when the provider omits one.
const DEFAULT_CONTENT_TYPE: &str = "image/jpeg";

/// Timeout for the whole image round-trip.
const IMAGE_TIMEOUT: Duration = Duration::from_secs(120);

/// Default image dimensions.
pub const DEFAULT_WIDTH: u32 = 512;
/// Default image dimensions.
pub const DEFAULT_HEIGHT: u32 = 512;

/// A generated image: raw bytes plus the content type to serve them under.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct GeneratedImage {
    /// Raw image bytes
    bytes: Vec<u8>,
    /// MIME type reported by the provider, or the JPEG default
    content_type: String,
}

impl GeneratedImage {
    /// Consumes the image into its raw bytes and content type.
    pub fn into_parts(self) -> (Vec<u8>, String) {
        (self.bytes, self.content_type)
    }
}

/// Client for the prompt-to-image endpoint.
#[derive(Debug, Clone)]
pub struct ImageClient {
    client: Client,
    base_url: String,
}

impl ImageClient {
    /// Creates a new image client against the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(IMAGE_TIMEOUT)
            .build()
            .expect("Valid HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Generates one image for the prompt at the default 512x512 size.
    ///
    /// # Errors
    ///
    /// Returns an [`UpstreamError`] on transport failure, non-success
    /// status, or an empty body.
    pub async fn generate_image(&self, prompt: &str) -> Result<GeneratedImage, UpstreamError> {
        self.generate_image_sized(prompt, DEFAULT_WIDTH, DEFAULT_HEIGHT)
            .await
    }

    /// Generates one image for the prompt at the given size.
    ///
    /// # Errors
    ///
    /// Returns an [`UpstreamError`] on transport failure, non-success
    /// status, or an empty body.
    #[instrument(skip(self, prompt))]
    pub async fn generate_image_sized(
        &self,
        prompt: &str,
        width: u32,
        height: u32,
    ) -> Result<GeneratedImage, UpstreamError> {
        let url = format!(
            "{}/prompt/{}?width={}&height={}",
            self.base_url,
            urlencoding::encode(prompt),
            width,
            height
        );

        debug!(width, height, "Requesting generated image");

        let response = self.client.get(&url).send().await.map_err(|e| {
            error!(error = ?e, "Image request failed");
            UpstreamError::Http(format!("Image request failed: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Image call failed");
            return Err(UpstreamError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();

        let bytes = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::Http(format!("Failed to read image body: {e}")))?;

        if bytes.is_empty() {
            return Err(UpstreamError::EmptyBody);
        }

        Ok(GeneratedImage {
            bytes: bytes.to_vec(),
            content_type,
        })
    }
}
