//! Application configuration.
//!
//! One explicitly constructed value passed to components at startup; nothing
//! reads the environment after `from_env` returns.

use derive_getters::Getters;
use storywheel_error::ConfigError;

/// Default chat completions endpoint (HuggingFace router).
pub const DEFAULT_TEXT_BASE_URL: &str = "https://router.huggingface.co/v1/chat/completions";
/// Default image generation endpoint.
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.pollinations.ai";
/// Default model pinned for all generation calls.
pub const DEFAULT_MODEL: &str = "AI-Sweden-Models/Llama-3-8B-instruct:featherless-ai";
/// Default provider-routing header value.
pub const DEFAULT_ROUTER_PROVIDER: &str = "nscale";

/// Which seed store implementation to run with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedStoreMode {
    /// In-process store preloaded with the curated seeds
    #[default]
    Memory,
    /// Seeding switched off; every lookup returns "no seed"
    Disabled,
}

/// Process configuration for the Storywheel server.
#[derive(Debug, Clone, PartialEq, Eq, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct AppConfig {
    /// Bearer token for the text generation endpoint
    api_token: String,
    /// Model identifier pinned for every generation call
    #[builder(default = "DEFAULT_MODEL.to_string()")]
    model: String,
    /// Value of the provider-routing header
    #[builder(default = "DEFAULT_ROUTER_PROVIDER.to_string()")]
    router_provider: String,
    /// Chat completions endpoint URL
    #[builder(default = "DEFAULT_TEXT_BASE_URL.to_string()")]
    text_base_url: String,
    /// Image generation endpoint base URL
    #[builder(default = "DEFAULT_IMAGE_BASE_URL.to_string()")]
    image_base_url: String,
    /// Seed store selection
    #[builder(default)]
    seed_store: SeedStoreMode,
    /// Socket address the HTTP server binds to
    #[builder(default = "\"0.0.0.0:8080\".to_string()")]
    bind_addr: String,
}

impl AppConfig {
    /// Creates a new builder for `AppConfig`.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Create config from environment variables.
    ///
    /// Reads:
    /// - `HUGGINGFACE_API_TOKEN` (required)
    /// - `STORYWHEEL_MODEL` (default: the pinned AI-Sweden Llama 3 model)
    /// - `STORYWHEEL_ROUTER_PROVIDER` (default: "nscale")
    /// - `STORYWHEEL_TEXT_BASE_URL` (default: HuggingFace router)
    /// - `STORYWHEEL_IMAGE_BASE_URL` (default: Pollinations)
    /// - `STORYWHEEL_SEED_STORE` ("memory" or "disabled", default: "memory")
    /// - `STORYWHEEL_BIND_ADDR` (default: "0.0.0.0:8080")
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a required key is missing or a value
    /// is unrecognized.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_token = std::env::var("HUGGINGFACE_API_TOKEN")
            .map_err(|_| ConfigError::new("HUGGINGFACE_API_TOKEN not set"))?;

        let mut builder = AppConfigBuilder::default();
        builder.api_token(api_token);

        if let Ok(model) = std::env::var("STORYWHEEL_MODEL") {
            builder.model(model);
        }
        if let Ok(provider) = std::env::var("STORYWHEEL_ROUTER_PROVIDER") {
            builder.router_provider(provider);
        }
        if let Ok(url) = std::env::var("STORYWHEEL_TEXT_BASE_URL") {
            builder.text_base_url(url);
        }
        if let Ok(url) = std::env::var("STORYWHEEL_IMAGE_BASE_URL") {
            builder.image_base_url(url);
        }
        if let Ok(mode) = std::env::var("STORYWHEEL_SEED_STORE") {
            let mode = match mode.as_str() {
                "memory" => SeedStoreMode::Memory,
                "disabled" => SeedStoreMode::Disabled,
                other => {
                    return Err(ConfigError::new(format!(
                        "STORYWHEEL_SEED_STORE must be \"memory\" or \"disabled\", got \"{other}\""
                    )));
                }
            };
            builder.seed_store(mode);
        }
        if let Ok(addr) = std::env::var("STORYWHEEL_BIND_ADDR") {
            builder.bind_addr(addr);
        }

        builder
            .build()
            .map_err(|e| ConfigError::new(format!("invalid configuration: {e}")))
    }
}
