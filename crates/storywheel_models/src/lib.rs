//! Remote generation provider integrations for Storywheel.
//!
//! Provides the OpenAI-compatible router client for text generation
//! (blocking and streamed), the streaming delta extractor, and the
//! one-shot image generation client.

mod error;
mod huggingface;
mod pollinations;

pub use error::UpstreamError;
pub use huggingface::{
    ChatMessage, ChatRequest, RawChunk, RouterClient, extract_fragments,
};
pub use pollinations::{GeneratedImage, ImageClient};
