//! HuggingFace router integration (OpenAI-compatible chat completions).
//!
//! `client` speaks the wire protocol in blocking and streamed mode; `delta`
//! turns one raw streaming chunk into plain-text fragments.

mod client;
mod delta;
mod dto;

pub use client::{RawChunk, RouterClient};
pub use delta::extract_fragments;
pub use dto::{ChatMessage, ChatRequest};
