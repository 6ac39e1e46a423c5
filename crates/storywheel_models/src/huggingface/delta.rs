//! Streaming delta extraction.

use crate::huggingface::dto::{ChatChunk, DeltaContent};
use tracing::warn;

/// Line marker prefixing each payload in the provider's event stream.
const DATA_PREFIX: &str = "data:";

/// Literal payload signalling end-of-stream.
const DONE_SENTINEL: &str = "[DONE]";

/// Extracts plain-text fragments from one raw streaming chunk.
///
/// The `[DONE]` sentinel yields no fragments; it does not terminate anything
/// here, stream completion is detected by the client's connection close. A
/// chunk that fails to parse is logged and skipped, since the provider may
/// emit heartbeat or non-JSON keep-alive lines mid-stream.
pub fn extract_fragments(raw: &str) -> Vec<String> {
    let payload = raw.strip_prefix(DATA_PREFIX).unwrap_or(raw).trim();
    if payload.is_empty() || payload == DONE_SENTINEL {
        return Vec::new();
    }

    let chunk: ChatChunk = match serde_json::from_str(payload) {
        Ok(chunk) => chunk,
        Err(e) => {
            warn!(chunk = %payload, error = %e, "Failed to parse stream chunk");
            return Vec::new();
        }
    };

    let Some(content) = chunk
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.delta)
        .and_then(|delta| delta.content)
    else {
        return Vec::new();
    };

    match content {
        DeltaContent::Text(text) => vec![text],
        DeltaContent::Segments(segments) => {
            let joined: String = segments
                .into_iter()
                .filter_map(|segment| segment.text)
                .collect();
            if joined.is_empty() {
                Vec::new()
            } else {
                vec![joined]
            }
        }
    }
}
