//! Client-facing relay event vocabulary.

/// One event on the client-facing stream.
///
/// A well-formed sequence is exactly one [`RelayEvent::Sources`], any number
/// of [`RelayEvent::Content`] events in emission order, then exactly one of
/// [`RelayEvent::Done`] or [`RelayEvent::Failed`]. Nothing follows the
/// terminal event; the relay enforces this by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayEvent {
    /// Citation links for the seeds backing this stream, in seed-resolution
    /// order. Always emitted first, even when empty.
    Sources(Vec<String>),
    /// One incremental fragment of generated text. Fragments concatenate in
    /// emission order to form the full story.
    Content(String),
    /// Upstream generation completed without error.
    Done,
    /// Upstream generation failed; terminates the stream.
    Failed {
        /// Upstream HTTP status when available, otherwise a generic 502
        status: u16,
        /// Human-readable cause
        message: String,
    },
}

impl RelayEvent {
    /// Whether this event terminates the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RelayEvent::Done | RelayEvent::Failed { .. })
    }
}
