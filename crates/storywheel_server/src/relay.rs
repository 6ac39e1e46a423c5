//! Client-facing stream relay.
//!
//! The relay owns the outbound [`RelayEvent`] channel and enforces the event
//! protocol by construction: a freshly opened [`StreamRelay`] can only emit
//! the sources event, which turns it into an [`OpenRelay`]; the terminal
//! operations consume the relay, so nothing can be emitted after
//! termination. A send against a receiver that is gone (the client
//! disconnected) returns [`RelayError::Disconnected`] and the producer is
//! expected to stop forwarding.

use storywheel_core::RelayEvent;
use storywheel_error::RelayError;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::debug;

/// Channel capacity; producers block on a full channel, which is the only
/// backpressure the relay applies to the upstream stream.
const RELAY_CAPACITY: usize = 32;

/// A relay that has not yet emitted its sources event.
#[derive(Debug)]
pub struct StreamRelay {
    tx: mpsc::Sender<RelayEvent>,
}

/// A relay in content mode: sources sent, terminal event still pending.
#[derive(Debug)]
pub struct OpenRelay {
    tx: mpsc::Sender<RelayEvent>,
}

impl StreamRelay {
    /// Opens a relay and the event stream its consumer reads from.
    pub fn channel() -> (StreamRelay, ReceiverStream<RelayEvent>) {
        let (tx, rx) = mpsc::channel(RELAY_CAPACITY);
        (StreamRelay { tx }, ReceiverStream::new(rx))
    }

    /// Emits the sources event, moving the relay into content mode.
    ///
    /// The citation list keeps seed-resolution order and may be empty; the
    /// event is sent either way.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Disconnected`] when the consumer is gone.
    pub async fn send_sources(self, sources: Vec<String>) -> Result<OpenRelay, RelayError> {
        debug!(count = sources.len(), "Emitting sources event");
        self.tx
            .send(RelayEvent::Sources(sources))
            .await
            .map_err(|_| RelayError::Disconnected)?;
        Ok(OpenRelay { tx: self.tx })
    }

    /// Terminates the stream with a failure before any sources were sent.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Disconnected`] when the consumer is gone.
    pub async fn fail(self, status: u16, message: impl Into<String>) -> Result<(), RelayError> {
        send_failed(&self.tx, status, message.into()).await
    }
}

impl OpenRelay {
    /// Emits one content event carrying a text fragment.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Disconnected`] when the consumer is gone.
    pub async fn send_content(&self, text: impl Into<String>) -> Result<(), RelayError> {
        self.tx
            .send(RelayEvent::Content(text.into()))
            .await
            .map_err(|_| RelayError::Disconnected)
    }

    /// Terminates the stream successfully.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Disconnected`] when the consumer is gone.
    pub async fn complete(self) -> Result<(), RelayError> {
        debug!("Relay completed");
        self.tx
            .send(RelayEvent::Done)
            .await
            .map_err(|_| RelayError::Disconnected)
    }

    /// Terminates the stream with an upstream failure.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Disconnected`] when the consumer is gone.
    pub async fn fail(self, status: u16, message: impl Into<String>) -> Result<(), RelayError> {
        send_failed(&self.tx, status, message.into()).await
    }
}

async fn send_failed(
    tx: &mpsc::Sender<RelayEvent>,
    status: u16,
    message: String,
) -> Result<(), RelayError> {
    debug!(status, "Relay failed");
    tx.send(RelayEvent::Failed { status, message })
        .await
        .map_err(|_| RelayError::Disconnected)
}
