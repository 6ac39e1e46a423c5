//! Stream relay error types.

/// Failure to deliver an event on the client-facing relay channel.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum RelayError {
    /// The receiving side of the channel is gone (client disconnected).
    ///
    /// Producers observing this stop forwarding; it is not an upstream
    /// failure and must not be reported as one.
    #[display("relay receiver disconnected")]
    Disconnected,
}

impl std::error::Error for RelayError {}
