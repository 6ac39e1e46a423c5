//! Errors from remote generation endpoints.

/// Failure of a remote completion or image call.
///
/// Never retried here; retry policy belongs to the caller.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum UpstreamError {
    /// HTTP/network error before any status was received
    #[display("HTTP error: {}", _0)]
    Http(String),

    /// Endpoint returned a non-success status
    #[display("API error (status {}): {}", status, message)]
    Api {
        /// Upstream HTTP status code
        status: u16,
        /// Upstream body, when present
        message: String,
    },

    /// Endpoint returned a body in none of the known shapes
    #[display("Response parsing failed: {}", _0)]
    ResponseParsing(String),

    /// Endpoint returned a success status with an empty body
    #[display("Empty response body")]
    EmptyBody,
}

impl UpstreamError {
    /// Upstream status code, when one was received.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            UpstreamError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl std::error::Error for UpstreamError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_exposes_status() {
        let err = UpstreamError::Api {
            status: 429,
            message: "slow down".to_string(),
        };
        assert_eq!(err.status_code(), Some(429));
        assert!(err.to_string().contains("429"));
    }

    #[test]
    fn transport_error_has_no_status() {
        assert_eq!(
            UpstreamError::Http("connection refused".to_string()).status_code(),
            None
        );
    }
}
