//! Error types for wire operations.

use thiserror::Error;

/// Error type for transport failures.
///
/// Describes what went wrong without dictating recovery strategy;
/// [`RetryRequest`](crate::RetryRequest) decides which kinds to retry.
#[derive(Debug, Error)]
pub enum WireError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// connection reset and other network-level errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The server did not respond within the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// Low-level I/O failure while talking to the server.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The server answered with something that is not a valid HTTP response.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The wire cannot express the request (e.g. a header value the
    /// transport rejects). A configuration issue, not a transient failure.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}
