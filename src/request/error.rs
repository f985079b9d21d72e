//! Error types for building and fetching requests.

use std::time::Duration;

use thiserror::Error;

use crate::wire::WireError;

/// Invalid input handed to a request or one of its views.
///
/// Raised at the point of construction or mutation; never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// Header name is empty or uses characters outside `[A-Za-z0-9-]`.
    #[error("Invalid header name '{name}': expected ASCII letters, digits and '-'")]
    InvalidHeaderName {
        /// The rejected name
        name: String,
    },

    /// Header value cannot be written as a single header line.
    #[error("Invalid header value for '{name}': {reason}")]
    InvalidHeaderValue {
        /// The header name
        name: String,
        /// Reason for invalidity
        reason: &'static str,
    },

    /// URI could not be parsed as an absolute URL.
    #[error("Invalid URI '{uri}': {reason}")]
    InvalidUri {
        /// The rejected URI text
        uri: String,
        /// Parser message
        reason: String,
    },

    /// URI cannot carry path segments or user info (e.g. `mailto:`).
    #[error("URI '{0}' cannot be used as a base for paths or credentials")]
    CannotBeABase(String),

    /// URI user info is not valid percent-encoded UTF-8.
    #[error("Invalid user info in URI for host '{host}'")]
    InvalidUserInfo {
        /// Host of the URI carrying the user info (credentials are not echoed)
        host: String,
    },
}

/// Error type for [`Request::fetch`](super::Request::fetch).
#[derive(Debug, Error)]
pub enum FetchError {
    /// The wire failed to complete the exchange.
    #[error(transparent)]
    Wire(#[from] WireError),

    /// The request could not be prepared for sending.
    #[error(transparent)]
    Request(#[from] RequestError),

    /// All retry attempts failed.
    #[error("Fetch failed after {attempts} attempt(s): {last_error}")]
    RetriesExhausted {
        /// Number of attempts made
        attempts: u32,
        /// The failure of the last attempt
        #[source]
        last_error: WireError,
    },

    /// The retry deadline would be exceeded by another attempt.
    #[error("Fetch deadline of {}ms exceeded after {attempts} attempt(s): {last_error}", deadline.as_millis())]
    DeadlineExceeded {
        /// Configured deadline spanning all attempts
        deadline: Duration,
        /// Number of attempts made
        attempts: u32,
        /// The failure of the last attempt
        #[source]
        last_error: WireError,
    },
}

impl FetchError {
    /// Returns the underlying transport failure, if any.
    #[must_use]
    pub const fn wire_error(&self) -> Option<&WireError> {
        match self {
            Self::Wire(e)
            | Self::RetriesExhausted { last_error: e, .. }
            | Self::DeadlineExceeded { last_error: e, .. } => Some(e),
            Self::Request(_) => None,
        }
    }
}
