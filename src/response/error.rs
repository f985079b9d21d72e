//! Error types for response façades.

use http::StatusCode;
use thiserror::Error;

/// A response did not meet an expectation.
#[derive(Debug, Error)]
pub enum AssertionError {
    /// Unexpected status code.
    #[error("Expected status {expected}, got {actual}:\n{response}")]
    Status {
        /// Expected status
        expected: StatusCode,
        /// Actual status
        actual: StatusCode,
        /// Full response text, for diagnosis
        response: String,
    },

    /// Header is absent.
    #[error("Header '{name}' is missing")]
    MissingHeader {
        /// Header name
        name: String,
    },

    /// Header is present but no value matches.
    #[error("Header '{name}' has values {actual:?}, expected '{expected}'")]
    HeaderMismatch {
        /// Header name
        name: String,
        /// Expected value
        expected: String,
        /// Values received
        actual: Vec<String>,
    },

    /// Body does not contain the expected text.
    #[error("Body does not contain '{expected}'")]
    BodyMismatch {
        /// Expected fragment
        expected: String,
    },

    /// Body is not valid JSON (or not of the requested shape).
    #[error("Invalid JSON body: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// JSON value at a pointer differs from the expected one.
    #[error("JSON at '{pointer}' is {actual:?}, expected {expected}")]
    JsonMismatch {
        /// JSON pointer (RFC 6901)
        pointer: String,
        /// Expected value
        expected: serde_json::Value,
        /// Value found, if any
        actual: Option<serde_json::Value>,
    },

    /// A redirect target could not be resolved.
    #[error("Cannot resolve location '{location}': {reason}")]
    InvalidLocation {
        /// The location text
        location: String,
        /// Parser message
        reason: String,
    },
}
