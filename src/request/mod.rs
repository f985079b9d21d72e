//! Immutable fluent HTTP requests.
//!
//! This module provides:
//! - The fluent request family ([`Request`])
//! - The core aggregate dispatching to a wire ([`BaseRequest`])
//! - URI and body views ([`RequestUri`], [`RequestBody`])
//! - Retrying decorator ([`RetryRequest`]) and its policy ([`RetryPolicy`])
//!
//! # Immutability
//!
//! Every mutator returns a new request with exactly one field replaced; the
//! receiver is never altered. Unchanged fields are shared, so one request
//! can be forked into many chains across threads without synchronization.
//!
//! # Views
//!
//! [`Request::uri`] and [`Request::body`] return views bound to a snapshot
//! of the request. View mutators derive a new request and return a new view
//! bound to it; `back()` hands that request over. Views are generic over the
//! request type, so a decorator stays in effect through every view.

mod base;
mod body;
mod error;
mod policy;
mod retry;
mod uri;

#[cfg(test)]
mod uri_tests;

pub use base::BaseRequest;
pub use body::RequestBody;
pub use error::{FetchError, RequestError};
pub use policy::RetryPolicy;
pub use retry::{IsRetryable, RetryRequest};
pub use uri::RequestUri;

use std::fmt;
use std::sync::Arc;

use http::Method;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use url::Url;

use crate::header::Header;
use crate::response::Response;
use crate::wire::Wire;

/// RESTful request.
///
/// Instances are immutable and thread-safe. A typical chain:
///
/// ```no_run
/// use http::Method;
/// use rexsl_test::{BaseRequest, Request, RetryRequest};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let body = RetryRequest::new(BaseRequest::reqwest("https://www.example.com:8080")?)
///     .uri().path("/users")?.query_param("id", 333).back()
///     .with_method(Method::GET)
///     .with_header("Accept", "text/xml")?
///     .fetch()?
///     .body()
///     .into_owned();
/// # Ok(())
/// # }
/// ```
pub trait Request: Clone + fmt::Debug + PartialEq + Send + Sync + Sized {
    /// Returns a view of the destination URI.
    fn uri(&self) -> RequestUri<Self> {
        RequestUri::new(self.clone())
    }

    /// Returns a view of the request body.
    fn body(&self) -> RequestBody<Self> {
        RequestBody::new(self.clone())
    }

    /// Returns a request with one more header.
    ///
    /// Headers with the same name accumulate; nothing is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if the header name or value is invalid.
    fn with_header(&self, name: &str, value: impl fmt::Display) -> Result<Self, RequestError>;

    /// Returns a request without any header of this name.
    fn without_header(&self, name: &str) -> Self;

    /// Returns a request using another HTTP method.
    ///
    /// Extension methods are passed to the wire as they are.
    fn with_method(&self, method: Method) -> Self;

    /// Returns a request whose wire is wrapped by `decorate`.
    fn through<W, F>(&self, decorate: F) -> Self
    where
        W: Wire + 'static,
        F: FnOnce(Arc<dyn Wire>) -> W;

    /// Executes the request.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the request cannot be prepared or the
    /// exchange fails.
    fn fetch(&self) -> Result<Response<Self>, FetchError>;

    /// Returns the destination URI.
    fn home(&self) -> &Url;

    /// Returns the HTTP method.
    fn method(&self) -> &Method;

    /// Returns the headers in insertion order.
    fn headers(&self) -> &[Header];

    /// Returns the raw body.
    fn content(&self) -> &[u8];

    /// Returns a request pointing at another URI.
    fn with_home(&self, uri: Url) -> Self;

    /// Returns a request carrying another body.
    fn with_content(&self, body: Vec<u8>) -> Self;
}

/// Bytes kept literal in query and form components: RFC 3986 unreserved.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encodes one query or form component as UTF-8.
fn encode(text: &str) -> String {
    utf8_percent_encode(text, COMPONENT).to_string()
}
