//! Immutable snapshot of a completed HTTP exchange.
//!
//! This module provides:
//! - The response snapshot ([`Response`])
//! - The façade hook ([`ResponseAdapter`])
//! - Assertion façade ([`RestResponse`]) and JSON façade ([`JsonResponse`])
//! - Assertion error type ([`AssertionError`])

mod error;
mod json;
mod rest;


pub use error::AssertionError;
pub use json::JsonResponse;
pub use rest::RestResponse;

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use http::StatusCode;

use crate::header::Header;
use crate::request::{BaseRequest, Request};

/// An HTTP response produced by one `fetch()` call.
///
/// Immutable; cloning shares headers and body. The response remembers the
/// request that produced it, so chains like
/// `request.fetch()?.back().with_header(..)?.fetch()` re-issue from the
/// same point. `R` is the request type that fetched it, so a response from
/// a [`RetryRequest`](crate::RetryRequest) leads back to a retrying request.
#[derive(Debug, Clone)]
pub struct Response<R = BaseRequest> {
    request: R,
    status: StatusCode,
    reason: String,
    headers: Arc<[Header]>,
    body: Arc<[u8]>,
}

/// A façade constructed around a [`Response`].
///
/// Replaces reflective "convert to type" factories with an ordinary
/// constructor that the compiler checks.
///
/// ```
/// use rexsl_test::{Response, ResponseAdapter};
///
/// struct Length(usize);
///
/// impl<R> ResponseAdapter<R> for Length {
///     fn adapt(response: Response<R>) -> Self {
///         Self(response.binary().len())
///     }
/// }
/// ```
pub trait ResponseAdapter<R>: Sized {
    /// Wraps the response.
    fn adapt(response: Response<R>) -> Self;
}

impl<R> Response<R> {
    /// Creates a response snapshot.
    #[must_use]
    pub fn new(
        request: R,
        status: StatusCode,
        reason: impl Into<String>,
        headers: Vec<Header>,
        body: Vec<u8>,
    ) -> Self {
        Self {
            request,
            status,
            reason: reason.into(),
            headers: headers.into(),
            body: body.into(),
        }
    }

    /// Returns the request that produced this response.
    #[must_use]
    pub fn back(&self) -> R
    where
        R: Clone,
    {
        self.request.clone()
    }

    /// Borrows the request that produced this response.
    #[must_use]
    pub const fn request(&self) -> &R {
        &self.request
    }

    /// Returns the status code.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the reason phrase.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Returns true if the status code indicates success (2xx).
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns the headers in the order they were received.
    #[must_use]
    pub fn header_list(&self) -> &[Header] {
        &self.headers
    }

    /// Returns headers grouped by normalized name.
    ///
    /// Values of one name keep the order they were received in.
    #[must_use]
    pub fn headers(&self) -> BTreeMap<String, Vec<String>> {
        let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for header in self.headers.iter() {
            map.entry(header.name().to_string())
                .or_default()
                .push(header.value().to_string());
        }
        map
    }

    /// Returns all values of one header, ignoring name case.
    #[must_use]
    pub fn header(&self, name: &str) -> Vec<&str> {
        self.headers
            .iter()
            .filter(|h| h.is(name))
            .map(Header::value)
            .collect()
    }

    /// Returns the body as text, replacing invalid UTF-8 sequences.
    #[must_use]
    pub fn body(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Returns the raw body bytes.
    #[must_use]
    pub fn binary(&self) -> &[u8] {
        &self.body
    }

    /// Re-targets the back-reference to another request.
    ///
    /// Used by request decorators so the response leads back to them.
    #[must_use]
    pub fn rebind<R2>(self, request: R2) -> Response<R2> {
        Response {
            request,
            status: self.status,
            reason: self.reason,
            headers: self.headers,
            body: self.body,
        }
    }

    /// Wraps the response in a façade type.
    #[must_use]
    pub fn adapt<T: ResponseAdapter<R>>(self) -> T {
        T::adapt(self)
    }

    /// Wraps the response with an explicit constructor.
    #[must_use]
    pub fn map<T>(self, wrap: impl FnOnce(Self) -> T) -> T {
        wrap(self)
    }
}

impl<R: Request> fmt::Display for Response<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} {} [{}]",
            self.status.as_u16(),
            self.reason,
            self.request.home()
        )?;
        for header in self.headers.iter() {
            writeln!(f, "{header}")?;
        }
        writeln!(f)?;
        if self.body.is_empty() {
            f.write_str("<<empty response body>>")
        } else {
            f.write_str(&self.body())
        }
    }
}
