//! Wire decorator that collapses repeated cookies.

use std::sync::Arc;

use http::Method;
use url::Url;

use super::{Wire, WireError};
use crate::header::{COOKIE, Header};
use crate::request::BaseRequest;
use crate::response::Response;

/// Sends every cookie name at most once.
///
/// Fluent chains often add the same cookie several times (e.g. after
/// re-reading a `Set-Cookie`). This wire merges all `Cookie: name=value`
/// headers so that the last value per name wins; cookies keep the position
/// of their first occurrence and are appended after the other headers.
/// `Cookie` headers without `=` are passed through untouched.
pub struct CookieOptimizingWire {
    origin: Arc<dyn Wire>,
}

impl CookieOptimizingWire {
    /// Wraps another wire.
    #[must_use]
    pub fn new(origin: Arc<dyn Wire>) -> Self {
        Self { origin }
    }
}

impl Wire for CookieOptimizingWire {
    fn send(
        &self,
        request: &BaseRequest,
        uri: &Url,
        method: &Method,
        headers: &[Header],
        body: &[u8],
    ) -> Result<Response, WireError> {
        let optimized = optimize(headers);
        self.origin.send(request, uri, method, &optimized, body)
    }
}

pub(super) fn optimize(headers: &[Header]) -> Vec<Header> {
    let mut others = Vec::with_capacity(headers.len());
    let mut cookies: Vec<(&str, &str)> = Vec::new();

    for header in headers {
        let parsed = if header.is(COOKIE) {
            header.value().split_once('=')
        } else {
            None
        };
        match parsed {
            Some((name, value)) => match cookies.iter_mut().find(|(n, _)| *n == name) {
                Some(existing) => existing.1 = value,
                None => cookies.push((name, value)),
            },
            None => others.push(header.clone()),
        }
    }

    others.extend(
        cookies
            .into_iter()
            .map(|(name, value)| Header::received(COOKIE, format!("{name}={value}"))),
    );
    others
}
