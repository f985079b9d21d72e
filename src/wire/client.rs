//! Production wire implementation using reqwest.

use std::time::Duration;

use http::Method;
use url::Url;

use super::{Wire, WireError};
use crate::header::Header;
use crate::request::BaseRequest;
use crate::response::Response;

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;

/// Production wire using reqwest's blocking client.
///
/// This is a thin wrapper around `reqwest::blocking::Client` that
/// implements the [`Wire`] trait. It inherits reqwest's default
/// configuration, including connection pooling.
///
/// User info is stripped from the target URL before sending; the
/// `Authorization` header derived from it is already among the headers.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use rexsl_test::{BaseRequest, Request, ReqwestWire};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let request = BaseRequest::new(Arc::new(ReqwestWire::new()), "https://www.example.com")?;
/// let response = request.fetch()?;
/// println!("Status: {}", response.status());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestWire {
    inner: reqwest::blocking::Client,
}

impl ReqwestWire {
    /// Creates a wire with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: reqwest::blocking::Client::new(),
        }
    }

    /// Creates a wire with a total per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::InvalidRequest`] if the client cannot be built
    /// (e.g. the TLS backend fails to initialize).
    pub fn with_timeout(timeout: Duration) -> Result<Self, WireError> {
        let inner = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WireError::InvalidRequest(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Creates a wire that hands 3xx responses back instead of following
    /// them, so callers can assert on redirects and
    /// [`follow`](crate::RestResponse::follow) them explicitly.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::InvalidRequest`] if the client cannot be built.
    pub fn without_redirects() -> Result<Self, WireError> {
        let inner = reqwest::blocking::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| WireError::InvalidRequest(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Creates a wire from an existing reqwest client.
    ///
    /// Useful when you need custom configuration (proxies, TLS, etc.).
    #[must_use]
    pub const fn from_client(client: reqwest::blocking::Client) -> Self {
        Self { inner: client }
    }
}

impl Default for ReqwestWire {
    fn default() -> Self {
        Self::new()
    }
}

impl Wire for ReqwestWire {
    fn send(
        &self,
        request: &BaseRequest,
        uri: &Url,
        method: &Method,
        headers: &[Header],
        body: &[u8],
    ) -> Result<Response, WireError> {
        let mut target = uri.clone();
        // Only fails for URLs without a host, which reqwest rejects anyway
        let _ = target.set_username("");
        let _ = target.set_password(None);

        let mut builder = self.inner.request(method.clone(), target);
        for header in headers {
            builder = builder.header(header.name(), header.value());
        }
        if !body.is_empty() {
            builder = builder.body(body.to_vec());
        }

        let response = builder.send().map_err(classify)?;

        let status = response.status();
        let reason = status.canonical_reason().unwrap_or_default().to_string();
        let received = response
            .headers()
            .iter()
            .map(|(name, value)| {
                Header::received(name.as_str(), String::from_utf8_lossy(value.as_bytes()))
            })
            .collect();
        let content = response
            .bytes()
            .map_err(|e| WireError::Connection(Box::new(e)))?
            .to_vec();

        tracing::debug!(
            "{} {} answered {} with {} byte(s)",
            method,
            uri.path(),
            status.as_u16(),
            content.len()
        );

        Ok(Response::new(request.clone(), status, reason, received, content))
    }
}

fn classify(error: reqwest::Error) -> WireError {
    if error.is_timeout() {
        WireError::Timeout
    } else if error.is_builder() {
        WireError::InvalidRequest(error.to_string())
    } else if error.is_decode() {
        WireError::MalformedResponse(error.to_string())
    } else {
        WireError::Connection(Box::new(error))
    }
}
