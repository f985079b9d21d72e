//! Core request aggregate dispatching to a wire.

use std::borrow::Cow;
use std::fmt;
use std::sync::{Arc, LazyLock};
use std::time::Instant;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use http::Method;
use percent_encoding::percent_decode_str;
use url::Url;

use super::{FetchError, Request, RequestError};
use crate::header::{AUTHORIZATION, Header, USER_AGENT};
use crate::response::Response;
use crate::wire::{ReqwestWire, Wire};

/// Default user agent: product, version and platform.
static AGENT: LazyLock<String> = LazyLock::new(|| {
    format!(
        "{}/{} {}/{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
});

/// The core [`Request`] implementation.
///
/// Holds the wire, URI, method, headers and body. Every mutator returns a
/// new value sharing the untouched fields with the receiver.
///
/// On [`fetch`](Request::fetch) the request:
/// 1. adds a default `User-Agent` unless one is present (any case);
/// 2. adds `Authorization: Basic ...` derived from URI user info, if any,
///    recomputed on every call;
/// 3. hands the exchange to its [`Wire`];
/// 4. logs method, path, elapsed time and status.
///
/// Transport failures are returned as they are, without retry; wrap the
/// request in [`RetryRequest`](super::RetryRequest) for that.
///
/// Two requests are equal when URI, method, headers and body are equal;
/// the wire is not compared.
#[derive(Clone)]
pub struct BaseRequest {
    wire: Arc<dyn Wire>,
    home: Arc<Url>,
    method: Method,
    headers: Arc<[Header]>,
    content: Arc<[u8]>,
}

impl BaseRequest {
    /// Creates a `GET` request to `uri` sent through `wire`.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::InvalidUri`] if `uri` is not an absolute URL.
    pub fn new(wire: Arc<dyn Wire>, uri: &str) -> Result<Self, RequestError> {
        let home = Url::parse(uri).map_err(|e| RequestError::InvalidUri {
            uri: uri.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::from_url(wire, home))
    }

    /// Creates a `GET` request to an already parsed URL.
    #[must_use]
    pub fn from_url(wire: Arc<dyn Wire>, uri: Url) -> Self {
        Self {
            wire,
            home: Arc::new(uri),
            method: Method::GET,
            headers: Arc::from(Vec::new()),
            content: Arc::from(Vec::new()),
        }
    }

    /// Creates a `GET` request sent through a default [`ReqwestWire`].
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::InvalidUri`] if `uri` is not an absolute URL.
    pub fn reqwest(uri: &str) -> Result<Self, RequestError> {
        Self::new(Arc::new(ReqwestWire::new()), uri)
    }

    /// Returns the default `User-Agent` value.
    #[must_use]
    pub fn user_agent() -> &'static str {
        &AGENT
    }

    /// Headers handed to the wire: own headers plus injected defaults.
    fn outgoing_headers(&self) -> Result<Vec<Header>, RequestError> {
        let mut headers = self.headers.to_vec();
        if !headers.iter().any(|h| h.is(USER_AGENT)) {
            headers.push(Header::received(USER_AGENT, AGENT.as_str()));
        }
        if let Some(credentials) = basic_credentials(&self.home)? {
            headers.push(Header::received(AUTHORIZATION, credentials));
        }
        Ok(headers)
    }

    fn with_headers(&self, headers: Vec<Header>) -> Self {
        Self {
            wire: Arc::clone(&self.wire),
            home: Arc::clone(&self.home),
            method: self.method.clone(),
            headers: headers.into(),
            content: Arc::clone(&self.content),
        }
    }
}

impl Request for BaseRequest {
    fn with_header(&self, name: &str, value: impl fmt::Display) -> Result<Self, RequestError> {
        let header = Header::new(name, value.to_string())?;
        let mut headers = Vec::with_capacity(self.headers.len() + 1);
        headers.extend_from_slice(&self.headers);
        headers.push(header);
        Ok(self.with_headers(headers))
    }

    fn without_header(&self, name: &str) -> Self {
        let key = Header::normalize(name);
        let headers = self
            .headers
            .iter()
            .filter(|h| h.name() != key)
            .cloned()
            .collect();
        self.with_headers(headers)
    }

    fn with_method(&self, method: Method) -> Self {
        Self {
            method,
            ..self.clone()
        }
    }

    fn through<W, F>(&self, decorate: F) -> Self
    where
        W: Wire + 'static,
        F: FnOnce(Arc<dyn Wire>) -> W,
    {
        Self {
            wire: Arc::new(decorate(Arc::clone(&self.wire))),
            ..self.clone()
        }
    }

    fn fetch(&self) -> Result<Response<Self>, FetchError> {
        let start = Instant::now();
        let headers = self.outgoing_headers()?;
        let response = self
            .wire
            .send(self, &self.home, &self.method, &headers, &self.content)?;
        tracing::info!(
            "#fetch({} {}): completed in {}ms [{} {}]: {}",
            self.method,
            self.home.path(),
            start.elapsed().as_millis(),
            response.status().as_u16(),
            response.reason(),
            self.home.host_str().unwrap_or_default()
        );
        Ok(response)
    }

    fn home(&self) -> &Url {
        &self.home
    }

    fn method(&self) -> &Method {
        &self.method
    }

    fn headers(&self) -> &[Header] {
        &self.headers
    }

    fn content(&self) -> &[u8] {
        &self.content
    }

    fn with_home(&self, uri: Url) -> Self {
        Self {
            home: Arc::new(uri),
            ..self.clone()
        }
    }

    fn with_content(&self, body: Vec<u8>) -> Self {
        Self {
            content: body.into(),
            ..self.clone()
        }
    }
}

impl PartialEq for BaseRequest {
    fn eq(&self, other: &Self) -> bool {
        self.home == other.home
            && self.method == other.method
            && self.headers == other.headers
            && self.content == other.content
    }
}

impl Eq for BaseRequest {}

impl fmt::Debug for BaseRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseRequest")
            .field("method", &self.method)
            .field("uri", &self.home.as_str())
            .field("headers", &self.headers)
            .field("body_len", &self.content.len())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for BaseRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "HTTP/1.1 {} {}", self.method, self.home.path())?;
        for header in self.headers.iter() {
            writeln!(f, "{header}")?;
        }
        writeln!(f)?;
        if self.content.is_empty() {
            f.write_str("<<empty request body>>")
        } else {
            f.write_str(&String::from_utf8_lossy(&self.content))
        }
    }
}

/// Derives a Basic-Auth header value from the URI user info.
///
/// User and password are form-decoded: `%XX` escapes and `+` as a space.
fn basic_credentials(uri: &Url) -> Result<Option<String>, RequestError> {
    let user = uri.username();
    let password = uri.password();
    if user.is_empty() && password.is_none() {
        return Ok(None);
    }
    let decode = |part: &str| {
        let spaced = part.replace('+', " ");
        percent_decode_str(&spaced)
            .decode_utf8()
            .map(Cow::into_owned)
            .map_err(|_| RequestError::InvalidUserInfo {
                host: uri.host_str().unwrap_or_default().to_string(),
            })
    };
    let plain = format!("{}:{}", decode(user)?, decode(password.unwrap_or_default())?);
    Ok(Some(format!("Basic {}", STANDARD.encode(plain))))
}
