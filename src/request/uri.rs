//! URI view of a request.

use std::fmt;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use url::Url;

use super::{Request, RequestError, encode};

/// Bytes kept literal in a path segment: unreserved, sub-delims, `:` and `@`.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b';')
    .remove(b'=')
    .remove(b':')
    .remove(b'@');

/// The destination URI of a request, bound to one request snapshot.
///
/// Mutators derive a new request with only the URI replaced and return a
/// view of it; [`back`](RequestUri::back) hands that request over.
///
/// ```
/// use std::sync::Arc;
/// use rexsl_test::{BaseRequest, Request, ReqwestWire};
///
/// let request = BaseRequest::new(Arc::new(ReqwestWire::new()), "http://example.com/api")
///     .unwrap()
///     .uri()
///     .path("users")
///     .unwrap()
///     .query_param("id", 333)
///     .back();
///
/// assert_eq!(request.home().as_str(), "http://example.com/api/users?id=333");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RequestUri<R> {
    owner: R,
}

impl<R: Request> RequestUri<R> {
    pub(super) const fn new(owner: R) -> Self {
        Self { owner }
    }

    /// Returns the URI.
    #[must_use]
    pub fn get(&self) -> &Url {
        self.owner.home()
    }

    /// Returns the request owning this view.
    #[must_use]
    pub fn back(self) -> R {
        self.owner
    }

    /// Replaces the URI.
    #[must_use]
    pub fn set(&self, uri: Url) -> Self {
        Self::new(self.owner.with_home(uri))
    }

    /// Appends one query parameter, percent-encoding name and value.
    #[must_use]
    pub fn query_param(&self, name: &str, value: impl fmt::Display) -> Self {
        self.query_params([(name, value)])
    }

    /// Appends query parameters in iteration order.
    ///
    /// Equivalent to calling [`query_param`](RequestUri::query_param) once
    /// per pair.
    #[must_use]
    pub fn query_params<I, K, V>(&self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: fmt::Display,
    {
        let mut query = self.get().query().unwrap_or_default().to_string();
        let before = query.len();
        for (name, value) in params {
            if !query.is_empty() {
                query.push('&');
            }
            query.push_str(&encode(name.as_ref()));
            query.push('=');
            query.push_str(&encode(&value.to_string()));
        }
        if query.len() == before {
            return self.clone();
        }
        let mut uri = self.get().clone();
        uri.set_query(Some(&query));
        self.set(uri)
    }

    /// Appends a path, one encoded segment per `/`-separated piece.
    ///
    /// The slash between the current path and `segment` is collapsed, so
    /// `http://h/a` + `/b` and `http://h/a/` + `b` both give `http://h/a/b`.
    /// A trailing `/` in `segment` is kept. Valid `%XX` escapes pass through
    /// untouched, and `.`/`..` pieces are resolved against the current path
    /// (`http://h/a/b` + `../c` gives `http://h/a/c`).
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::CannotBeABase`] if the URI cannot carry a
    /// path (e.g. `mailto:`).
    pub fn path(&self, segment: &str) -> Result<Self, RequestError> {
        if segment.is_empty() {
            return Ok(self.clone());
        }
        let current = self.get();
        if current.cannot_be_a_base() {
            return Err(RequestError::CannotBeABase(current.to_string()));
        }
        let mut path = current
            .path()
            .strip_suffix('/')
            .unwrap_or_else(|| current.path())
            .to_string();
        for piece in segment.split('/').filter(|piece| !piece.is_empty()) {
            path.push('/');
            path.push_str(&encode_segment(piece));
        }
        if segment.ends_with('/') || path.is_empty() {
            path.push('/');
        }
        let mut uri = current.clone();
        uri.set_path(&path);
        Ok(self.set(uri))
    }

    /// Replaces the user info with `user` or `user:password`.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::CannotBeABase`] if the URI cannot carry
    /// credentials (no host, or `file:`).
    pub fn user_info(&self, info: &str) -> Result<Self, RequestError> {
        let (user, password) = match info.split_once(':') {
            Some((user, password)) => (user, Some(password)),
            None => (info, None),
        };
        let rejected = |()| RequestError::CannotBeABase(self.get().to_string());
        let mut uri = self.get().clone();
        uri.set_username(user).map_err(rejected)?;
        uri.set_password(password).map_err(rejected)?;
        Ok(self.set(uri))
    }
}

impl<R: Request> fmt::Display for RequestUri<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.get(), f)
    }
}

/// Percent-encodes one path segment, keeping valid `%XX` escapes as given.
///
/// A `%` that does not start an escape is encoded as `%25`.
fn encode_segment(piece: &str) -> String {
    let mut out = String::with_capacity(piece.len());
    let mut rest = piece;
    while let Some(at) = rest.find('%') {
        let (text, tail) = rest.split_at(at);
        out.extend(utf8_percent_encode(text, SEGMENT));
        let escape = tail
            .get(..3)
            .filter(|escape| escape.bytes().skip(1).all(|b| b.is_ascii_hexdigit()));
        if let Some(escape) = escape {
            out.push_str(escape);
            rest = &tail[3..];
        } else {
            out.push_str("%25");
            rest = &tail[1..];
        }
    }
    out.extend(utf8_percent_encode(rest, SEGMENT));
    out
}
