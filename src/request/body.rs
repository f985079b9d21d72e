//! Body view of a request.

use std::borrow::Cow;
use std::fmt;

use super::{Request, encode};

/// The body of a request, bound to one request snapshot.
///
/// ```
/// use std::sync::Arc;
/// use rexsl_test::{BaseRequest, Request, ReqwestWire};
///
/// let body = BaseRequest::new(Arc::new(ReqwestWire::new()), "http://example.com/")
///     .unwrap()
///     .body()
///     .form_param("name", "John Doe")
///     .form_param("age", 42);
///
/// assert_eq!(body.get(), "name=John%20Doe&age=42&");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RequestBody<R> {
    owner: R,
}

impl<R: Request> RequestBody<R> {
    pub(super) const fn new(owner: R) -> Self {
        Self { owner }
    }

    /// Returns the body as text, replacing invalid UTF-8 sequences.
    #[must_use]
    pub fn get(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.owner.content())
    }

    /// Returns the raw body bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        self.owner.content()
    }

    /// Returns the request owning this view.
    #[must_use]
    pub fn back(self) -> R {
        self.owner
    }

    /// Replaces the body with text.
    #[must_use]
    pub fn set(&self, text: impl Into<String>) -> Self {
        Self::new(self.owner.with_content(text.into().into_bytes()))
    }

    /// Replaces the body with raw bytes.
    #[must_use]
    pub fn set_bytes(&self, body: impl Into<Vec<u8>>) -> Self {
        Self::new(self.owner.with_content(body.into()))
    }

    /// Appends `name=value&`, percent-encoding the value.
    ///
    /// Every parameter is followed by `&`, including the last one.
    #[must_use]
    pub fn form_param(&self, name: &str, value: impl fmt::Display) -> Self {
        self.form_params([(name, value)])
    }

    /// Appends form parameters in iteration order.
    #[must_use]
    pub fn form_params<I, K, V>(&self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: fmt::Display,
    {
        let mut content = self.owner.content().to_vec();
        for (name, value) in params {
            content.extend_from_slice(name.as_ref().as_bytes());
            content.push(b'=');
            content.extend_from_slice(encode(&value.to_string()).as_bytes());
            content.push(b'&');
        }
        Self::new(self.owner.with_content(content))
    }
}

impl<R: Request> fmt::Display for RequestBody<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.get())
    }
}
