//! Immutable HTTP header with normalized name.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::request::RequestError;

/// `User-Agent` header name.
pub const USER_AGENT: &str = "User-Agent";
/// `Authorization` header name.
pub const AUTHORIZATION: &str = "Authorization";
/// `Cookie` header name.
pub const COOKIE: &str = "Cookie";
/// `Set-Cookie` header name.
pub const SET_COOKIE: &str = "Set-Cookie";
/// `Location` header name.
pub const LOCATION: &str = "Location";
/// `Content-Type` header name.
pub const CONTENT_TYPE: &str = "Content-Type";
/// `Accept` header name.
pub const ACCEPT: &str = "Accept";

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[A-Za-z0-9-]+$").expect("static pattern is valid"));

/// An immutable HTTP header.
///
/// The name is normalized on construction: the first character and every
/// character following a `-` are upper-cased, everything else is kept as is.
/// The value is stored verbatim.
///
/// Headers order and compare by normalized name first, then by raw value.
///
/// # Example
///
/// ```
/// use rexsl_test::Header;
///
/// let header = Header::new("content-type", "text/xml").unwrap();
/// assert_eq!(header.name(), "Content-Type");
/// assert_eq!(header.value(), "text/xml");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Header {
    name: String,
    value: String,
}

impl Header {
    /// Creates a header from a name and a value.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::InvalidHeaderName`] if `name` is empty or
    /// contains characters other than ASCII letters, digits and `-`, and
    /// [`RequestError::InvalidHeaderValue`] if `value` contains a line break.
    pub fn new(name: &str, value: impl Into<String>) -> Result<Self, RequestError> {
        let value = value.into();
        if !NAME_PATTERN.is_match(name) {
            return Err(RequestError::InvalidHeaderName {
                name: name.to_string(),
            });
        }
        if value.contains(['\r', '\n']) {
            return Err(RequestError::InvalidHeaderValue {
                name: name.to_string(),
                reason: "line breaks are not allowed",
            });
        }
        Ok(Self {
            name: Self::normalize(name),
            value,
        })
    }

    /// Creates a header read off the wire.
    ///
    /// The name is normalized but its character set is not checked, since
    /// servers may legally send token characters outside `[A-Za-z0-9-]`.
    #[must_use]
    pub fn received(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: Self::normalize(name),
            value: value.into(),
        }
    }

    /// Normalizes a header name.
    ///
    /// ```
    /// use rexsl_test::Header;
    ///
    /// assert_eq!(Header::normalize("content-type"), "Content-Type");
    /// assert_eq!(Header::normalize("X"), "X");
    /// ```
    #[must_use]
    pub fn normalize(name: &str) -> String {
        let mut normalized = String::with_capacity(name.len());
        let mut upper = true;
        for chr in name.chars() {
            if upper {
                normalized.push(chr.to_ascii_uppercase());
            } else {
                normalized.push(chr);
            }
            upper = chr == '-';
        }
        normalized
    }

    /// Returns the normalized name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the raw value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns true if this header has the given name, ignoring ASCII case.
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}
