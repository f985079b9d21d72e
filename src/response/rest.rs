//! Assertion façade over a response.

use http::StatusCode;

use super::{AssertionError, Response, ResponseAdapter};
use crate::header::{LOCATION, SET_COOKIE};
use crate::request::{BaseRequest, Request};

/// Response façade with assertions and navigation helpers.
///
/// Assertions consume and return the façade so they chain:
///
/// ```no_run
/// use std::sync::Arc;
/// use http::StatusCode;
/// use rexsl_test::{BaseRequest, Request, ReqwestWire, RestResponse};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let wire = Arc::new(ReqwestWire::without_redirects()?);
/// let next = BaseRequest::new(wire, "https://www.example.com/login")?
///     .fetch()?
///     .adapt::<RestResponse<_>>()
///     .assert_status(StatusCode::SEE_OTHER)?
///     .follow()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RestResponse<R = BaseRequest> {
    origin: Response<R>,
}

impl<R> ResponseAdapter<R> for RestResponse<R> {
    fn adapt(response: Response<R>) -> Self {
        Self { origin: response }
    }
}

impl<R: Request> RestResponse<R> {
    /// Borrows the wrapped response.
    #[must_use]
    pub const fn response(&self) -> &Response<R> {
        &self.origin
    }

    /// Unwraps the response.
    #[must_use]
    pub fn into_inner(self) -> Response<R> {
        self.origin
    }

    /// Verifies the status code.
    ///
    /// # Errors
    ///
    /// Returns [`AssertionError::Status`] carrying the full response text.
    pub fn assert_status(self, expected: StatusCode) -> Result<Self, AssertionError> {
        let actual = self.origin.status();
        if actual != expected {
            return Err(AssertionError::Status {
                expected,
                actual,
                response: self.origin.to_string(),
            });
        }
        Ok(self)
    }

    /// Verifies that one of the header's values equals `expected`.
    ///
    /// # Errors
    ///
    /// Returns [`AssertionError::MissingHeader`] or
    /// [`AssertionError::HeaderMismatch`].
    pub fn assert_header(self, name: &str, expected: &str) -> Result<Self, AssertionError> {
        let values = self.origin.header(name);
        if values.is_empty() {
            return Err(AssertionError::MissingHeader {
                name: name.to_string(),
            });
        }
        if !values.contains(&expected) {
            return Err(AssertionError::HeaderMismatch {
                name: name.to_string(),
                expected: expected.to_string(),
                actual: values.into_iter().map(ToString::to_string).collect(),
            });
        }
        Ok(self)
    }

    /// Verifies that the body contains `fragment`.
    ///
    /// # Errors
    ///
    /// Returns [`AssertionError::BodyMismatch`].
    pub fn assert_body_contains(self, fragment: &str) -> Result<Self, AssertionError> {
        if !self.origin.body().contains(fragment) {
            return Err(AssertionError::BodyMismatch {
                expected: fragment.to_string(),
            });
        }
        Ok(self)
    }

    /// Returns the value of a cookie set by the response.
    ///
    /// When several `Set-Cookie` headers carry the name, the last one wins.
    #[must_use]
    pub fn cookie(&self, name: &str) -> Option<String> {
        self.origin
            .header(SET_COOKIE)
            .into_iter()
            .filter_map(|line| {
                let pair = line.split(';').next()?;
                let (key, value) = pair.split_once('=')?;
                (key.trim() == name).then(|| value.trim().to_string())
            })
            .last()
    }

    /// Derives a request pointing at `location`, resolved against the URI
    /// of the request that produced this response.
    ///
    /// # Errors
    ///
    /// Returns [`AssertionError::InvalidLocation`] if the location does not
    /// resolve to a URL.
    pub fn jump(&self, location: &str) -> Result<R, AssertionError> {
        let target = self
            .origin
            .request()
            .home()
            .join(location)
            .map_err(|e| AssertionError::InvalidLocation {
                location: location.to_string(),
                reason: e.to_string(),
            })?;
        Ok(self.origin.back().uri().set(target).back())
    }

    /// Derives a request pointing at the `Location` header.
    ///
    /// # Errors
    ///
    /// Returns [`AssertionError::MissingHeader`] without a `Location`
    /// header, or the errors of [`RestResponse::jump`].
    pub fn follow(&self) -> Result<R, AssertionError> {
        let location = self
            .origin
            .header(LOCATION)
            .first()
            .map(|l| (*l).to_string())
            .ok_or_else(|| AssertionError::MissingHeader {
                name: LOCATION.to_string(),
            })?;
        self.jump(&location)
    }
}
