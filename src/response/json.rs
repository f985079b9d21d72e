//! JSON façade over a response.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{AssertionError, Response, ResponseAdapter};
use crate::request::BaseRequest;

/// Response façade reading the body as JSON.
#[derive(Debug, Clone)]
pub struct JsonResponse<R = BaseRequest> {
    origin: Response<R>,
}

impl<R> ResponseAdapter<R> for JsonResponse<R> {
    fn adapt(response: Response<R>) -> Self {
        Self { origin: response }
    }
}

impl<R> JsonResponse<R> {
    /// Borrows the wrapped response.
    #[must_use]
    pub const fn response(&self) -> &Response<R> {
        &self.origin
    }

    /// Parses the body into an untyped JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`AssertionError::InvalidJson`] if the body is not JSON.
    pub fn value(&self) -> Result<Value, AssertionError> {
        Ok(serde_json::from_slice(self.origin.binary())?)
    }

    /// Deserializes the body into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`AssertionError::InvalidJson`] if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, AssertionError> {
        Ok(serde_json::from_slice(self.origin.binary())?)
    }

    /// Verifies the value at a JSON pointer (RFC 6901, e.g. `/user/name`).
    ///
    /// # Errors
    ///
    /// Returns [`AssertionError::InvalidJson`] or
    /// [`AssertionError::JsonMismatch`].
    pub fn assert_json(self, pointer: &str, expected: &Value) -> Result<Self, AssertionError> {
        let document = self.value()?;
        let actual = document.pointer(pointer);
        if actual != Some(expected) {
            return Err(AssertionError::JsonMismatch {
                pointer: pointer.to_string(),
                expected: expected.clone(),
                actual: actual.cloned(),
            });
        }
        Ok(self)
    }
}
