//! Wire decorator that logs every exchange in full.

use std::fmt::Write as _;
use std::sync::Arc;

use http::Method;
use url::Url;

use super::{Wire, WireError};
use crate::header::Header;
use crate::request::BaseRequest;
use crate::response::Response;

/// Logs the complete request and response text of every exchange at
/// `INFO` level.
///
/// Non-ASCII body bytes are printed as `\uXXXX` escapes so binary bodies
/// never garble the log.
///
/// ```
/// use std::sync::Arc;
/// use rexsl_test::{BaseRequest, Request, ReqwestWire, VerboseWire};
///
/// let request = BaseRequest::new(Arc::new(ReqwestWire::new()), "http://localhost/")
///     .unwrap()
///     .through(VerboseWire::new);
/// ```
pub struct VerboseWire {
    origin: Arc<dyn Wire>,
}

impl VerboseWire {
    /// Wraps another wire.
    #[must_use]
    pub fn new(origin: Arc<dyn Wire>) -> Self {
        Self { origin }
    }
}

impl Wire for VerboseWire {
    fn send(
        &self,
        request: &BaseRequest,
        uri: &Url,
        method: &Method,
        headers: &[Header],
        body: &[u8],
    ) -> Result<Response, WireError> {
        let response = self.origin.send(request, uri, method, headers, body)?;
        tracing::info!(
            "#send({method} {uri}):\nHTTP Request:\n{}\nHTTP Response:\n{}",
            indent(&request_text(headers, body)),
            indent(&response.to_string())
        );
        Ok(response)
    }
}

pub(super) fn request_text(headers: &[Header], body: &[u8]) -> String {
    let mut text = String::new();
    for header in headers {
        let _ = writeln!(text, "{header}");
    }
    text.push('\n');
    text.push_str(&printable(body));
    text
}

/// Renders bytes with ASCII kept and everything else escaped.
pub(super) fn printable(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        return "<<empty>>".to_string();
    }
    let mut text = String::with_capacity(bytes.len());
    for &byte in bytes {
        if byte.is_ascii() {
            text.push(char::from(byte));
        } else {
            let _ = write!(text, "\\u{byte:04x}");
        }
    }
    text
}

pub(super) fn indent(text: &str) -> String {
    let mut indented = String::from("  ");
    indented.push_str(&text.replace('\n', "\n  "));
    indented
}
