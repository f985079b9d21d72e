//! Application execution logic.
//!
//! This module builds the request described by the configuration, fetches
//! it once (with retries when enabled) and prints the response.

use std::io::{self, Write};
use std::sync::Arc;

use thiserror::Error;

use rexsl_test::config::{Payload, ValidatedConfig};
use rexsl_test::{
    BaseRequest, CookieOptimizingWire, FetchError, ReqwestWire, Request, RequestError, Response,
    RetryRequest, VerboseWire, Wire, WireError,
};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to create the HTTP client.
    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] WireError),

    /// The configured values do not form a valid request.
    #[error("Invalid request: {0}")]
    Request(#[from] RequestError),

    /// The exchange failed.
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// Failed to print the response.
    #[error("Failed to write response: {0}")]
    Output(#[from] io::Error),
}

/// Fetches the configured request and prints the response to stdout.
///
/// # Errors
///
/// Returns an error if:
/// - The HTTP client cannot be created
/// - The request cannot be built from the configuration
/// - The exchange fails after all permitted attempts
/// - Stdout cannot be written
///
/// # Coverage Note
///
/// This function is excluded from coverage because it performs real network I/O.
#[cfg(not(tarpaulin_include))]
pub fn execute(config: &ValidatedConfig) -> Result<(), RunError> {
    let wire = ReqwestWire::with_timeout(config.timeout).map_err(RunError::Client)?;
    let request = build_request(Arc::new(wire), config)?;
    let out = io::stdout().lock();

    match config.retry_policy.clone() {
        Some(policy) => fetch_and_print(
            &RetryRequest::new(request).with_policy(policy),
            config.include,
            out,
        ),
        None => fetch_and_print(&request, config.include, out),
    }
}

/// Builds the request described by the configuration on top of `wire`.
fn build_request(wire: Arc<dyn Wire>, config: &ValidatedConfig) -> Result<BaseRequest, RequestError> {
    let mut request = BaseRequest::from_url(wire, config.url.clone()).with_method(config.method.clone());

    // Cookies are merged before the verbose wire logs them
    if config.verbose_wire {
        request = request.through(VerboseWire::new);
    }
    if config.optimize_cookies {
        request = request.through(CookieOptimizingWire::new);
    }

    for header in &config.headers {
        request = request.with_header(header.name(), header.value())?;
    }

    let mut uri = request.uri();
    for segment in &config.paths {
        uri = uri.path(segment)?;
    }
    let request = uri
        .query_params(config.query.iter().map(|(name, value)| (name, value)))
        .back();

    Ok(match &config.payload {
        Payload::Empty => request,
        Payload::Text(text) => request.body().set(text.as_str()).back(),
        Payload::Form(params) => request
            .body()
            .form_params(params.iter().map(|(name, value)| (name, value)))
            .back(),
    })
}

/// Fetches `request` and writes the response to `out`.
fn fetch_and_print<R: Request>(request: &R, include: bool, out: impl Write) -> Result<(), RunError> {
    let response = request.fetch()?;

    if !response.is_success() {
        tracing::warn!(
            "Server answered {} {}",
            response.status().as_u16(),
            response.reason()
        );
    }

    write_response(&response, include, out)?;
    Ok(())
}

/// Writes the body, preceded by status line and headers when `include` is set.
fn write_response<R>(response: &Response<R>, include: bool, mut out: impl Write) -> io::Result<()> {
    if include {
        writeln!(
            out,
            "HTTP/1.1 {} {}",
            response.status().as_u16(),
            response.reason()
        )?;
        for header in response.header_list() {
            writeln!(out, "{header}")?;
        }
        writeln!(out)?;
    }

    out.write_all(response.binary())?;
    out.flush()
}
