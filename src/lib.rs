//! rexsl-test: immutable fluent HTTP requests.
//!
//! A library for building HTTP requests as immutable values, sending them
//! through a pluggable [`Wire`], retrying transport failures with
//! [`RetryRequest`] and inspecting the resulting [`Response`].
//!
//! ```no_run
//! use http::StatusCode;
//! use rexsl_test::{BaseRequest, Request, RestResponse, RetryRequest};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let base = RetryRequest::new(BaseRequest::reqwest("https://www.example.com")?);
//! let page = base
//!     .uri().path("/users")?.query_param("id", 333).back()
//!     .with_header("Accept", "text/html")?
//!     .fetch()?
//!     .adapt::<RestResponse<_>>()
//!     .assert_status(StatusCode::OK)?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod header;
pub mod request;
pub mod response;
pub mod time;
pub mod wire;

#[cfg(test)]
mod test_fixtures;

pub use header::Header;
pub use request::{
    BaseRequest, FetchError, IsRetryable, Request, RequestBody, RequestError, RequestUri,
    RetryPolicy, RetryRequest,
};
pub use response::{AssertionError, JsonResponse, Response, ResponseAdapter, RestResponse};
pub use wire::{CookieOptimizingWire, ReqwestWire, VerboseWire, Wire, WireError};
