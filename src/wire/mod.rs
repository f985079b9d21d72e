//! Wire layer performing the actual network exchange.
//!
//! This module provides:
//! - The transport abstraction ([`Wire`])
//! - Production transport backed by reqwest ([`ReqwestWire`])
//! - Wire decorators ([`VerboseWire`], [`CookieOptimizingWire`])
//! - Transport error type ([`WireError`])

mod client;
mod cookie;
mod error;
mod verbose;


pub use client::ReqwestWire;
pub use cookie::CookieOptimizingWire;
pub use error::WireError;
pub use verbose::VerboseWire;

use http::Method;
use url::Url;

use crate::header::Header;
use crate::request::BaseRequest;
use crate::response::Response;

/// Trait for sending a prepared request over the network.
///
/// # Design
///
/// The wire receives the fully prepared exchange: default and derived
/// headers are already in `headers`. Implementations perform the I/O and
/// build a [`Response`] bound to `request`.
///
/// Wires are shared between all requests derived from one another, so they
/// must be callable from any thread. Decorators wrap another wire and are
/// installed with [`Request::through`](crate::Request::through).
///
/// # Example
///
/// ```
/// use http::{Method, StatusCode};
/// use rexsl_test::{BaseRequest, Header, Response, Wire, WireError};
/// use url::Url;
///
/// struct Teapot;
///
/// impl Wire for Teapot {
///     fn send(
///         &self,
///         request: &BaseRequest,
///         _uri: &Url,
///         _method: &Method,
///         _headers: &[Header],
///         _body: &[u8],
///     ) -> Result<Response, WireError> {
///         Ok(Response::new(
///             request.clone(),
///             StatusCode::IM_A_TEAPOT,
///             "I'm a teapot",
///             Vec::new(),
///             Vec::new(),
///         ))
///     }
/// }
/// ```
pub trait Wire: Send + Sync {
    /// Sends a request and returns the response.
    ///
    /// # Arguments
    ///
    /// * `request` - The request being fetched, for the response back-reference
    /// * `uri` - Absolute target URI (may still carry user info)
    /// * `method` - HTTP method
    /// * `headers` - Headers to send, in order, duplicates included
    /// * `body` - Request body, possibly empty
    ///
    /// # Errors
    ///
    /// Returns [`WireError`] when the exchange cannot be completed.
    fn send(
        &self,
        request: &BaseRequest,
        uri: &Url,
        method: &Method,
        headers: &[Header],
        body: &[u8],
    ) -> Result<Response, WireError>;
}
