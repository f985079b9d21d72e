//! Request decorator retrying failed fetches.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use http::Method;
use url::Url;

use super::{FetchError, Request, RequestError, RetryPolicy};
use crate::header::Header;
use crate::response::Response;
use crate::time::{Sleeper, ThreadSleeper};
use crate::wire::{Wire, WireError};

/// A [`Request`] that retries [`fetch`](Request::fetch) on transport failure.
///
/// Use it to avoid accidental failures when the connection is weak or
/// unstable:
///
/// ```no_run
/// use rexsl_test::{BaseRequest, Request, RetryRequest};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let body = RetryRequest::new(BaseRequest::reqwest("https://www.example.com")?)
///     .fetch()?
///     .body()
///     .into_owned();
/// # Ok(())
/// # }
/// ```
///
/// Every request-returning operation re-wraps its result, and the URI and
/// body views as well as fetched responses are bound to the decorator, so
/// `retrying.uri().path("/x")?.back().fetch()` still retries.
///
/// No counters are stored; concurrent fetches run independent loops.
///
/// # Type Parameters
///
/// - `R`: The decorated request
/// - `S`: The sleeper used between attempts (defaults to [`ThreadSleeper`])
#[derive(Debug, Clone)]
pub struct RetryRequest<R, S = ThreadSleeper> {
    origin: R,
    policy: RetryPolicy,
    sleeper: S,
}

impl<R: Request> RetryRequest<R> {
    /// Wraps a request with the default [`RetryPolicy`].
    #[must_use]
    pub fn new(origin: R) -> Self {
        Self {
            origin,
            policy: RetryPolicy::default(),
            sleeper: ThreadSleeper,
        }
    }
}

impl<R, S> RetryRequest<R, S> {
    /// Sets a custom sleeper for retry delays.
    ///
    /// This is primarily useful for testing to avoid actual delays.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> RetryRequest<R, S2> {
        RetryRequest {
            origin: self.origin,
            policy: self.policy,
            sleeper,
        }
    }

    /// Sets the retry policy.
    #[must_use]
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the decorated request.
    #[must_use]
    pub const fn origin(&self) -> &R {
        &self.origin
    }

    /// Returns the retry policy.
    #[must_use]
    pub const fn policy(&self) -> &RetryPolicy {
        &self.policy
    }
}

impl<R: Request, S: Sleeper + Clone + fmt::Debug> RetryRequest<R, S> {
    fn wrap(&self, origin: R) -> Self {
        Self {
            origin,
            policy: self.policy.clone(),
            sleeper: self.sleeper.clone(),
        }
    }

    /// Decides what follows a failed attempt: the delay before the next
    /// one, or the error to give up with.
    fn after_failure(
        &self,
        attempt: u32,
        started: Instant,
        error: WireError,
    ) -> Result<Duration, FetchError> {
        if !self.policy.should_retry(attempt) {
            tracing::warn!("#fetch(): giving up after {attempt} attempt(s): {error}");
            return Err(FetchError::RetriesExhausted {
                attempts: attempt,
                last_error: error,
            });
        }
        let delay = self.policy.backoff(attempt - 1);
        if let Some(deadline) = self.policy.deadline {
            if started.elapsed() + delay > deadline {
                tracing::warn!(
                    "#fetch(): deadline of {}ms reached after {attempt} attempt(s): {error}",
                    deadline.as_millis()
                );
                return Err(FetchError::DeadlineExceeded {
                    deadline,
                    attempts: attempt,
                    last_error: error,
                });
            }
        }
        tracing::warn!(
            "#fetch(): attempt {attempt}/{} failed, retrying in {}ms: {error}",
            self.policy.max_attempts,
            delay.as_millis()
        );
        Ok(delay)
    }
}

impl<R: Request, S: Sleeper + Clone + fmt::Debug> Request for RetryRequest<R, S> {
    fn with_header(&self, name: &str, value: impl fmt::Display) -> Result<Self, RequestError> {
        Ok(self.wrap(self.origin.with_header(name, value)?))
    }

    fn without_header(&self, name: &str) -> Self {
        self.wrap(self.origin.without_header(name))
    }

    fn with_method(&self, method: Method) -> Self {
        self.wrap(self.origin.with_method(method))
    }

    fn through<W, F>(&self, decorate: F) -> Self
    where
        W: Wire + 'static,
        F: FnOnce(Arc<dyn Wire>) -> W,
    {
        self.wrap(self.origin.through(decorate))
    }

    fn fetch(&self) -> Result<Response<Self>, FetchError> {
        let started = Instant::now();
        let mut attempt = 0;
        loop {
            attempt += 1;
            let error = match self.origin.fetch() {
                Ok(response) => return Ok(response.rebind(self.clone())),
                Err(FetchError::Wire(e)) if e.is_retryable() => e,
                Err(e) => return Err(e),
            };
            let delay = self.after_failure(attempt, started, error)?;
            self.sleeper.sleep(delay);
        }
    }

    fn home(&self) -> &Url {
        self.origin.home()
    }

    fn method(&self) -> &Method {
        self.origin.method()
    }

    fn headers(&self) -> &[Header] {
        self.origin.headers()
    }

    fn content(&self) -> &[u8] {
        self.origin.content()
    }

    fn with_home(&self, uri: Url) -> Self {
        self.wrap(self.origin.with_home(uri))
    }

    fn with_content(&self, body: Vec<u8>) -> Self {
        self.wrap(self.origin.with_content(body))
    }
}

impl<R: PartialEq, S> PartialEq for RetryRequest<R, S> {
    fn eq(&self, other: &Self) -> bool {
        self.origin == other.origin && self.policy == other.policy
    }
}

impl<R: fmt::Display, S> fmt::Display for RetryRequest<R, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.origin, f)
    }
}

/// Extension trait for checking if an error is retryable.
///
/// Determines whether an error represents a transient failure that
/// warrants another attempt.
pub trait IsRetryable {
    /// Returns true if the error is potentially transient and should be retried.
    fn is_retryable(&self) -> bool;
}

impl IsRetryable for WireError {
    fn is_retryable(&self) -> bool {
        match self {
            // Network errors are typically transient
            Self::Connection(_) | Self::Timeout | Self::Io(_) | Self::MalformedResponse(_) => true,
            // The wire cannot express the request; another attempt won't help
            Self::InvalidRequest(_) => false,
        }
    }
}

impl IsRetryable for FetchError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::Wire(e) => e.is_retryable(),
            // Already retried by an inner decorator, or invalid input
            Self::Request(_) | Self::RetriesExhausted { .. } | Self::DeadlineExceeded { .. } => {
                false
            }
        }
    }
}
