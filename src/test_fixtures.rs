//! Shared test doubles for wires and sleepers.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use http::{Method, StatusCode};
use url::Url;

use crate::header::Header;
use crate::request::BaseRequest;
use crate::response::Response;
use crate::time::Sleeper;
use crate::wire::{Wire, WireError};

/// One exchange seen by [`MockWire`].
#[derive(Debug, Clone)]
pub struct Exchange {
    pub uri: Url,
    pub method: Method,
    pub headers: Vec<Header>,
    pub body: Vec<u8>,
}

impl Exchange {
    /// Values of one header, ignoring name case.
    pub fn header(&self, name: &str) -> Vec<&str> {
        self.headers
            .iter()
            .filter(|h| h.is(name))
            .map(Header::value)
            .collect()
    }
}

type Outcome = Result<(StatusCode, Vec<Header>, Vec<u8>), WireError>;

/// Wire returning a scripted sequence of outcomes, then `200 OK`.
#[derive(Debug)]
pub struct MockWire {
    outcomes: Mutex<VecDeque<Outcome>>,
    exchanges: Mutex<Vec<Exchange>>,
    calls: AtomicUsize,
    always_fail: bool,
}

impl MockWire {
    fn scripted(outcomes: Vec<Outcome>, always_fail: bool) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            exchanges: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            always_fail,
        }
    }

    /// Always answers `200 OK` with an empty body.
    pub fn ok() -> Self {
        Self::scripted(Vec::new(), false)
    }

    /// Answers once with the given status, headers and body.
    pub fn answering(status: StatusCode, headers: Vec<Header>, body: &str) -> Self {
        Self::scripted(vec![Ok((status, headers, body.as_bytes().to_vec()))], false)
    }

    /// Fails `failures` times with a refused connection, then succeeds.
    pub fn failing_then_ok(failures: usize) -> Self {
        let outcomes = (0..failures).map(|_| Err(refused())).collect();
        Self::scripted(outcomes, false)
    }

    /// Always fails with a refused connection.
    pub fn always_failing() -> Self {
        Self::scripted(Vec::new(), true)
    }

    /// Fails once with the given error, then succeeds.
    pub fn failing_with(error: WireError) -> Self {
        Self::scripted(vec![Err(error)], false)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn exchanges(&self) -> Vec<Exchange> {
        self.exchanges.lock().unwrap().clone()
    }

    pub fn last(&self) -> Exchange {
        self.exchanges().pop().expect("at least one exchange")
    }
}

impl Wire for MockWire {
    fn send(
        &self,
        request: &BaseRequest,
        uri: &Url,
        method: &Method,
        headers: &[Header],
        body: &[u8],
    ) -> Result<Response, WireError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.exchanges.lock().unwrap().push(Exchange {
            uri: uri.clone(),
            method: method.clone(),
            headers: headers.to_vec(),
            body: body.to_vec(),
        });
        if self.always_fail {
            return Err(refused());
        }
        let outcome = self
            .outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok((StatusCode::OK, Vec::new(), Vec::new())));
        let (status, headers, body) = outcome?;
        let reason = status.canonical_reason().unwrap_or_default();
        Ok(Response::new(request.clone(), status, reason, headers, body))
    }
}

pub fn refused() -> WireError {
    WireError::Connection(Box::new(std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "connection refused",
    )))
}

/// Sleeper recording requested durations instead of waiting.
///
/// Clones share one log, so the copy handed to a request can be inspected
/// through the original.
#[derive(Debug, Clone, Default)]
pub struct RecordingSleeper {
    slept: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    pub fn slept(&self) -> Vec<Duration> {
        self.slept.lock().unwrap().clone()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) {
        self.slept.lock().unwrap().push(duration);
    }
}
