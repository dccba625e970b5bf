//! Request/response exchange state machine.
//!
//! One exchange is one datagram out and one datagram in. There is no
//! correlation id: the client never has more than one request outstanding,
//! so the next datagram to arrive is taken as the answer.
//!
//! ```text
//! Idle -> Sent -> AwaitingResponse -> Completed
//!           \             \
//!            +-------------+--------> Failed
//! ```
//!
//! `Completed` may begin a new exchange. `Failed` is final.

use bytes::Bytes;
use passgen_proto::{PasswordRequest, PasswordResponse};
use thiserror::Error;

/// Exchange state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeState {
    /// No request in flight
    Idle,
    /// Request encoded and handed to the socket
    Sent(PasswordRequest),
    /// Send completed, waiting for the one response datagram
    AwaitingResponse(PasswordRequest),
    /// Response received
    Completed(PasswordResponse),
    /// Send or receive failed
    Failed(String),
}

impl ExchangeState {
    fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Sent(_) => "sent",
            Self::AwaitingResponse(_) => "awaiting response",
            Self::Completed(_) => "completed",
            Self::Failed(_) => "failed",
        }
    }
}

/// Transition attempted from a state that does not allow it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot {event} while exchange is {state}")]
pub struct ExchangeError {
    /// Attempted transition
    pub event: &'static str,
    /// State at the time of the attempt
    pub state: &'static str,
}

/// Client side of the request/response exchange.
#[derive(Debug, Clone)]
pub struct Exchange {
    state: ExchangeState,
}

impl Exchange {
    /// Create an idle exchange.
    pub fn new() -> Self {
        Self { state: ExchangeState::Idle }
    }

    /// Current state.
    pub fn state(&self) -> &ExchangeState {
        &self.state
    }

    /// Encode `request` and mark it sent.
    ///
    /// Returns the datagram to transmit.
    pub fn begin(&mut self, request: PasswordRequest) -> Result<Bytes, ExchangeError> {
        match self.state {
            ExchangeState::Idle | ExchangeState::Completed(_) => {
                self.transition(ExchangeState::Sent(request));
                Ok(request.to_bytes())
            },
            _ => Err(self.invalid("begin")),
        }
    }

    /// The socket accepted the datagram.
    pub fn sent(&mut self) -> Result<(), ExchangeError> {
        match self.state {
            ExchangeState::Sent(request) => {
                self.transition(ExchangeState::AwaitingResponse(request));
                Ok(())
            },
            _ => Err(self.invalid("confirm send")),
        }
    }

    /// A response datagram arrived.
    pub fn received(&mut self, payload: &[u8]) -> Result<PasswordResponse, ExchangeError> {
        if !matches!(self.state, ExchangeState::AwaitingResponse(_)) {
            return Err(self.invalid("receive"));
        }

        let response = PasswordResponse::from_bytes(payload);
        self.transition(ExchangeState::Completed(response.clone()));
        Ok(response)
    }

    /// Send or receive failed. The exchange cannot be resumed.
    pub fn fail(&mut self, reason: impl Into<String>) {
        self.transition(ExchangeState::Failed(reason.into()));
    }

    /// Whether the exchange has failed.
    pub fn is_failed(&self) -> bool {
        matches!(self.state, ExchangeState::Failed(_))
    }

    fn transition(&mut self, next: ExchangeState) {
        tracing::debug!(from = self.state.name(), to = next.name(), "exchange transition");
        self.state = next;
    }

    fn invalid(&self, event: &'static str) -> ExchangeError {
        ExchangeError { event, state: self.state.name() }
    }
}

impl Default for Exchange {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use passgen_proto::{FAILURE_MARKER, PasswordKind};

    use super::*;

    fn request() -> PasswordRequest {
        PasswordRequest::new(PasswordKind::Mixed, 10)
    }

    #[test]
    fn full_exchange() {
        let mut exchange = Exchange::new();

        let payload = exchange.begin(request()).unwrap();
        assert_eq!(payload, request().to_bytes());
        assert_eq!(exchange.state(), &ExchangeState::Sent(request()));

        exchange.sent().unwrap();
        assert_eq!(exchange.state(), &ExchangeState::AwaitingResponse(request()));

        let response = exchange.received(b"abc123def4").unwrap();
        assert_eq!(response, PasswordResponse::Password("abc123def4".to_string()));
    }

    #[test]
    fn completed_exchange_can_begin_again() {
        let mut exchange = Exchange::new();
        exchange.begin(request()).unwrap();
        exchange.sent().unwrap();
        exchange.received(FAILURE_MARKER.as_bytes()).unwrap();

        assert_eq!(exchange.state(), &ExchangeState::Completed(PasswordResponse::Failed));
        assert!(exchange.begin(request()).is_ok());
    }

    #[test]
    fn one_request_outstanding() {
        let mut exchange = Exchange::new();
        exchange.begin(request()).unwrap();

        let err = exchange.begin(request()).unwrap_err();
        assert_eq!(err.to_string(), "cannot begin while exchange is sent");

        exchange.sent().unwrap();
        assert!(exchange.begin(request()).is_err());
    }

    #[test]
    fn receive_requires_send() {
        let mut exchange = Exchange::new();

        assert!(exchange.received(b"abcdef").is_err());
        assert_eq!(exchange.state(), &ExchangeState::Idle);
    }

    #[test]
    fn failure_is_final() {
        let mut exchange = Exchange::new();
        exchange.begin(request()).unwrap();
        exchange.fail("send failed");

        assert!(exchange.is_failed());
        assert!(exchange.begin(request()).is_err());
        assert!(exchange.sent().is_err());
    }
}
