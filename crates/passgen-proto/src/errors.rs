//! Protocol error types.

use thiserror::Error;

/// Result alias for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors raised while decoding a request datagram.
///
/// Every variant means the datagram is dropped. None of them are retryable:
/// the sender has to produce a new, well-formed request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Datagram size does not match the fixed request size.
    #[error("malformed request: expected {expected} bytes, got {actual}")]
    WrongSize {
        /// Size of a well-formed request
        expected: usize,
        /// Size actually received
        actual: usize,
    },

    /// Tag byte does not name a password kind.
    #[error("malformed request: unknown tag {0:#04x}")]
    UnknownTag(u8),
}
