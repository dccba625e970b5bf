//! Client error types.

use thiserror::Error;

use crate::ExchangeError;

/// Fatal client errors.
///
/// Rejected input is not an error at this level; it is reported to the user
/// and the prompt is shown again. Everything here ends the session.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Server host name could not be resolved.
    #[error("could not resolve server {host}: {reason}")]
    Resolve {
        /// Host name as configured
        host: String,
        /// Resolver failure
        reason: String,
    },

    /// Socket bind, send or receive failed.
    #[error("transport error: {0}")]
    Transport(String),

    /// Reading commands or writing output failed.
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// Exchange driven out of order.
    #[error(transparent)]
    Exchange(#[from] ExchangeError),
}
