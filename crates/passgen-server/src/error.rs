//! Server error types.

use std::fmt;

use passgen_core::EntropyError;

/// Errors that can occur in the server runtime.
///
/// Every variant is fatal: the server has no reconnection or retry logic and
/// exits with a non-zero status.
#[derive(Debug)]
pub enum ServerError {
    /// Configuration error (invalid bind address).
    ///
    /// Prevents startup. Fix configuration and restart.
    Config(String),

    /// Transport/network error (bind, send or receive failure).
    Transport(String),

    /// The random source could not be seeded.
    Entropy(EntropyError),
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {msg}"),
            Self::Transport(msg) => write!(f, "transport error: {msg}"),
            Self::Entropy(err) => write!(f, "entropy error: {err}"),
        }
    }
}

impl std::error::Error for ServerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Entropy(err) => Some(err),
            _ => None,
        }
    }
}

impl From<EntropyError> for ServerError {
    fn from(err: EntropyError) -> Self {
        Self::Entropy(err)
    }
}

impl From<std::io::Error> for ServerError {
    fn from(err: std::io::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
