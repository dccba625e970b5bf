//! Password generator client.
//!
//! # Architecture
//!
//! Two Sans-IO state machines and a thin runtime:
//!
//! - [`Validator`]: turns a line of input into a request, help or quit.
//!   Invalid input never reaches the network.
//! - [`Exchange`]: one datagram out, one datagram in, at most one request
//!   outstanding.
//! - [`ClientSession`]: executes both against a terminal and a
//!   [`DatagramSocket`](passgen_core::DatagramSocket).

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;
mod exchange;
mod session;
mod validator;

use std::net::SocketAddr;

pub use error::ClientError;
pub use exchange::{Exchange, ExchangeError, ExchangeState};
use passgen_proto::DEFAULT_PORT;
pub use session::ClientSession;
pub use validator::{
    HELP, HELP_TAG, InputError, MAX_INPUT_CHARS, PROMPT, QUIT_TOKEN, RawLine, Validator,
    ValidatorAction, ValidatorEvent, ValidatorState,
};

/// Where the client sends its requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Server host name or address
    pub host: String,
    /// Server UDP port
    pub port: u16,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { host: "localhost".to_string(), port: DEFAULT_PORT }
    }
}

/// Resolve the server address.
///
/// IPv4 addresses are preferred because the server binds an IPv4 wildcard
/// address by default.
pub async fn resolve_server(host: &str, port: u16) -> Result<SocketAddr, ClientError> {
    let resolve_error =
        |reason: String| ClientError::Resolve { host: host.to_string(), reason };

    let addrs: Vec<SocketAddr> = tokio::net::lookup_host((host, port))
        .await
        .map_err(|e| resolve_error(e.to_string()))?
        .collect();

    addrs
        .iter()
        .find(|addr| addr.is_ipv4())
        .or_else(|| addrs.first())
        .copied()
        .ok_or_else(|| resolve_error("no addresses found".to_string()))
}
