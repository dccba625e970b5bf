//! Server driver.
//!
//! Turns one received datagram into the actions the runtime must perform:
//! decode, generate, reply. Holds the generator (and therefore the only
//! mutable state on the server) but performs no I/O itself.

use std::net::SocketAddr;

use bytes::Bytes;
use passgen_core::PasswordGenerator;
use passgen_proto::{PasswordRequest, PasswordResponse};
use rand::RngCore;

/// Events that the server driver processes.
///
/// These are produced by the runtime (production or simulation).
#[derive(Debug, Clone)]
pub enum ServerEvent {
    /// A datagram arrived on the listening socket
    DatagramReceived {
        /// Sender address, used as the reply destination
        from: SocketAddr,
        /// Raw datagram contents
        payload: Bytes,
    },
}

/// Actions that the server driver produces.
///
/// These are executed in order by runtime-specific code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerAction {
    /// Send one datagram
    SendDatagram {
        /// Destination address
        to: SocketAddr,
        /// Datagram contents
        payload: Bytes,
    },

    /// Log a message (for debugging/monitoring)
    Log {
        /// Log level
        level: LogLevel,
        /// Message to log
        message: String,
    },
}

/// Log levels for server actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug information
    Debug,
    /// Informational message
    Info,
    /// Warning
    Warn,
}

/// Action-based server driver.
///
/// Processes strictly one event at a time; the runtime never calls
/// [`Self::process_event`] concurrently, so the generator needs no locking.
#[derive(Debug)]
pub struct ServerDriver<R> {
    generator: PasswordGenerator<R>,
}

impl<R: RngCore> ServerDriver<R> {
    /// Create a new server driver around a seeded generator.
    pub fn new(generator: PasswordGenerator<R>) -> Self {
        Self { generator }
    }

    /// Process a server event and return actions to execute.
    ///
    /// - Malformed datagrams are logged and dropped; no reply is produced.
    /// - Well-formed requests always get exactly one reply: the password, or
    ///   the failure marker when the generator refuses the request.
    pub fn process_event(&mut self, event: ServerEvent) -> Vec<ServerAction> {
        match event {
            ServerEvent::DatagramReceived { from, payload } => {
                self.handle_datagram(from, &payload)
            },
        }
    }

    fn handle_datagram(&mut self, from: SocketAddr, payload: &[u8]) -> Vec<ServerAction> {
        let mut actions = vec![ServerAction::Log {
            level: LogLevel::Info,
            message: format!("new request from {}:{}", from.ip(), from.port()),
        }];

        let request = match PasswordRequest::decode(payload) {
            Ok(request) => request,
            Err(e) => {
                actions.push(ServerAction::Log {
                    level: LogLevel::Warn,
                    message: format!("dropping datagram from {from}: {e}"),
                });
                return actions;
            },
        };

        actions.push(ServerAction::Log {
            level: LogLevel::Info,
            message: format!(
                "request from client: {} {}",
                char::from(request.kind.tag()),
                request.length
            ),
        });

        let response = match self.generator.generate_for(&request) {
            Ok(password) => {
                actions.push(ServerAction::Log {
                    level: LogLevel::Debug,
                    message: format!("generated {} symbols", password.len()),
                });
                PasswordResponse::Password(password.into_string())
            },
            Err(e) => {
                actions.push(ServerAction::Log {
                    level: LogLevel::Warn,
                    message: format!("password not generated for {from}: {e}"),
                });
                PasswordResponse::Failed
            },
        };

        actions.push(ServerAction::SendDatagram { to: from, payload: response.to_bytes() });
        actions
    }
}
