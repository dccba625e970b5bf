//! Password generator server.
//!
//! # Architecture
//!
//! The [`ServerDriver`] is pure logic: it maps one received datagram to a list
//! of [`ServerAction`]s. [`Server`] is the runtime that owns the socket,
//! feeds the driver and executes its actions.
//!
//! The loop is strictly sequential. It blocks in `recv_from`, runs the
//! decode-generate-reply sequence to completion and only then receives again.
//! There is no worker pool, queue or backpressure; bursts are absorbed by the
//! OS socket buffer.
//!
//! # Components
//!
//! - [`ServerDriver`]: action-based request handling (no I/O)
//! - [`Server`]: runtime over any [`DatagramSocket`]
//! - [`ServerRuntimeConfig`]: bind address and seed source

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod driver;
mod error;

use bytes::Bytes;
pub use driver::{LogLevel, ServerAction, ServerDriver, ServerEvent};
pub use error::ServerError;
use passgen_core::{CharsetRegistry, DatagramSocket, PasswordGenerator, SeedSource, seed_rng};
use passgen_proto::DEFAULT_PORT;
use rand::RngCore;
use rand_chacha::ChaCha8Rng;
use tokio::net::UdpSocket;

/// Receive buffer size.
///
/// Larger than any well-formed request so that oversized datagrams arrive
/// with their real (wrong) size instead of being cut down to a valid one.
pub const RECV_BUFFER_SIZE: usize = 512;

/// Server configuration for the production runtime.
#[derive(Debug, Clone)]
pub struct ServerRuntimeConfig {
    /// Address to bind to (e.g., "0.0.0.0:57015")
    pub bind_address: String,
    /// One-time seed for the password generator
    pub seed: SeedSource,
}

impl Default for ServerRuntimeConfig {
    fn default() -> Self {
        Self { bind_address: format!("0.0.0.0:{DEFAULT_PORT}"), seed: SeedSource::default() }
    }
}

/// Password generator server.
///
/// Wraps `ServerDriver` with a datagram socket.
pub struct Server<S, R> {
    /// The action-based server driver
    driver: ServerDriver<R>,
    /// Listening socket
    socket: S,
}

impl Server<UdpSocket, ChaCha8Rng> {
    /// Seed the generator, then create and bind a UDP server.
    pub async fn bind(config: ServerRuntimeConfig) -> Result<Self, ServerError> {
        let addr: std::net::SocketAddr = config.bind_address.parse().map_err(|e| {
            ServerError::Config(format!("invalid bind address '{}': {e}", config.bind_address))
        })?;

        let rng = seed_rng(config.seed)?;

        let socket = UdpSocket::bind(addr)
            .await
            .map_err(|e| ServerError::Transport(format!("failed to bind {addr}: {e}")))?;

        tracing::info!("UDP socket bound to {}", addr);

        Ok(Self::new(socket, PasswordGenerator::new(CharsetRegistry::new(), rng)))
    }
}

impl<S, R> Server<S, R>
where
    S: DatagramSocket,
    R: RngCore,
{
    /// Create a server over an already bound socket.
    pub fn new(socket: S, generator: PasswordGenerator<R>) -> Self {
        Self { driver: ServerDriver::new(generator), socket }
    }

    /// Local address the server is bound to.
    pub fn local_addr(&self) -> Result<std::net::SocketAddr, ServerError> {
        self.socket
            .local_addr()
            .map_err(|e| ServerError::Transport(format!("failed to get local address: {e}")))
    }

    /// Run the server forever.
    ///
    /// Only returns on a transport failure, which is fatal.
    pub async fn run(mut self) -> Result<(), ServerError> {
        tracing::info!("Server listening on {}", self.local_addr()?);

        loop {
            self.serve_one().await?;
        }
    }

    /// Receive one datagram and run it to completion.
    pub async fn serve_one(&mut self) -> Result<(), ServerError> {
        let mut buf = [0u8; RECV_BUFFER_SIZE];
        let (len, from) = self
            .socket
            .recv_from(&mut buf)
            .await
            .map_err(|e| ServerError::Transport(format!("receive failed: {e}")))?;

        let actions = self.driver.process_event(ServerEvent::DatagramReceived {
            from,
            payload: Bytes::copy_from_slice(&buf[..len]),
        });

        self.execute_actions(actions).await
    }

    /// Execute server actions.
    async fn execute_actions(&mut self, actions: Vec<ServerAction>) -> Result<(), ServerError> {
        for action in actions {
            match action {
                ServerAction::SendDatagram { to, payload } => {
                    self.socket.send_to(&payload, to).await.map_err(|e| {
                        ServerError::Transport(format!("password send to {to} failed: {e}"))
                    })?;
                    tracing::info!(%to, bytes = payload.len(), "response sent");
                },
                ServerAction::Log { level, message } => match level {
                    LogLevel::Debug => tracing::debug!("{message}"),
                    LogLevel::Info => tracing::info!("{message}"),
                    LogLevel::Warn => tracing::warn!("{message}"),
                },
            }
        }

        Ok(())
    }
}
