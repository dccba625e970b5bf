//! Deterministic simulation harness for the password generator.
//!
//! Runs the real server and client runtimes on turmoil's simulated network.
//! [`SimSocket`] adapts turmoil's UDP socket to
//! [`DatagramSocket`](passgen_core::DatagramSocket); the helpers here bind
//! the well-known hosts and ports used by the scenarios.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod sim_socket;

use std::{
    cell::RefCell,
    net::{Ipv4Addr, SocketAddr},
    rc::Rc,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use passgen_client::ClientSession;
use passgen_core::{CharsetRegistry, PasswordGenerator};
use passgen_proto::DEFAULT_PORT;
use passgen_server::Server;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
pub use sim_socket::SimSocket;

/// Host name of the simulated server.
pub const SERVER_HOST: &str = "server";

/// Local port simulated clients bind to.
pub const CLIENT_PORT: u16 = 9000;

/// Address to bind a simulated server on.
pub fn server_bind_addr() -> SocketAddr {
    (Ipv4Addr::UNSPECIFIED, DEFAULT_PORT).into()
}

/// Address to bind a simulated client on.
pub fn client_bind_addr() -> SocketAddr {
    (Ipv4Addr::UNSPECIFIED, CLIENT_PORT).into()
}

/// Server address as seen from a simulated client.
pub fn server_addr() -> SocketAddr {
    (turmoil::lookup(SERVER_HOST), DEFAULT_PORT).into()
}

/// Bind a server with a deterministic generator.
pub async fn bind_server(seed: u64) -> std::io::Result<Server<SimSocket, ChaCha8Rng>> {
    let socket = SimSocket::bind(server_bind_addr()).await?;
    let generator = PasswordGenerator::new(CharsetRegistry::new(), ChaCha8Rng::seed_from_u64(seed));
    tracing::debug!(seed, "simulated server bound");
    Ok(Server::new(socket, generator))
}

/// Register a server host that serves until the simulation ends.
pub fn add_server(sim: &mut turmoil::Sim<'_>, seed: u64) {
    sim.host(SERVER_HOST, move || async move {
        let server = bind_server(seed).await?;
        server.run().await?;
        Ok(())
    });
}

/// Bind a client session aimed at the simulated server.
///
/// Also returns the client socket's sent-datagram counter.
pub async fn connect_client() -> std::io::Result<(ClientSession<SimSocket>, Arc<AtomicUsize>)> {
    let socket = SimSocket::bind(client_bind_addr()).await?;
    let sent = socket.sent_counter();
    Ok((ClientSession::new(socket, server_addr()), sent))
}

/// What a scripted client did.
#[derive(Debug, Clone, Default)]
pub struct ScriptOutcome {
    /// Everything the client printed
    pub output: String,
    /// Datagrams the client sent
    pub datagrams_sent: usize,
}

impl ScriptOutcome {
    /// Passwords shown on `Password received:` lines, in order.
    pub fn passwords(&self) -> Vec<&str> {
        self.output.lines().filter_map(|line| line.strip_prefix("Password received: ")).collect()
    }
}

/// Feed `script` to a client session talking to a fresh simulated server.
///
/// Runs the simulation until the client quits or its input ends.
pub fn run_client_script(seed: u64, script: &[u8]) -> turmoil::Result<ScriptOutcome> {
    let mut sim = turmoil::Builder::new().build();
    add_server(&mut sim, seed);

    let outcome = Rc::new(RefCell::new(ScriptOutcome::default()));
    let client_outcome = Rc::clone(&outcome);
    let script = script.to_vec();

    sim.client("client", async move {
        let (mut session, sent) = connect_client().await?;
        let mut output = Vec::new();

        session.run(&script[..], &mut output).await?;

        let mut outcome = client_outcome.borrow_mut();
        outcome.output = String::from_utf8_lossy(&output).into_owned();
        outcome.datagrams_sent = sent.load(Ordering::SeqCst);
        Ok(())
    });

    sim.run()?;

    Ok(outcome.take())
}
