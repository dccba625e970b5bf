//! Datagram socket abstraction.
//!
//! Decouples the server and client runtimes from a concrete UDP
//! implementation. Production uses `tokio::net::UdpSocket`; the simulation
//! harness wraps turmoil's socket so the same loops run under a deterministic
//! network.

use std::{future::Future, io, net::SocketAddr};

/// Unordered, unacknowledged datagram transport.
///
/// One call to [`send_to`](Self::send_to) produces at most one datagram at the
/// peer. Implementations add no framing, retries or timeouts: a
/// [`recv_from`](Self::recv_from) with nothing in flight waits forever.
pub trait DatagramSocket {
    /// Send `payload` as a single datagram to `target`.
    ///
    /// Returns the number of bytes sent.
    fn send_to(&self, payload: &[u8], target: SocketAddr)
    -> impl Future<Output = io::Result<usize>>;

    /// Wait for the next datagram and copy it into `buf`.
    ///
    /// Returns the number of bytes received and the sender's address. Bytes
    /// beyond `buf.len()` are discarded.
    fn recv_from(&self, buf: &mut [u8]) -> impl Future<Output = io::Result<(usize, SocketAddr)>>;

    /// Address this socket is bound to.
    fn local_addr(&self) -> io::Result<SocketAddr>;
}

impl DatagramSocket for tokio::net::UdpSocket {
    async fn send_to(&self, payload: &[u8], target: SocketAddr) -> io::Result<usize> {
        tokio::net::UdpSocket::send_to(self, payload, target).await
    }

    async fn recv_from(&self, buf: &mut [u8]) -> io::Result<(usize, SocketAddr)> {
        tokio::net::UdpSocket::recv_from(self, buf).await
    }

    fn local_addr(&self) -> io::Result<SocketAddr> {
        tokio::net::UdpSocket::local_addr(self)
    }
}
