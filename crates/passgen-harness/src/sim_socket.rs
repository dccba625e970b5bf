//! Turmoil UDP socket adapter.

use std::{
    io,
    net::SocketAddr,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use passgen_core::DatagramSocket;

/// Simulated UDP socket.
///
/// Counts the datagrams it sends so scenarios can assert that nothing
/// reached the network.
pub struct SimSocket {
    inner: turmoil::net::UdpSocket,
    sent: Arc<AtomicUsize>,
}

impl SimSocket {
    /// Bind on the current simulated host.
    pub async fn bind(addr: SocketAddr) -> io::Result<Self> {
        let inner = turmoil::net::UdpSocket::bind(addr).await?;
        Ok(Self { inner, sent: Arc::new(AtomicUsize::new(0)) })
    }

    /// Shared handle to the sent-datagram counter.
    ///
    /// Remains readable after the socket has been moved into a session.
    pub fn sent_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.sent)
    }

    /// Datagrams sent so far.
    pub fn sent_count(&self) -> usize {
        self.sent.load(Ordering::SeqCst)
    }
}

impl DatagramSocket for SimSocket {
    async fn send_to(&self, payload: &[u8], target: SocketAddr) -> io::Result<usize> {
        let n = self.inner.send_to(payload, target).await?;
        self.sent.fetch_add(1, Ordering::SeqCst);
        Ok(n)
    }

    async fn recv_from(&self, buf: &mut [u8]) -> io::Result<(usize, SocketAddr)> {
        self.inner.recv_from(buf).await
    }

    fn local_addr(&self) -> io::Result<SocketAddr> {
        self.inner.local_addr()
    }
}
