use bytes::{Bytes, BytesMut};
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::Duration;
use tokio::net::UdpSocket;

// https://datatracker.ietf.org/doc/html/rfc1035#section-4.2.1
//
// Messages carried by UDP are restricted to 512 bytes (not counting the IP
// or UDP headers).
pub const MAX_RESPONSE_SIZE: usize = 512;
pub const RECEIVE_TIMEOUT: Duration = Duration::from_secs(5);

/// Outcome of waiting for one response datagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Received {
    Datagram(Bytes),
    TimedOut,
}

/// Sends one request datagram and waits for one response.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn exchange(&mut self, server: SocketAddr, request: &[u8]) -> std::io::Result<Received>;
}

/// UDP transport binding a fresh ephemeral socket for every attempt. The
/// socket is dropped when the attempt ends, whatever the outcome.
#[derive(Debug, Clone)]
pub struct UdpTransport {
    receive_timeout: Duration,
    max_response_size: usize,
}

impl UdpTransport {
    pub fn new(receive_timeout: Duration, max_response_size: usize) -> Self {
        Self {
            receive_timeout,
            max_response_size,
        }
    }
}

impl Default for UdpTransport {
    fn default() -> Self {
        Self::new(RECEIVE_TIMEOUT, MAX_RESPONSE_SIZE)
    }
}

impl Transport for UdpTransport {
    async fn exchange(&mut self, server: SocketAddr, request: &[u8]) -> std::io::Result<Received> {
        let local_addr = SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 0);
        let sock = UdpSocket::bind(local_addr).await?;

        let _send_size = sock.send_to(request, server).await?;

        let mut resp_buf = BytesMut::with_capacity(self.max_response_size);
        match tokio::time::timeout(self.receive_timeout, sock.recv_buf(&mut resp_buf)).await {
            Ok(received) => {
                let response_size = received?;
                tracing::trace!("received udp response from {}, length: {}", server, response_size);
                Ok(Received::Datagram(resp_buf.freeze()))
            }
            Err(_) => {
                tracing::debug!("no response from {} within {:?}", server, self.receive_timeout);
                Ok(Received::TimedOut)
            }
        }
    }
}
