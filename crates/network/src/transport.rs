//! Fire-and-forget datagram transports.

use std::{fmt::Display, io, net::SocketAddr};

use tokio::net::UdpSocket;

/// Hands a finished packet to the wire, addressed to one endpoint.
///
/// Implementations must be usable from several concurrent sends through a
/// shared reference; the per-frame fan-out shares one transport handle
/// between all lights. There is no delivery guarantee and no way to learn a
/// datagram's fate once it has been accepted.
pub trait Transport {
    type Error: Display;

    /// Transmits `bytes` to `target`.
    ///
    /// Returning `Ok` means the bytes were accepted locally, nothing more.
    async fn send_to(&self, bytes: &[u8], target: SocketAddr) -> Result<(), Self::Error>;
}

/// UDP transport on top of a tokio socket.
pub struct UdpTransport {
    socket: UdpSocket,
}

impl UdpTransport {
    /// Binds an ephemeral local socket suitable for talking to any device.
    pub async fn bind() -> io::Result<Self> {
        let socket = UdpSocket::bind("0.0.0.0:0").await?;
        log::debug!("Bound UDP transport on {}", socket.local_addr()?);
        Ok(Self { socket })
    }
}

impl Transport for UdpTransport {
    type Error = io::Error;

    async fn send_to(&self, bytes: &[u8], target: SocketAddr) -> Result<(), Self::Error> {
        self.socket.send_to(bytes, target).await.map(drop)
    }
}
