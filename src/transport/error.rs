//! Errors raised by [`UdpIntake`](super::UdpIntake) and datagram sending.

use std::{io, net::SocketAddr};

use thiserror::Error;

/// Errors that may occur while operating the UDP socket.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The socket could not be bound to its listen address.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
    /// Broadcast could not be enabled on the socket.
    #[error("failed to enable broadcast: {0}")]
    Broadcast(#[source] io::Error),
    /// The discovery announce could not be sent.
    #[error("failed to announce to {addr}: {source}")]
    Announce {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
    /// An outbound datagram could not be sent.
    #[error("failed to send datagram to {addr}: {source}")]
    Send {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
}
