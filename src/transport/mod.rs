//! UDP socket adapter feeding the [`Dispatcher`].
//!
//! [`UdpIntake`] binds a broadcast-capable socket, optionally announces
//! itself to senders, and pumps every received datagram through
//! [`Dispatcher::ingest`] until shutdown. Receiving happens on a single task,
//! so the dispatcher needs no locking.

mod backoff;
mod error;

use std::{future::Future, io, net::SocketAddr};

use bytes::Bytes;
pub use error::TransportError;
use tokio::{net::UdpSocket, select, signal, time::sleep};
use tracing::{debug, info, warn};

use self::backoff::ReceiveBackoff;
use crate::{
    config::{ANNOUNCE_BYTE, IntakeConfig, MAX_DATAGRAM_LEN},
    dispatch::Dispatcher,
    hooks::{IntakeCallbacks, IntakeHooks},
};

/// A bound UDP socket paired with the dispatcher it feeds.
#[derive(Debug)]
pub struct UdpIntake<H = IntakeCallbacks> {
    socket: UdpSocket,
    dispatcher: Dispatcher<H>,
    announce_addr: SocketAddr,
    recv_buffer_size: usize,
}

impl<H: IntakeHooks> UdpIntake<H> {
    /// Bind the socket described by `config` and build its dispatcher.
    ///
    /// Broadcast is enabled on the socket so the announce can reach the
    /// broadcast address. If `config.announce_on_start` is set the announce
    /// is sent before returning.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] if binding, enabling broadcast, or the
    /// initial announce fails.
    pub async fn bind(config: &IntakeConfig, hooks: H) -> Result<Self, TransportError> {
        let socket = UdpSocket::bind(config.listen_addr)
            .await
            .map_err(|source| TransportError::Bind {
                addr: config.listen_addr,
                source,
            })?;
        socket.set_broadcast(true).map_err(TransportError::Broadcast)?;

        let intake = Self {
            socket,
            dispatcher: Dispatcher::from_config(config, hooks),
            announce_addr: config.announce_addr,
            recv_buffer_size: config.recv_buffer_size.clamp(1, MAX_DATAGRAM_LEN),
        };
        if config.announce_on_start {
            intake.announce().await?;
        }
        Ok(intake)
    }

    /// Send the one-byte discovery announce to the configured address.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Announce`] if the datagram cannot be sent.
    pub async fn announce(&self) -> Result<(), TransportError> {
        self.socket
            .send_to(&[ANNOUNCE_BYTE], self.announce_addr)
            .await
            .map_err(|source| TransportError::Announce {
                addr: self.announce_addr,
                source,
            })?;
        info!(addr = %self.announce_addr, "sent discovery announce");
        Ok(())
    }

    /// Address the socket is bound to.
    ///
    /// # Errors
    ///
    /// Returns any error reported by the operating system.
    pub fn local_addr(&self) -> io::Result<SocketAddr> { self.socket.local_addr() }

    /// Size of the receive buffer, clamped to `1..=MAX_DATAGRAM_LEN`.
    #[must_use]
    pub const fn recv_buffer_size(&self) -> usize { self.recv_buffer_size }

    #[must_use]
    pub const fn dispatcher(&self) -> &Dispatcher<H> { &self.dispatcher }

    pub fn dispatcher_mut(&mut self) -> &mut Dispatcher<H> { &mut self.dispatcher }

    /// Receive datagrams until Ctrl+C, then return the dispatcher.
    pub async fn run(self) -> Dispatcher<H> {
        self.run_with_shutdown(async {
            let _ = signal::ctrl_c().await;
        })
        .await
    }

    /// Receive datagrams until `shutdown` resolves, then return the
    /// dispatcher with everything it accumulated.
    ///
    /// Receive failures are logged and retried after a short back-off; they
    /// never end the loop.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use clx_telemetry::{config::IntakeConfig, hooks::IntakeCallbacks, transport::UdpIntake};
    /// use tokio::sync::oneshot;
    ///
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), clx_telemetry::transport::TransportError> {
    /// let config = IntakeConfig::default().with_announce_on_start(false);
    /// let intake = UdpIntake::bind(&config, IntakeCallbacks::default()).await?;
    ///
    /// let (tx, rx) = oneshot::channel::<()>();
    /// let handle = tokio::spawn(intake.run_with_shutdown(async {
    ///     let _ = rx.await;
    /// }));
    ///
    /// let _ = tx.send(());
    /// let dispatcher = handle.await.expect("join intake task");
    /// println!("sources: {:?}", dispatcher.sources().sources());
    /// # Ok(())
    /// # }
    /// ```
    #[expect(
        clippy::integer_division_remainder_used,
        reason = "tokio::select! expands to modulus internally"
    )]
    pub async fn run_with_shutdown<S>(self, shutdown: S) -> Dispatcher<H>
    where
        S: Future<Output = ()>,
    {
        let Self {
            socket,
            mut dispatcher,
            recv_buffer_size,
            ..
        } = self;
        let mut buf = vec![0_u8; recv_buffer_size];
        let mut backoff = ReceiveBackoff::default();
        let mut shutdown = std::pin::pin!(shutdown);

        loop {
            select! {
                biased;

                () = &mut shutdown => break,
                received = socket.recv_from(&mut buf) => match received {
                    Ok((len, peer)) => {
                        backoff.reset();
                        let outcome = dispatcher.ingest(&buf[..len], peer.ip());
                        debug!(%peer, len, ?outcome, "datagram ingested");
                    }
                    Err(err) => {
                        let delay = backoff.next_delay();
                        warn!(error = %err, ?delay, "receive failed");
                        sleep(delay).await;
                    }
                },
            }
        }
        info!("intake stopped");
        dispatcher
    }
}

/// Send each datagram in `datagrams` to `target`, in order.
///
/// Returns the number of bytes sent.
///
/// # Errors
///
/// Returns [`TransportError::Send`] on the first datagram that fails.
pub async fn send_datagrams(
    socket: &UdpSocket,
    target: SocketAddr,
    datagrams: &[Bytes],
) -> Result<usize, TransportError> {
    let mut sent = 0;
    for datagram in datagrams {
        sent += socket
            .send_to(datagram, target)
            .await
            .map_err(|source| TransportError::Send {
                addr: target,
                source,
            })?;
    }
    Ok(sent)
}
