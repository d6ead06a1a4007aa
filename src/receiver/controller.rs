//! RTP session lifecycle
//!
//! [`RtpReceiver`] owns at most one session at a time. `setup` binds the
//! transport and spawns the single receive task; `shutdown` triggers the
//! task, waits for it to exit, and releases the socket.
//!
//! Calling these out of order is a bug in the caller and is reported as a
//! usage error. Bad packets from the network are never reported here.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::UdpSocket;
use tokio::task::JoinHandle;

use super::config::RtpConfig;
use super::shutdown::{ExitReason, ShutdownTrigger, shutdown_channel};
use super::sink::{AudioSink, OutputControl};
use super::stats::{ReceiverStats, StatsSnapshot};
use super::tcp_receiver::StreamReceiver;
use super::transport::{TransportKind, bind_datagram, bind_stream};
use super::udp_receiver::DatagramReceiver;
use crate::error::RtpError;
use crate::protocol::rtp::ResendRequest;

/// Controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiverState {
    /// No session
    Idle,
    /// Receive task running
    Running,
    /// Waiting for the receive task to exit
    ShuttingDown,
}

/// The one active session
struct Session {
    control_addr: SocketAddr,
    transport: TransportKind,
    local_port: u16,
    /// Datagram socket, shared with the receive task for resend requests
    socket: Option<Arc<UdpSocket>>,
    shutdown: ShutdownTrigger,
    task: JoinHandle<ExitReason>,
}

/// RTP receive path controller
pub struct RtpReceiver {
    config: RtpConfig,
    sink: Arc<dyn AudioSink>,
    output: Arc<dyn OutputControl>,
    stats: Arc<ReceiverStats>,
    state: ReceiverState,
    session: Option<Session>,
}

impl RtpReceiver {
    /// Create an idle receiver forwarding audio to `sink`
    pub fn new(config: RtpConfig, sink: Arc<dyn AudioSink>) -> Self {
        Self {
            config,
            sink,
            output: Arc::new(|| {}),
            stats: Arc::new(ReceiverStats::new()),
            state: ReceiverState::Idle,
            session: None,
        }
    }

    /// Set the audio output told to stop when a stream connection ends
    #[must_use]
    pub fn with_output(mut self, output: Arc<dyn OutputControl>) -> Self {
        self.output = output;
        self
    }

    /// Get current state
    #[must_use]
    pub fn state(&self) -> ReceiverState {
        self.state
    }

    /// Whether a session is active
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == ReceiverState::Running
    }

    /// Bound local port of the active session
    #[must_use]
    pub fn local_port(&self) -> Option<u16> {
        self.session.as_ref().map(|s| s.local_port)
    }

    /// Peer control address of the active session
    #[must_use]
    pub fn control_addr(&self) -> Option<SocketAddr> {
        self.session.as_ref().map(|s| s.control_addr)
    }

    /// Transport of the active session
    #[must_use]
    pub fn transport(&self) -> Option<TransportKind> {
        self.session.as_ref().map(|s| s.transport)
    }

    /// Receive counters for the current (or last) session
    #[must_use]
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Start a session and return the local port to advertise to the peer
    ///
    /// `remote` is the sender's address; its port is replaced by
    /// `control_port` to form the resend request destination. The timing
    /// port is accepted for completeness and ignored: this receiver does its
    /// own timing.
    ///
    /// # Errors
    ///
    /// Returns `RtpError::AlreadyRunning` if a session is active, or
    /// `RtpError::Bind` if the local socket cannot be bound.
    pub async fn setup(
        &mut self,
        remote: SocketAddr,
        transport: TransportKind,
        control_port: u16,
        timing_port: u16,
    ) -> Result<u16, RtpError> {
        match self.state {
            ReceiverState::Idle => {}
            ReceiverState::Running => return Err(RtpError::AlreadyRunning),
            ReceiverState::ShuttingDown => {
                tracing::debug!("Completing interrupted RTP shutdown before setup");
                if let Err(e) = self.finish_shutdown().await {
                    tracing::warn!("Previous RTP session ended abnormally: {}", e);
                }
            }
        }

        tracing::debug!("RTP setup: cport={} tport={}", control_port, timing_port);

        let mut control_addr = remote;
        control_addr.set_port(control_port);

        self.stats.reset();
        let (trigger, signal) = shutdown_channel();

        let (local_port, socket, task) = match transport {
            TransportKind::Udp => {
                let (socket, port) = bind_datagram(&remote).await?;
                let socket = Arc::new(socket);
                let receiver = DatagramReceiver::new(
                    socket.clone(),
                    self.sink.clone(),
                    self.stats.clone(),
                    self.config.max_datagram_size,
                );
                (port, Some(socket), tokio::spawn(receiver.run(signal)))
            }
            TransportKind::Tcp => {
                let (listener, port) = bind_stream(&remote, self.config.stream_port).await?;
                let receiver = StreamReceiver::new(
                    listener,
                    self.sink.clone(),
                    self.output.clone(),
                    self.stats.clone(),
                )
                .frame_buffer_capacity(self.config.frame_buffer_capacity)
                .accept_timeout(self.config.accept_timeout);
                (port, None, tokio::spawn(receiver.run(signal)))
            }
        };

        tracing::info!("RTP listening on {} port {}", transport, local_port);

        self.session = Some(Session {
            control_addr,
            transport,
            local_port,
            socket,
            shutdown: trigger,
            task,
        });
        self.state = ReceiverState::Running;

        Ok(local_port)
    }

    /// End the active session
    ///
    /// Returns once the receive task has fully exited and the socket has
    /// been released. If an earlier call was dropped before the task exited,
    /// calling again completes that shutdown.
    ///
    /// # Errors
    ///
    /// Returns `RtpError::NotRunning` if no session is active, or
    /// `RtpError::ReceiverTask` if the task panicked.
    pub async fn shutdown(&mut self) -> Result<ExitReason, RtpError> {
        match self.state {
            ReceiverState::Idle => {
                return Err(RtpError::NotRunning {
                    operation: "shutdown",
                });
            }
            ReceiverState::Running => {
                tracing::debug!("Shutting down RTP receiver");
                self.state = ReceiverState::ShuttingDown;
            }
            ReceiverState::ShuttingDown => {
                tracing::debug!("Resuming interrupted RTP shutdown");
            }
        }

        self.finish_shutdown().await
    }

    /// Trigger the receive task and wait for it
    ///
    /// The session is held until the join resolves. Dropping this future
    /// leaves a resumable `ShuttingDown` state.
    async fn finish_shutdown(&mut self) -> Result<ExitReason, RtpError> {
        let Some(session) = self.session.as_mut() else {
            self.state = ReceiverState::Idle;
            return Err(RtpError::NotRunning {
                operation: "shutdown",
            });
        };

        session.shutdown.trigger();
        let joined = (&mut session.task).await;

        // Releases the socket
        self.session = None;
        self.state = ReceiverState::Idle;

        let exit = joined?;
        tracing::info!("RTP session ended ({:?})", exit);
        Ok(exit)
    }

    /// Ask the sender to retransmit `first..=last`
    ///
    /// Sent once, not acknowledged and not retried.
    ///
    /// # Errors
    ///
    /// Returns `RtpError::NotRunning` if no session is active,
    /// `RtpError::ResendUnsupported` on the stream transport, or
    /// `RtpError::Network` if the send fails.
    pub async fn request_resend(&self, first: u16, last: u16) -> Result<(), RtpError> {
        let Some(session) = self.session.as_ref().filter(|_| self.is_running()) else {
            return Err(RtpError::NotRunning {
                operation: "request_resend",
            });
        };
        let Some(socket) = session.socket.as_ref() else {
            return Err(RtpError::ResendUnsupported {
                transport: session.transport,
            });
        };

        let request = ResendRequest::for_range(first, last);
        tracing::debug!(
            "Requesting resend on {} packets ({:04X}:{:04X})",
            request.count,
            first,
            last
        );

        socket.send_to(&request.encode(), session.control_addr).await?;
        Ok(())
    }
}

impl Drop for RtpReceiver {
    fn drop(&mut self) {
        // Without an async context there is no join; the task exits on its own.
        if let Some(session) = self.session.take() {
            session.shutdown.trigger();
        }
    }
}
