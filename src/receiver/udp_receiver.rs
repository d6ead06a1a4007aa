//! Receive loop for the datagram transport
//!
//! Reads one datagram at a time and forwards audio to the sink. Bad input
//! from the network never ends the loop, only a socket error or shutdown.

use std::sync::Arc;

use tokio::net::UdpSocket;

use super::shutdown::{ExitReason, ShutdownSignal};
use super::sink::AudioSink;
use super::stats::ReceiverStats;
use crate::protocol::rtp::{Datagram, classify};

/// Datagram receive loop
pub struct DatagramReceiver {
    socket: Arc<UdpSocket>,
    sink: Arc<dyn AudioSink>,
    stats: Arc<ReceiverStats>,
    buffer_size: usize,
}

impl DatagramReceiver {
    /// Create a new datagram receiver
    #[must_use]
    pub fn new(
        socket: Arc<UdpSocket>,
        sink: Arc<dyn AudioSink>,
        stats: Arc<ReceiverStats>,
        buffer_size: usize,
    ) -> Self {
        Self {
            socket,
            sink,
            stats,
            buffer_size,
        }
    }

    /// Run the receive loop until a socket error or shutdown
    pub async fn run(self, mut shutdown: ShutdownSignal) -> ExitReason {
        let mut buf = vec![0u8; self.buffer_size];

        let exit = loop {
            let Some(result) = shutdown.run_until(self.socket.recv_from(&mut buf)).await else {
                break ExitReason::Shutdown;
            };

            match result {
                Ok((len, src)) => {
                    tracing::trace!("RTP datagram of {} bytes from {}", len, src);
                    dispatch_datagram(&buf[..len], self.sink.as_ref(), &self.stats);
                }
                Err(e) => {
                    tracing::debug!("RTP receive error: {}", e);
                    break ExitReason::SocketError;
                }
            }
        };

        tracing::debug!("RTP receiver interrupted ({:?}), terminating", exit);
        exit
    }
}

/// Classify one datagram and forward any audio it carries
pub fn dispatch_datagram(data: &[u8], sink: &dyn AudioSink, stats: &ReceiverStats) {
    stats.record_datagram();

    match classify(data) {
        Datagram::Sync => stats.record_sync(),
        Datagram::Audio(packet) => {
            stats.record_audio(packet.payload.len(), packet.retransmitted);
            sink.submit_audio(packet.sequence, packet.payload);
        }
        Datagram::ResendEcho => {
            stats.record_resend_echo();
            tracing::debug!("Resend-related request packet received, ignoring");
        }
        Datagram::Malformed {
            packet_type,
            len,
            sequence,
        } => {
            stats.record_malformed();
            tracing::warn!(
                "Malformed RTP packet of type {:?} length {} seqno {:?}",
                packet_type,
                len,
                sequence
            );
        }
        Datagram::Unknown { type_byte, len } => {
            stats.record_unknown();
            tracing::warn!("Unknown RTP packet of type 0x{:02X} length {}", type_byte, len);
        }
    }
}
