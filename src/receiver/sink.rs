//! Downstream collaborators of the receive loop

use bytes::Bytes;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// Consumer of received audio (the playback buffer)
///
/// Called synchronously from the receive loop, so implementations must
/// not block.
pub trait AudioSink: Send + Sync {
    /// Audio payload from the datagram transport
    fn submit_audio(&self, sequence: u16, payload: &[u8]);

    /// Audio chunk from the stream transport, sub-header already stripped
    fn submit_stream_chunk(&self, payload: &[u8]);
}

/// Audio output controls used by the receive path
pub trait OutputControl: Send + Sync {
    /// Halt playback, called once when a stream connection ends
    fn stop(&self);
}

impl<F> OutputControl for F
where
    F: Fn() + Send + Sync,
{
    fn stop(&self) {
        self();
    }
}

/// Audio handed off through a channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReceivedAudio {
    /// Datagram audio with its sequence number
    Packet {
        /// RTP sequence number
        sequence: u16,
        /// Audio payload
        payload: Bytes,
    },
    /// Stream audio chunk
    StreamChunk(Bytes),
}

impl ReceivedAudio {
    /// Audio bytes regardless of transport
    #[must_use]
    pub fn payload(&self) -> &Bytes {
        match self {
            Self::Packet { payload, .. } | Self::StreamChunk(payload) => payload,
        }
    }
}

fn forward(tx: &mpsc::Sender<ReceivedAudio>, audio: ReceivedAudio) {
    match tx.try_send(audio) {
        Ok(()) => {}
        Err(TrySendError::Full(_)) => tracing::warn!("Audio channel full, dropping packet"),
        Err(TrySendError::Closed(_)) => tracing::debug!("Audio channel closed, dropping packet"),
    }
}

impl AudioSink for mpsc::Sender<ReceivedAudio> {
    fn submit_audio(&self, sequence: u16, payload: &[u8]) {
        forward(
            self,
            ReceivedAudio::Packet {
                sequence,
                payload: Bytes::copy_from_slice(payload),
            },
        );
    }

    fn submit_stream_chunk(&self, payload: &[u8]) {
        forward(self, ReceivedAudio::StreamChunk(Bytes::copy_from_slice(payload)));
    }
}
