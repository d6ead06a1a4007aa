//! Receive loop for the stream transport
//!
//! Serves exactly one connection per session: accept once, read frames
//! until the peer closes, a framing error, or shutdown. The audio output is
//! told to stop whenever the loop ends.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use tokio::net::{TcpListener, TcpStream};
use tokio_util::codec::FramedRead;

use super::shutdown::{ExitReason, ShutdownSignal};
use super::sink::{AudioSink, OutputControl};
use super::stats::ReceiverStats;
use crate::protocol::rtp::interleaved::DEFAULT_FRAME_BUFFER_CAPACITY;
use crate::protocol::rtp::{FrameError, InterleavedCodec, strip_sub_header};

/// Stream receive loop
pub struct StreamReceiver {
    listener: TcpListener,
    sink: Arc<dyn AudioSink>,
    output: Arc<dyn OutputControl>,
    stats: Arc<ReceiverStats>,
    frame_buffer_capacity: usize,
    accept_timeout: Option<Duration>,
}

impl StreamReceiver {
    /// Create a new stream receiver
    #[must_use]
    pub fn new(
        listener: TcpListener,
        sink: Arc<dyn AudioSink>,
        output: Arc<dyn OutputControl>,
        stats: Arc<ReceiverStats>,
    ) -> Self {
        Self {
            listener,
            sink,
            output,
            stats,
            frame_buffer_capacity: DEFAULT_FRAME_BUFFER_CAPACITY,
            accept_timeout: None,
        }
    }

    /// Set starting read buffer capacity
    #[must_use]
    pub fn frame_buffer_capacity(mut self, size: usize) -> Self {
        self.frame_buffer_capacity = size;
        self
    }

    /// Bound the wait for the connection
    #[must_use]
    pub fn accept_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.accept_timeout = timeout;
        self
    }

    /// Run the receive loop, then stop the audio output
    pub async fn run(self, mut shutdown: ShutdownSignal) -> ExitReason {
        let exit = self.serve(&mut shutdown).await;

        tracing::debug!("RTP stream receiver interrupted ({:?}), terminating", exit);
        drop(self.listener);
        self.output.stop();

        exit
    }

    async fn serve(&self, shutdown: &mut ShutdownSignal) -> ExitReason {
        let Some(accepted) = shutdown.run_until(self.accept()).await else {
            return ExitReason::Shutdown;
        };

        let (stream, peer) = match accepted {
            Ok(Some(connection)) => connection,
            Ok(None) => {
                tracing::warn!("No RTP stream connection within {:?}", self.accept_timeout);
                return ExitReason::AcceptTimeout;
            }
            Err(e) => {
                tracing::debug!("RTP stream accept error: {}", e);
                return ExitReason::SocketError;
            }
        };

        tracing::info!("RTP stream connection from {}", peer);

        let mut frames =
            FramedRead::with_capacity(stream, InterleavedCodec::new(), self.frame_buffer_capacity);

        loop {
            let Some(next) = shutdown.run_until(frames.next()).await else {
                return ExitReason::Shutdown;
            };

            match next {
                Some(Ok(frame)) => self.forward(&frame),
                None => return ExitReason::PeerClosed,
                Some(Err(FrameError::BadMarker { found })) => {
                    tracing::warn!(
                        "RTP stream header error {:02x} {:02x}, dropping connection",
                        found[0],
                        found[1]
                    );
                    return ExitReason::FramingError;
                }
                Some(Err(FrameError::Io(e))) => {
                    tracing::debug!("RTP stream read error: {}", e);
                    return ExitReason::SocketError;
                }
            }
        }
    }

    async fn accept(&self) -> io::Result<Option<(TcpStream, SocketAddr)>> {
        match self.accept_timeout {
            Some(timeout) => match tokio::time::timeout(timeout, self.listener.accept()).await {
                Ok(accepted) => accepted.map(Some),
                Err(_) => Ok(None),
            },
            None => self.listener.accept().await.map(Some),
        }
    }

    fn forward(&self, frame: &[u8]) {
        if let Some(chunk) = strip_sub_header(frame) {
            self.stats.record_stream_frame(chunk.len());
            self.sink.submit_stream_chunk(chunk);
        } else {
            self.stats.record_malformed();
            tracing::warn!(
                "RTP stream frame of {} bytes is shorter than its sub-header, skipping",
                frame.len()
            );
        }
    }
}
