//! RTP receive path configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::protocol::rtp::constants::{MAX_DATAGRAM_SIZE, STREAM_PORT};
use crate::protocol::rtp::interleaved::DEFAULT_FRAME_BUFFER_CAPACITY;

/// Receiver configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RtpConfig {
    /// Listen port for the stream transport (0 = auto-assign)
    ///
    /// The datagram transport always binds an OS-assigned port.
    pub stream_port: u16,

    /// Receive buffer for one datagram
    pub max_datagram_size: usize,

    /// Starting capacity of the stream read buffer
    ///
    /// Not a limit: the buffer grows to fit any frame the 16-bit length allows.
    pub frame_buffer_capacity: usize,

    /// How long stream mode waits for its connection (None = forever)
    pub accept_timeout: Option<Duration>,
}

impl Default for RtpConfig {
    fn default() -> Self {
        Self {
            stream_port: STREAM_PORT,
            max_datagram_size: MAX_DATAGRAM_SIZE,
            frame_buffer_capacity: DEFAULT_FRAME_BUFFER_CAPACITY,
            accept_timeout: None,
        }
    }
}

impl RtpConfig {
    /// Set stream listen port
    #[must_use]
    pub fn stream_port(mut self, port: u16) -> Self {
        self.stream_port = port;
        self
    }

    /// Set datagram buffer size
    #[must_use]
    pub fn max_datagram_size(mut self, size: usize) -> Self {
        self.max_datagram_size = size;
        self
    }

    /// Set starting stream read buffer capacity
    #[must_use]
    pub fn frame_buffer_capacity(mut self, size: usize) -> Self {
        self.frame_buffer_capacity = size;
        self
    }

    /// Bound the wait for the stream connection
    #[must_use]
    pub fn accept_timeout(mut self, timeout: Duration) -> Self {
        self.accept_timeout = Some(timeout);
        self
    }
}
