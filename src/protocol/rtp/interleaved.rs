//! Length-framed audio over the stream transport
//!
//! Each frame on the wire is a 4-byte header `[0x24, 0x00, len_hi, len_lo]`
//! followed by `len` bytes. The payload starts with a 12-byte sub-header the
//! caller strips before forwarding.
//!
//! There is no resynchronization: a header with the wrong marker is a
//! protocol error and the connection is abandoned.

use bytes::{Buf, Bytes, BytesMut};
use tokio_util::codec::Decoder;

use super::packet::RTP_HEADER_LEN;

/// Marker bytes opening every frame header
pub const FRAME_MARKER: [u8; 2] = [0x24, 0x00];

/// Size of the frame header
pub const FRAME_HEADER_LEN: usize = 4;

/// Size of the sub-header at the start of every frame payload
pub const SUB_HEADER_LEN: usize = RTP_HEADER_LEN;

/// Default starting capacity of the stream read buffer
pub const DEFAULT_FRAME_BUFFER_CAPACITY: usize = 16 * 1024;

/// Errors while reading frames
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// Header did not open with [`FRAME_MARKER`]
    #[error("header error: bad frame marker {found:02x?}")]
    BadMarker {
        /// The two bytes found instead
        found: [u8; 2],
    },

    /// Read failure on the connection
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Decoder for interleaved audio frames
///
/// Yields each frame's payload with its sub-header still attached.
#[derive(Debug, Clone, Default)]
pub struct InterleavedCodec {
    /// Payload length of the frame being read, once its header is in
    pending: Option<usize>,
}

impl InterleavedCodec {
    /// Create a new codec
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn decode_header(src: &mut BytesMut) -> Result<Option<usize>, FrameError> {
        if src.len() < FRAME_HEADER_LEN {
            return Ok(None);
        }

        let found = [src[0], src[1]];
        if found != FRAME_MARKER {
            return Err(FrameError::BadMarker { found });
        }

        let len = usize::from(u16::from_be_bytes([src[2], src[3]]));
        src.advance(FRAME_HEADER_LEN);
        Ok(Some(len))
    }
}

impl Decoder for InterleavedCodec {
    type Item = Bytes;
    type Error = FrameError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Bytes>, FrameError> {
        let len = match self.pending {
            Some(len) => len,
            None => match Self::decode_header(src)? {
                Some(len) => {
                    self.pending = Some(len);
                    len
                }
                None => return Ok(None),
            },
        };

        if src.len() < len {
            src.reserve(len - src.len());
            return Ok(None);
        }

        self.pending = None;
        Ok(Some(src.split_to(len).freeze()))
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Bytes>, FrameError> {
        if let Some(frame) = self.decode(src)? {
            return Ok(Some(frame));
        }

        // Peer closed mid-frame: that is the end of the stream, not an error.
        if !src.is_empty() || self.pending.is_some() {
            tracing::debug!(
                "Stream closed with a partial frame ({} bytes buffered)",
                src.len()
            );
            src.clear();
            self.pending = None;
        }
        Ok(None)
    }
}

/// Strip the sub-header from a frame payload
///
/// Returns `None` for frames too short to carry one.
#[must_use]
pub fn strip_sub_header(frame: &[u8]) -> Option<&[u8]> {
    frame.get(SUB_HEADER_LEN..)
}
