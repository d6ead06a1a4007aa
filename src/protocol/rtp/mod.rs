//! RTP wire formats for the RAOP audio receive path

mod control;
pub mod interleaved;
mod packet;
pub mod sequence;

#[cfg(test)]
mod tests;

pub use control::{REQUEST_SEQUENCE, RESEND_REQUEST_LEN, RESEND_REQUEST_TYPE, ResendRequest};
pub use interleaved::{FrameError, InterleavedCodec, strip_sub_header};
pub use packet::{
    AudioPacket, Datagram, MARKER_BIT, MIN_AUDIO_PAYLOAD, PacketType, RESEND_PREFIX_LEN,
    RTP_HEADER_LEN, RtpView, SEQUENCE_OFFSET, classify,
};
pub use sequence::{seq_diff, seq_order, seq_sum};

/// RTP protocol constants for the RAOP receive path
pub mod constants {
    /// Well-known port for the stream transport listener
    pub const STREAM_PORT: u16 = 6000;

    /// Receive buffer for one datagram
    pub const MAX_DATAGRAM_SIZE: usize = 2048;
}
