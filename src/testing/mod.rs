//! Test helpers for driving the receive path
//!
//! Builders for the packets a RAOP sender puts on the wire, plus mock
//! senders for both transports.

mod mock_sender;

pub use mock_sender::{MockSender, MockStreamSender};

use crate::protocol::rtp::interleaved::FRAME_MARKER;
use crate::protocol::rtp::{MARKER_BIT, PacketType};

/// Frames per packet, used to derive plausible RTP timestamps
const FRAMES_PER_PACKET: u32 = 352;

/// SSRC stamped on generated packets
const TEST_SSRC: u32 = 0x1234_5678;

fn rtp_header(packet_type: PacketType, sequence: u16) -> [u8; 12] {
    let mut header = [0u8; 12];
    header[0] = 0x80;
    header[1] = packet_type as u8 | MARKER_BIT;
    header[2..4].copy_from_slice(&sequence.to_be_bytes());
    header[4..8].copy_from_slice(&(u32::from(sequence) * FRAMES_PER_PACKET).to_be_bytes());
    header[8..12].copy_from_slice(&TEST_SSRC.to_be_bytes());
    header
}

/// An audio datagram: 12-byte RTP header followed by `payload`
#[must_use]
pub fn audio_datagram(sequence: u16, payload: &[u8]) -> Vec<u8> {
    let mut packet = rtp_header(PacketType::Audio, sequence).to_vec();
    packet.extend_from_slice(payload);
    packet
}

/// A resend-audio datagram: 4-byte prefix, RTP header, then `payload`
#[must_use]
pub fn resend_datagram(sequence: u16, payload: &[u8]) -> Vec<u8> {
    let mut packet = vec![0x80, PacketType::ResendAudio as u8 | MARKER_BIT, 0x00, 0x01];
    packet.extend_from_slice(&rtp_header(PacketType::Audio, sequence));
    packet.extend_from_slice(payload);
    packet
}

/// A 20-byte timing sync packet
#[must_use]
pub fn sync_datagram() -> Vec<u8> {
    let mut packet = vec![0u8; 20];
    packet[0] = 0x90;
    packet[1] = PacketType::Sync as u8 | MARKER_BIT;
    packet[2..4].copy_from_slice(&7u16.to_be_bytes());
    packet
}

/// Wrap `payload` in a stream frame header
///
/// # Panics
///
/// Panics if `payload` does not fit the 16-bit length field.
#[must_use]
pub fn interleaved_frame(payload: &[u8]) -> Vec<u8> {
    let len = u16::try_from(payload.len()).expect("frame payload exceeds 16-bit length");
    let mut frame = Vec::with_capacity(payload.len() + 4);
    frame.extend_from_slice(&FRAME_MARKER);
    frame.extend_from_slice(&len.to_be_bytes());
    frame.extend_from_slice(payload);
    frame
}

/// A stream frame carrying `audio` behind a 12-byte sub-header
///
/// # Panics
///
/// Panics if the framed payload does not fit the 16-bit length field.
#[must_use]
pub fn stream_frame(sequence: u16, audio: &[u8]) -> Vec<u8> {
    interleaved_frame(&audio_datagram(sequence, audio))
}
