use super::packet::MARKER_BIT;
use super::sequence::seq_diff;

/// Type code of a resend request (not a standard RTCP NACK)
pub const RESEND_REQUEST_TYPE: u8 = 0x55;

/// Sequence number we stamp on our own requests
pub const REQUEST_SEQUENCE: u16 = 1;

/// Encoded size of a resend request
pub const RESEND_REQUEST_LEN: usize = 8;

/// Request for retransmission of a run of missing packets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResendRequest {
    /// First missing sequence number
    pub first: u16,
    /// Number of missing packets, always at least 1
    pub count: u16,
}

impl ResendRequest {
    /// Build a request covering `first..=last`, wrapping at 2^16
    ///
    /// A full-circle range (`last` one behind `first`) would need a count of
    /// 65536, which does not fit on the wire; it saturates at 65535.
    #[must_use]
    pub fn for_range(first: u16, last: u16) -> Self {
        let count = u32::from(seq_diff(first, last)) + 1;
        Self {
            first,
            count: u16::try_from(count).unwrap_or(u16::MAX),
        }
    }

    /// Last sequence number covered by the request
    #[must_use]
    pub fn last(&self) -> u16 {
        self.first.wrapping_add(self.count.wrapping_sub(1))
    }

    /// Encode to the 8-byte wire format
    #[must_use]
    pub fn encode(&self) -> [u8; RESEND_REQUEST_LEN] {
        let mut buf = [0u8; RESEND_REQUEST_LEN];
        buf[0] = 0x80;
        buf[1] = RESEND_REQUEST_TYPE | MARKER_BIT;
        buf[2..4].copy_from_slice(&REQUEST_SEQUENCE.to_be_bytes());
        buf[4..6].copy_from_slice(&self.first.to_be_bytes());
        buf[6..8].copy_from_slice(&self.count.to_be_bytes());
        buf
    }

    /// Decode from bytes, as a sender would
    ///
    /// Returns `None` if the buffer is short or is not a resend request.
    #[must_use]
    pub fn decode(buf: &[u8]) -> Option<Self> {
        let buf = buf.get(..RESEND_REQUEST_LEN)?;
        if buf[1] & !MARKER_BIT != RESEND_REQUEST_TYPE {
            return None;
        }

        Some(Self {
            first: u16::from_be_bytes([buf[4], buf[5]]),
            count: u16::from_be_bytes([buf[6], buf[7]]),
        })
    }
}
