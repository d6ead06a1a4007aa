//! Inbound datagram classification
//!
//! Every datagram arriving on the audio port is sorted into exactly one
//! [`Datagram`] variant. Classification never fails: the peer is untrusted,
//! so short or unknown packets become variants the receive loop can log
//! and skip.

/// Size of the RTP-style header in front of every audio payload
pub const RTP_HEADER_LEN: usize = 12;

/// Offset of the big-endian sequence number inside the RTP header
pub const SEQUENCE_OFFSET: usize = 2;

/// Extra prefix carried by retransmitted audio ahead of its RTP header
pub const RESEND_PREFIX_LEN: usize = 4;

/// Smallest payload worth forwarding to the playback buffer
pub const MIN_AUDIO_PAYLOAD: usize = 16;

/// High bit of the type byte
pub const MARKER_BIT: u8 = 0x80;

/// Packet types seen on the audio port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PacketType {
    /// Timing sync from the sender (ignored, we free-run our own clock)
    Sync = 0x54,
    /// Retransmitted audio, answering one of our resend requests
    ResendAudio = 0x56,
    /// Audio data
    Audio = 0x60,
}

impl PacketType {
    /// Parse from the type byte, ignoring the marker bit
    #[must_use]
    pub fn from_byte(b: u8) -> Option<Self> {
        match b & !MARKER_BIT {
            0x54 => Some(Self::Sync),
            0x56 => Some(Self::ResendAudio),
            0x60 => Some(Self::Audio),
            _ => None,
        }
    }
}

/// Bounds-checked field access over a received packet
#[derive(Debug, Clone, Copy)]
pub struct RtpView<'a> {
    data: &'a [u8],
}

impl<'a> RtpView<'a> {
    /// Wrap a packet
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Total length of the wrapped bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the view is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Marker bit of byte 1
    #[must_use]
    pub fn marker(&self) -> bool {
        self.data.get(1).is_some_and(|b| b & MARKER_BIT != 0)
    }

    /// Type code with the marker bit masked off
    #[must_use]
    pub fn type_byte(&self) -> Option<u8> {
        self.data.get(1).map(|b| b & !MARKER_BIT)
    }

    /// Sequence number, if the packet is long enough to carry one
    #[must_use]
    pub fn sequence(&self) -> Option<u16> {
        self.data
            .get(SEQUENCE_OFFSET..SEQUENCE_OFFSET + 2)
            .map(|b| u16::from_be_bytes([b[0], b[1]]))
    }

    /// Bytes after the RTP header (empty if the header is truncated)
    #[must_use]
    pub fn payload(&self) -> &'a [u8] {
        self.data.get(RTP_HEADER_LEN..).unwrap_or(&[])
    }

    /// View past a leading prefix (empty if the prefix is truncated)
    #[must_use]
    pub fn skip(&self, prefix: usize) -> Self {
        Self::new(self.data.get(prefix..).unwrap_or(&[]))
    }
}

/// Audio extracted from a datagram
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioPacket<'a> {
    /// RTP sequence number
    pub sequence: u16,
    /// Payload after all transport headers
    pub payload: &'a [u8],
    /// Whether this arrived as a resend-audio packet
    pub retransmitted: bool,
}

/// Outcome of classifying one datagram
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Datagram<'a> {
    /// Timing sync, dropped
    Sync,
    /// Audio to forward
    Audio(AudioPacket<'a>),
    /// Short resend-audio packet with sequence 0, a known echo of our own request
    ResendEcho,
    /// Audio-class packet too short to forward
    Malformed {
        /// Type, if the type byte was readable and known
        packet_type: Option<PacketType>,
        /// Datagram length
        len: usize,
        /// Sequence number, if readable
        sequence: Option<u16>,
    },
    /// Type code not handled on this port
    Unknown {
        /// Type code with the marker bit masked off
        type_byte: u8,
        /// Datagram length
        len: usize,
    },
}

/// Classify one datagram received on the audio port
#[must_use]
pub fn classify(datagram: &[u8]) -> Datagram<'_> {
    let view = RtpView::new(datagram);

    let Some(type_byte) = view.type_byte() else {
        return Datagram::Malformed {
            packet_type: None,
            len: datagram.len(),
            sequence: None,
        };
    };

    match PacketType::from_byte(type_byte) {
        Some(PacketType::Sync) => Datagram::Sync,
        Some(kind) => classify_audio(view, kind),
        None => Datagram::Unknown {
            type_byte,
            len: datagram.len(),
        },
    }
}

fn classify_audio(view: RtpView<'_>, kind: PacketType) -> Datagram<'_> {
    let retransmitted = kind == PacketType::ResendAudio;
    let inner = if retransmitted {
        view.skip(RESEND_PREFIX_LEN)
    } else {
        view
    };

    let sequence = inner.sequence();
    let payload = inner.payload();

    match sequence {
        Some(sequence) if payload.len() >= MIN_AUDIO_PAYLOAD => Datagram::Audio(AudioPacket {
            sequence,
            payload,
            retransmitted,
        }),
        Some(0) if retransmitted => Datagram::ResendEcho,
        _ => Datagram::Malformed {
            packet_type: Some(kind),
            len: view.len(),
            sequence,
        },
    }
}
