//! Gap detection for the consumer of received audio
//!
//! The receive path itself never requests retransmission; the playback
//! buffer does, when it notices missing sequence numbers. This tracker finds
//! those runs so they can be handed to [`RtpReceiver::request_resend`].
//!
//! [`RtpReceiver::request_resend`]: super::RtpReceiver::request_resend

use crate::protocol::rtp::{seq_diff, seq_order, seq_sum};

/// Jumps at least this far ahead are treated as a new stream position
const DEFAULT_MAX_GAP: u16 = 1000;

/// A run of missing sequence numbers, inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gap {
    /// First missing sequence number
    pub first: u16,
    /// Last missing sequence number
    pub last: u16,
}

impl Gap {
    /// Number of missing packets
    #[must_use]
    pub fn len(&self) -> u32 {
        u32::from(seq_diff(self.first, self.last)) + 1
    }

    /// Always false, a gap covers at least one packet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Tracks RTP sequence numbers to detect gaps
#[derive(Debug, Clone)]
pub struct SequenceTracker {
    /// Expected next sequence number
    expected: Option<u16>,
    /// Largest jump still reported as loss
    max_gap: u16,
    /// Total packets recorded
    packets_received: u64,
    /// Packets that arrived behind the expected position
    late_packets: u64,
    /// Total gaps detected
    total_gaps: u64,
    /// Total packets lost
    total_lost: u64,
}

/// Statistics for sequence tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceStats {
    /// Total packets recorded
    pub packets_received: u64,
    /// Late or duplicate packets
    pub late_packets: u64,
    /// Total gaps detected
    pub total_gaps: u64,
    /// Total packets lost
    pub total_lost: u64,
}

impl SequenceTracker {
    /// Create a new sequence tracker
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_gap(DEFAULT_MAX_GAP)
    }

    /// Create a tracker treating jumps of `max_gap` or more as a resync
    #[must_use]
    pub fn with_max_gap(max_gap: u16) -> Self {
        Self {
            expected: None,
            max_gap,
            packets_received: 0,
            late_packets: 0,
            total_gaps: 0,
            total_lost: 0,
        }
    }

    /// Record a received packet, returning any gap in front of it
    pub fn record(&mut self, seq: u16) -> Option<Gap> {
        self.packets_received += 1;

        let Some(expected) = self.expected else {
            self.expected = Some(seq_sum(seq, 1));
            return None;
        };

        if seq != expected && !seq_order(expected, seq) {
            // Late or duplicate, the expected position stays put
            self.late_packets += 1;
            return None;
        }

        self.expected = Some(seq_sum(seq, 1));

        let missing = seq_diff(expected, seq);
        if missing == 0 {
            return None;
        }
        if missing >= self.max_gap {
            tracing::debug!("Sequence jump {:04X} -> {:04X}, resynchronizing", expected, seq);
            return None;
        }

        self.total_gaps += 1;
        self.total_lost += u64::from(missing);
        Some(Gap {
            first: expected,
            last: seq.wrapping_sub(1),
        })
    }

    /// Get statistics
    #[must_use]
    pub fn stats(&self) -> SequenceStats {
        SequenceStats {
            packets_received: self.packets_received,
            late_packets: self.late_packets,
            total_gaps: self.total_gaps,
            total_lost: self.total_lost,
        }
    }

    /// Reset the tracker
    pub fn reset(&mut self) {
        *self = Self::with_max_gap(self.max_gap);
    }
}

impl Default for SequenceTracker {
    fn default() -> Self {
        Self::new()
    }
}
