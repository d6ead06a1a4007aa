//! Counters shared between the receive loop and its controller

use std::sync::atomic::{AtomicU64, Ordering};

/// Live receive counters
///
/// Written by the receive loop, read by the controller at any time.
#[derive(Debug, Default)]
pub struct ReceiverStats {
    datagrams: AtomicU64,
    audio_packets: AtomicU64,
    retransmitted_packets: AtomicU64,
    sync_packets: AtomicU64,
    resend_echoes: AtomicU64,
    malformed: AtomicU64,
    unknown_type: AtomicU64,
    stream_frames: AtomicU64,
    bytes_forwarded: AtomicU64,
}

/// Point-in-time copy of [`ReceiverStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Datagrams received
    pub datagrams: u64,
    /// Audio packets forwarded (including retransmissions)
    pub audio_packets: u64,
    /// Of those, retransmitted packets
    pub retransmitted_packets: u64,
    /// Sync packets dropped
    pub sync_packets: u64,
    /// Benign resend echoes dropped
    pub resend_echoes: u64,
    /// Malformed packets or frames dropped
    pub malformed: u64,
    /// Packets of an unknown type dropped
    pub unknown_type: u64,
    /// Stream frames forwarded
    pub stream_frames: u64,
    /// Audio bytes handed to the sink
    pub bytes_forwarded: u64,
}

fn bump(counter: &AtomicU64) {
    counter.fetch_add(1, Ordering::Relaxed);
}

impl ReceiverStats {
    /// Create zeroed counters
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_datagram(&self) {
        bump(&self.datagrams);
    }

    pub(crate) fn record_audio(&self, len: usize, retransmitted: bool) {
        bump(&self.audio_packets);
        if retransmitted {
            bump(&self.retransmitted_packets);
        }
        self.bytes_forwarded.fetch_add(len as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_sync(&self) {
        bump(&self.sync_packets);
    }

    pub(crate) fn record_resend_echo(&self) {
        bump(&self.resend_echoes);
    }

    pub(crate) fn record_malformed(&self) {
        bump(&self.malformed);
    }

    pub(crate) fn record_unknown(&self) {
        bump(&self.unknown_type);
    }

    pub(crate) fn record_stream_frame(&self, len: usize) {
        bump(&self.stream_frames);
        self.bytes_forwarded.fetch_add(len as u64, Ordering::Relaxed);
    }

    /// Copy out the current counters
    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        let load = |counter: &AtomicU64| counter.load(Ordering::Relaxed);
        StatsSnapshot {
            datagrams: load(&self.datagrams),
            audio_packets: load(&self.audio_packets),
            retransmitted_packets: load(&self.retransmitted_packets),
            sync_packets: load(&self.sync_packets),
            resend_echoes: load(&self.resend_echoes),
            malformed: load(&self.malformed),
            unknown_type: load(&self.unknown_type),
            stream_frames: load(&self.stream_frames),
            bytes_forwarded: load(&self.bytes_forwarded),
        }
    }

    /// Zero every counter
    pub fn reset(&self) {
        for counter in [
            &self.datagrams,
            &self.audio_packets,
            &self.retransmitted_packets,
            &self.sync_packets,
            &self.resend_echoes,
            &self.malformed,
            &self.unknown_type,
            &self.stream_frames,
            &self.bytes_forwarded,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}
