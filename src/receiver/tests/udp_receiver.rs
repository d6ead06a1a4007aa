use super::RecordingSink;
use crate::receiver::stats::{ReceiverStats, StatsSnapshot};
use crate::receiver::udp_receiver::dispatch_datagram;
use crate::testing::{audio_datagram, resend_datagram, sync_datagram};

#[test]
fn test_dispatch_forwards_audio() {
    let sink = RecordingSink::default();
    let stats = ReceiverStats::new();

    dispatch_datagram(&audio_datagram(10, &[0xAB; 16]), &sink, &stats);

    assert_eq!(sink.audio(), vec![(10, vec![0xAB; 16])]);
    let snapshot = stats.snapshot();
    assert_eq!(snapshot.datagrams, 1);
    assert_eq!(snapshot.audio_packets, 1);
    assert_eq!(snapshot.bytes_forwarded, 16);
}

#[test]
fn test_dispatch_drops_short_audio() {
    let sink = RecordingSink::default();
    let stats = ReceiverStats::new();

    dispatch_datagram(&audio_datagram(10, &[0xAB; 15]), &sink, &stats);

    assert!(sink.audio().is_empty());
    assert_eq!(stats.snapshot().malformed, 1);
}

#[test]
fn test_dispatch_ignores_sync() {
    let sink = RecordingSink::default();
    let stats = ReceiverStats::new();

    dispatch_datagram(&sync_datagram(), &sink, &stats);

    assert!(sink.audio().is_empty());
    assert_eq!(stats.snapshot().sync_packets, 1);
}

#[test]
fn test_dispatch_retransmitted_audio() {
    let sink = RecordingSink::default();
    let stats = ReceiverStats::new();

    dispatch_datagram(&resend_datagram(300, &[0x01; 40]), &sink, &stats);

    assert_eq!(sink.audio(), vec![(300, vec![0x01; 40])]);
    let snapshot = stats.snapshot();
    assert_eq!(snapshot.audio_packets, 1);
    assert_eq!(snapshot.retransmitted_packets, 1);
}

#[test]
fn test_dispatch_resend_echo_is_quiet() {
    let sink = RecordingSink::default();
    let stats = ReceiverStats::new();

    dispatch_datagram(&resend_datagram(0, &[]), &sink, &stats);

    assert!(sink.audio().is_empty());
    let snapshot = stats.snapshot();
    assert_eq!(snapshot.resend_echoes, 1);
    assert_eq!(snapshot.malformed, 0);
}

#[test]
fn test_dispatch_unknown_type() {
    let sink = RecordingSink::default();
    let stats = ReceiverStats::new();

    let mut datagram = audio_datagram(1, &[0; 32]);
    datagram[1] = 0xD2;
    dispatch_datagram(&datagram, &sink, &stats);

    assert!(sink.audio().is_empty());
    assert_eq!(stats.snapshot().unknown_type, 1);
}

#[test]
fn test_stats_reset() {
    let sink = RecordingSink::default();
    let stats = ReceiverStats::new();

    dispatch_datagram(&audio_datagram(1, &[0; 32]), &sink, &stats);
    stats.reset();

    assert_eq!(stats.snapshot(), StatsSnapshot::default());
}
