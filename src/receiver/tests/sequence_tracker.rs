use crate::receiver::sequence_tracker::*;

#[test]
fn test_sequential_packets() {
    let mut tracker = SequenceTracker::new();

    assert!(tracker.record(100).is_none());
    assert!(tracker.record(101).is_none());
    assert!(tracker.record(102).is_none());

    assert_eq!(tracker.stats().packets_received, 3);
    assert_eq!(tracker.stats().total_lost, 0);
}

#[test]
fn test_gap_detection() {
    let mut tracker = SequenceTracker::new();

    tracker.record(100);
    let gap = tracker.record(105).expect("gap"); // Skipped 101-104

    assert_eq!(gap, Gap { first: 101, last: 104 });
    assert_eq!(gap.len(), 4);
    assert_eq!(tracker.stats().total_gaps, 1);
    assert_eq!(tracker.stats().total_lost, 4);
}

#[test]
fn test_wraparound() {
    let mut tracker = SequenceTracker::new();

    tracker.record(65534);
    tracker.record(65535);
    let gap = tracker.record(0); // Wrap to 0

    assert!(gap.is_none());
    assert_eq!(tracker.stats().total_lost, 0);
}

#[test]
fn test_gap_across_wrap() {
    let mut tracker = SequenceTracker::new();

    tracker.record(65533);
    let gap = tracker.record(1).expect("gap");

    assert_eq!(
        gap,
        Gap {
            first: 65534,
            last: 0
        }
    );
    assert_eq!(gap.len(), 3);
}

#[test]
fn test_late_packet_is_not_a_gap() {
    let mut tracker = SequenceTracker::new();

    tracker.record(10);
    tracker.record(12);
    assert!(tracker.record(11).is_none());
    assert!(tracker.record(13).is_none());

    assert_eq!(tracker.stats().late_packets, 1);
}

#[test]
fn test_large_jump_resyncs() {
    let mut tracker = SequenceTracker::with_max_gap(100);

    tracker.record(10);
    assert!(tracker.record(5000).is_none());
    assert!(tracker.record(5001).is_none());
    assert_eq!(tracker.stats().total_gaps, 0);
}

#[test]
fn test_reset() {
    let mut tracker = SequenceTracker::new();
    tracker.record(1);
    tracker.record(3);
    tracker.reset();

    assert_eq!(tracker.stats().packets_received, 0);
    assert!(tracker.record(50).is_none());
}
