use crate::protocol::rtp::{
    AudioPacket, Datagram, MIN_AUDIO_PAYLOAD, PacketType, RTP_HEADER_LEN, RtpView, classify,
};
use crate::testing::{audio_datagram, resend_datagram, sync_datagram};

#[test]
fn test_packet_type_from_byte_masks_marker() {
    assert_eq!(PacketType::from_byte(0x60), Some(PacketType::Audio));
    assert_eq!(PacketType::from_byte(0xE0), Some(PacketType::Audio));
    assert_eq!(PacketType::from_byte(0xD6), Some(PacketType::ResendAudio));
    assert_eq!(PacketType::from_byte(0xD4), Some(PacketType::Sync));
    assert_eq!(PacketType::from_byte(0x55), None);
    assert_eq!(PacketType::from_byte(0x00), None);
}

#[test]
fn test_view_accessors() {
    let data = [0x80, 0xE0, 0x01, 0x02, 0, 0, 0, 0, 0, 0, 0, 0, 0xAA, 0xBB];
    let view = RtpView::new(&data);

    assert!(view.marker());
    assert_eq!(view.type_byte(), Some(0x60));
    assert_eq!(view.sequence(), Some(0x0102));
    assert_eq!(view.payload(), &[0xAA, 0xBB]);
}

#[test]
fn test_view_truncated() {
    let view = RtpView::new(&[0x80, 0x60, 0x01]);
    assert_eq!(view.sequence(), None);
    assert!(view.payload().is_empty());

    let empty = RtpView::new(&[]);
    assert!(empty.is_empty());
    assert!(!empty.marker());
    assert_eq!(empty.type_byte(), None);
    assert!(empty.skip(4).is_empty());
}

#[test]
fn test_audio_minimum_payload_is_forwarded() {
    let datagram = audio_datagram(1234, &[0x11; MIN_AUDIO_PAYLOAD]);
    assert_eq!(datagram.len(), 28);

    match classify(&datagram) {
        Datagram::Audio(AudioPacket {
            sequence,
            payload,
            retransmitted,
        }) => {
            assert_eq!(sequence, 1234);
            assert_eq!(payload.len(), 16);
            assert!(payload.iter().all(|&b| b == 0x11));
            assert!(!retransmitted);
        }
        other => panic!("expected audio, got {other:?}"),
    }
}

#[test]
fn test_audio_one_byte_short_is_malformed() {
    let datagram = audio_datagram(77, &[0x11; MIN_AUDIO_PAYLOAD - 1]);
    assert_eq!(datagram.len(), 27);

    assert_eq!(
        classify(&datagram),
        Datagram::Malformed {
            packet_type: Some(PacketType::Audio),
            len: 27,
            sequence: Some(77),
        }
    );
}

#[test]
fn test_resend_audio_skips_prefix() {
    let datagram = resend_datagram(500, &[0x22; 32]);
    assert_eq!(datagram.len(), 4 + RTP_HEADER_LEN + 32);

    match classify(&datagram) {
        Datagram::Audio(packet) => {
            assert_eq!(packet.sequence, 500);
            assert_eq!(packet.payload, &[0x22; 32][..]);
            assert!(packet.retransmitted);
        }
        other => panic!("expected audio, got {other:?}"),
    }
}

#[test]
fn test_short_resend_with_zero_sequence_is_echo() {
    let datagram = resend_datagram(0, &[0x00; 4]);
    assert_eq!(classify(&datagram), Datagram::ResendEcho);
}

#[test]
fn test_short_resend_with_nonzero_sequence_is_malformed() {
    let datagram = resend_datagram(9, &[0x00; 4]);
    assert!(matches!(
        classify(&datagram),
        Datagram::Malformed {
            packet_type: Some(PacketType::ResendAudio),
            sequence: Some(9),
            ..
        }
    ));
}

#[test]
fn test_short_audio_with_zero_sequence_is_not_echo() {
    // Only resend-audio packets get the benign echo treatment
    let datagram = audio_datagram(0, &[0x00; 4]);
    assert!(matches!(classify(&datagram), Datagram::Malformed { .. }));
}

#[test]
fn test_sync_is_never_audio() {
    assert_eq!(classify(&sync_datagram()), Datagram::Sync);

    // Even a sync packet with a plausible audio payload
    let mut datagram = audio_datagram(1, &[0x33; 64]);
    datagram[1] = 0xD4;
    assert_eq!(classify(&datagram), Datagram::Sync);
}

#[test]
fn test_unknown_type() {
    let mut datagram = audio_datagram(1, &[0x33; 64]);
    datagram[1] = 0xD5;

    assert_eq!(
        classify(&datagram),
        Datagram::Unknown {
            type_byte: 0x55,
            len: datagram.len(),
        }
    );
}

#[test]
fn test_tiny_datagrams_are_malformed() {
    assert!(matches!(
        classify(&[]),
        Datagram::Malformed {
            packet_type: None,
            ..
        }
    ));
    assert!(matches!(
        classify(&[0x80]),
        Datagram::Malformed {
            packet_type: None,
            ..
        }
    ));
    assert!(matches!(
        classify(&[0x80, 0xE0, 0x00]),
        Datagram::Malformed {
            packet_type: Some(PacketType::Audio),
            sequence: None,
            ..
        }
    ));
}
