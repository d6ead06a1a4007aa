use std::net::SocketAddr;

use crate::error::RtpError;
use crate::receiver::TransportKind;
use crate::receiver::transport::{bind_datagram, bind_stream};

#[test]
fn test_transport_kind_parse() {
    assert_eq!("udp".parse::<TransportKind>().unwrap(), TransportKind::Udp);
    assert_eq!("TCP".parse::<TransportKind>().unwrap(), TransportKind::Tcp);
    assert!("sctp".parse::<TransportKind>().is_err());
}

#[test]
fn test_transport_kind_display() {
    assert_eq!(TransportKind::Udp.to_string(), "UDP");
    assert_eq!(TransportKind::Tcp.to_string(), "TCP");
}

#[test]
fn test_transport_kind_serde() {
    let json = serde_json::to_string(&TransportKind::Tcp).unwrap();
    assert_eq!(json, r#""tcp""#);
}

#[tokio::test]
async fn test_bind_datagram_assigns_port() {
    let remote: SocketAddr = "127.0.0.1:5000".parse().unwrap();

    let (socket, port) = bind_datagram(&remote).await.unwrap();

    assert_ne!(port, 0);
    let local = socket.local_addr().unwrap();
    assert!(local.is_ipv4());
    assert!(local.ip().is_unspecified());
}

#[tokio::test]
async fn test_bind_datagram_follows_remote_family() {
    let remote: SocketAddr = "[::1]:5000".parse().unwrap();

    let (socket, port) = bind_datagram(&remote).await.unwrap();

    assert_ne!(port, 0);
    let local = socket.local_addr().unwrap();
    assert!(local.is_ipv6());
    assert!(local.ip().is_unspecified());
}

#[tokio::test]
async fn test_bind_stream_follows_remote_family() {
    let v6: SocketAddr = "[::1]:5000".parse().unwrap();
    let (listener, _) = bind_stream(&v6, 0).await.unwrap();
    assert!(listener.local_addr().unwrap().is_ipv6());

    let v4: SocketAddr = "127.0.0.1:5000".parse().unwrap();
    let (listener, _) = bind_stream(&v4, 0).await.unwrap();
    assert!(listener.local_addr().unwrap().is_ipv4());
}

#[tokio::test]
async fn test_bind_stream_port_in_use() {
    let remote: SocketAddr = "127.0.0.1:5000".parse().unwrap();
    let (_listener, port) = bind_stream(&remote, 0).await.unwrap();

    let err = bind_stream(&remote, port).await.unwrap_err();
    assert!(matches!(
        err,
        RtpError::Bind {
            transport: TransportKind::Tcp,
            ..
        }
    ));
    assert!(err.is_fatal());
    assert!(!err.is_usage_error());
}
