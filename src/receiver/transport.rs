//! Local socket binding for the audio transports

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tokio::net::{TcpListener, UdpSocket};

use crate::error::RtpError;

/// Transport negotiated for the audio stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// One RTP packet per datagram
    Udp,
    /// Length-framed packets over a single connection
    Tcp,
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Udp => write!(f, "UDP"),
            Self::Tcp => write!(f, "TCP"),
        }
    }
}

/// Error parsing a transport name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown transport: {0}")]
pub struct UnknownTransport(pub String);

impl FromStr for TransportKind {
    type Err = UnknownTransport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("udp") {
            Ok(Self::Udp)
        } else if s.eq_ignore_ascii_case("tcp") {
            Ok(Self::Tcp)
        } else {
            Err(UnknownTransport(s.to_string()))
        }
    }
}

/// Wildcard address in the same family as `remote`
fn unspecified_for(remote: &SocketAddr, port: u16) -> SocketAddr {
    let ip = match remote.ip() {
        IpAddr::V4(_) => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        IpAddr::V6(_) => IpAddr::V6(Ipv6Addr::UNSPECIFIED),
    };
    SocketAddr::new(ip, port)
}

/// Bind a datagram socket on an OS-assigned port
///
/// # Errors
/// Returns `RtpError::Bind` if the socket cannot be created or bound.
pub async fn bind_datagram(remote: &SocketAddr) -> Result<(UdpSocket, u16), RtpError> {
    let bind_err = |source| RtpError::Bind {
        transport: TransportKind::Udp,
        source,
    };

    let socket = UdpSocket::bind(unspecified_for(remote, 0))
        .await
        .map_err(bind_err)?;
    let port = socket.local_addr().map_err(bind_err)?.port();

    Ok((socket, port))
}

/// Bind the stream listener on `port`
///
/// # Errors
/// Returns `RtpError::Bind` if the listener cannot be created or bound.
pub async fn bind_stream(remote: &SocketAddr, port: u16) -> Result<(TcpListener, u16), RtpError> {
    let bind_err = |source| RtpError::Bind {
        transport: TransportKind::Tcp,
        source,
    };

    let listener = TcpListener::bind(unspecified_for(remote, port))
        .await
        .map_err(bind_err)?;
    let port = listener.local_addr().map_err(bind_err)?.port();

    Ok((listener, port))
}
