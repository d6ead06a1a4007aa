//! Mock RAOP sender for testing the receiver
//!
//! Plays the sender's side of both audio transports without a real
//! sender on the network.

use std::io;
use std::net::SocketAddr;

use tokio::io::AsyncWriteExt;
use tokio::net::{TcpStream, UdpSocket};

use super::{audio_datagram, resend_datagram, stream_frame, sync_datagram};
use crate::protocol::rtp::{RESEND_REQUEST_LEN, ResendRequest};

/// Mock sender for the datagram transport
///
/// One loopback socket sends audio and doubles as the control port that
/// resend requests come back to.
pub struct MockSender {
    socket: UdpSocket,
}

impl MockSender {
    /// Bind the sender's socket on loopback
    ///
    /// # Errors
    /// Returns an IO error if the socket cannot be bound.
    pub async fn bind() -> io::Result<Self> {
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        Ok(Self { socket })
    }

    /// Address the receiver should treat as the control port
    ///
    /// # Errors
    /// Returns an IO error if the socket has no local address.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Send an audio packet
    ///
    /// # Errors
    /// Returns an IO error if the send fails.
    pub async fn send_audio(
        &self,
        target: SocketAddr,
        sequence: u16,
        payload: &[u8],
    ) -> io::Result<()> {
        self.send_raw(target, &audio_datagram(sequence, payload)).await
    }

    /// Send a retransmitted audio packet
    ///
    /// # Errors
    /// Returns an IO error if the send fails.
    pub async fn send_resend_audio(
        &self,
        target: SocketAddr,
        sequence: u16,
        payload: &[u8],
    ) -> io::Result<()> {
        self.send_raw(target, &resend_datagram(sequence, payload)).await
    }

    /// Send a timing sync packet
    ///
    /// # Errors
    /// Returns an IO error if the send fails.
    pub async fn send_sync(&self, target: SocketAddr) -> io::Result<()> {
        self.send_raw(target, &sync_datagram()).await
    }

    /// Send arbitrary bytes
    ///
    /// # Errors
    /// Returns an IO error if the send fails.
    pub async fn send_raw(&self, target: SocketAddr, data: &[u8]) -> io::Result<()> {
        self.socket.send_to(data, target).await?;
        Ok(())
    }

    /// Wait for the next resend request, skipping anything else
    ///
    /// # Errors
    /// Returns an IO error if receiving fails.
    pub async fn recv_resend_request(&self) -> io::Result<(ResendRequest, [u8; 8])> {
        let mut buf = [0u8; 64];
        loop {
            let (len, _src) = self.socket.recv_from(&mut buf).await?;
            if len != RESEND_REQUEST_LEN {
                continue;
            }
            if let Some(request) = ResendRequest::decode(&buf[..len]) {
                let mut raw = [0u8; RESEND_REQUEST_LEN];
                raw.copy_from_slice(&buf[..len]);
                return Ok((request, raw));
            }
        }
    }
}

/// Mock sender for the stream transport
pub struct MockStreamSender {
    stream: TcpStream,
}

impl MockStreamSender {
    /// Connect to the receiver's stream listener
    ///
    /// # Errors
    /// Returns an IO error if the connection fails.
    pub async fn connect(addr: SocketAddr) -> io::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        stream.set_nodelay(true)?;
        Ok(Self { stream })
    }

    /// Send one framed audio chunk behind a sub-header
    ///
    /// # Errors
    /// Returns an IO error if the write fails.
    pub async fn send_audio(&mut self, sequence: u16, audio: &[u8]) -> io::Result<()> {
        self.send_raw(&stream_frame(sequence, audio)).await
    }

    /// Send arbitrary bytes
    ///
    /// # Errors
    /// Returns an IO error if the write fails.
    pub async fn send_raw(&mut self, data: &[u8]) -> io::Result<()> {
        self.stream.write_all(data).await?;
        self.stream.flush().await
    }

    /// Close the sending half, as a sender ending the stream would
    ///
    /// # Errors
    /// Returns an IO error if the shutdown fails.
    pub async fn close(mut self) -> io::Result<()> {
        self.stream.shutdown().await
    }
}
