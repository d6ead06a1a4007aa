//! # raop-rtp
//!
//! The network receive path of a RAOP audio receiver.
//!
//! ## Features
//!
//! - Datagram transport: classifies sync, audio and retransmitted audio
//!   packets and forwards sequenced payloads
//! - Stream transport: de-frames length-prefixed audio from a single
//!   connection
//! - Resend requests for missing sequence ranges
//! - One receive task per session with cooperative, joinable shutdown
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use raop_rtp::{ReceivedAudio, RtpConfig, RtpReceiver, TransportKind};
//! use tokio::sync::mpsc;
//!
//! # async fn example() -> Result<(), raop_rtp::RtpError> {
//! let (tx, mut rx) = mpsc::channel::<ReceivedAudio>(256);
//! let mut receiver = RtpReceiver::new(RtpConfig::default(), Arc::new(tx));
//!
//! // Ports come from the RTSP SETUP exchange
//! let sender = "192.168.1.20:0".parse().unwrap();
//! let port = receiver.setup(sender, TransportKind::Udp, 6001, 6002).await?;
//! println!("advertise server_port={port}");
//!
//! while let Some(audio) = rx.recv().await {
//!     // hand to the jitter buffer ...
//! #   let _ = audio;
//! #   break;
//! }
//!
//! receiver.request_resend(100, 103).await?;
//! receiver.shutdown().await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Controller**: [`RtpReceiver`] - session lifecycle and resend requests
//! - **Receive loops**: [`receiver::udp_receiver`], [`receiver::tcp_receiver`]
//! - **Wire formats**: [`protocol::rtp`] - pure parsing and encoding

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Error types
pub mod error;
pub mod protocol;
pub mod receiver;

/// Testing utilities
pub mod testing;

pub use error::RtpError;
pub use receiver::{
    AudioSink, ExitReason, OutputControl, ReceivedAudio, ReceiverState, RtpConfig, RtpReceiver,
    TransportKind,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
