//! RTP receive path
//!
//! Binds the negotiated audio transport, runs the single receive task and
//! forwards audio to the playback buffer.

pub mod config;
pub mod controller;
pub mod sequence_tracker;
pub mod shutdown;
pub mod sink;
pub mod stats;
pub mod tcp_receiver;
pub mod transport;
pub mod udp_receiver;

#[cfg(test)]
mod tests;

pub use config::RtpConfig;
pub use controller::{ReceiverState, RtpReceiver};
pub use sequence_tracker::{Gap, SequenceStats, SequenceTracker};
pub use shutdown::{ExitReason, ShutdownSignal, ShutdownTrigger, shutdown_channel};
pub use sink::{AudioSink, OutputControl, ReceivedAudio};
pub use stats::{ReceiverStats, StatsSnapshot};
pub use transport::TransportKind;
