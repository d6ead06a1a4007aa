use std::io;
use thiserror::Error;

use crate::receiver::TransportKind;

/// Errors surfaced by the RTP receive path
///
/// Two kinds of failure reach the caller here. Contract violations
/// (`AlreadyRunning`, `NotRunning`) and environment failures (`Bind`) are
/// fatal for the session. Malformed network input never shows up as an
/// `RtpError`: the receive loop logs and drops it.
#[derive(Debug, Error)]
pub enum RtpError {
    /// `setup` called while a session is already active
    #[error("RTP setup called with an active stream")]
    AlreadyRunning,

    /// `shutdown` or `request_resend` called without an active session
    #[error("RTP {operation} called without an active stream")]
    NotRunning {
        /// The operation that was attempted
        operation: &'static str,
    },

    /// Could not open or bind the local transport socket
    #[error("could not bind a {transport} port: {source}")]
    Bind {
        /// The transport being bound
        transport: TransportKind,
        /// The underlying socket error
        #[source]
        source: io::Error,
    },

    /// Resend requests need the datagram transport
    #[error("resend requests are not supported over {transport}")]
    ResendUnsupported {
        /// The transport of the active session
        transport: TransportKind,
    },

    /// Network I/O error outside the receive loop
    #[error("network error: {0}")]
    Network(#[from] io::Error),

    /// The receive task ended abnormally (panic or runtime shutdown)
    #[error("receiver task failed: {0}")]
    ReceiverTask(String),
}

impl RtpError {
    /// Check if this error is a violation of the receiver's call contract
    #[must_use]
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Self::AlreadyRunning | Self::NotRunning { .. } | Self::ResendUnsupported { .. }
        )
    }

    /// Check if this error leaves the receiver unable to proceed
    ///
    /// Bind failures have no fallback port and no retry policy, so they are
    /// fatal along with every usage error.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        self.is_usage_error() || matches!(self, Self::Bind { .. } | Self::ReceiverTask(_))
    }
}

impl From<tokio::task::JoinError> for RtpError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::ReceiverTask(err.to_string())
    }
}
