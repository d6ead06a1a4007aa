//! Cancellable blocking I/O for the receive loop
//!
//! A shutdown is a flag plus a wakeup. The controller holds the
//! [`ShutdownTrigger`]; the loop holds the [`ShutdownSignal`] and wraps each
//! blocking call in [`ShutdownSignal::run_until`], which returns early when
//! the trigger fires and re-checks the flag once the call completes.

use std::future::Future;

use tokio::sync::watch;

/// Controller side of a shutdown
#[derive(Debug)]
pub struct ShutdownTrigger {
    tx: watch::Sender<bool>,
}

/// Receive-loop side of a shutdown
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

/// Create a connected trigger and signal
#[must_use]
pub fn shutdown_channel() -> (ShutdownTrigger, ShutdownSignal) {
    let (tx, rx) = watch::channel(false);
    (ShutdownTrigger { tx }, ShutdownSignal { rx })
}

impl ShutdownTrigger {
    /// Set the flag and wake every pending [`ShutdownSignal::run_until`]
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    /// Whether the flag has been set
    #[must_use]
    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }
}

impl ShutdownSignal {
    /// Whether shutdown was requested (a dropped trigger counts)
    #[must_use]
    pub fn is_triggered(&self) -> bool {
        *self.rx.borrow() || self.rx.has_changed().is_err()
    }

    /// Resolve once shutdown is requested
    pub async fn triggered(&mut self) {
        // Err means the trigger was dropped, which also ends the session.
        let _ = self.rx.wait_for(|stop| *stop).await;
    }

    /// Run `fut` unless shutdown arrives first
    ///
    /// Returns `None` if shutdown was requested before, during, or right
    /// after `fut` completes. A completed result is discarded in that case.
    pub async fn run_until<F: Future>(&mut self, fut: F) -> Option<F::Output> {
        if self.is_triggered() {
            return None;
        }

        let output = tokio::select! {
            biased;
            () = self.triggered() => return None,
            output = fut => output,
        };

        if self.is_triggered() {
            None
        } else {
            Some(output)
        }
    }
}

/// Why a receive loop ended
///
/// None of these are failures of the receiver itself: the controller treats
/// every exit as the normal end of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// Shutdown was requested
    Shutdown,
    /// Receiving on the socket failed
    SocketError,
    /// The stream peer closed the connection
    PeerClosed,
    /// The stream peer sent a frame header with the wrong marker
    FramingError,
    /// No stream connection arrived within the accept timeout
    AcceptTimeout,
}
