//! Programmatic shutdown coordination.

use tokio::sync::broadcast;

/// Broadcast-based shutdown trigger.
///
/// The server holds a receiver; `trigger` starts the same drain sequence
/// a termination signal would. Mainly used by integration tests, which
/// cannot deliver process signals to themselves.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    /// Create a new shutdown coordinator.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Request a graceful drain.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
