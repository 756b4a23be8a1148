//! Graceful stop for a running lab service.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::broadcast;

/// One-shot stop signal shared by the signal listener, the server, and tests.
///
/// Clones share the same channel. Only the first `trigger` is broadcast.
#[derive(Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
    fired: Arc<AtomicBool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self {
            tx,
            fired: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Receiver that completes once the stop signal is sent.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Send the stop signal. Returns false if it had already been sent.
    pub fn trigger(&self) -> bool {
        if self.fired.swap(true, Ordering::AcqRel) {
            return false;
        }
        // No receivers means the server already exited.
        let _ = self.tx.send(());
        true
    }

    pub fn is_triggered(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
