//! Single-fire readiness gates
//!
//! A [`ReadySignal`] is fired exactly once by its owner and observed by any
//! number of waiters. Waiters that arrive after the signal fired return
//! immediately.

use tokio::sync::watch;

/// One-shot broadcast readiness gate
#[derive(Debug)]
pub struct ReadySignal {
    tx: watch::Sender<bool>,
}

impl ReadySignal {
    /// Create an unfired signal
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    /// Fire the signal, waking every waiter
    ///
    /// # Panics
    ///
    /// Panics if the signal has already been fired.
    pub fn fire(&self) {
        let fired = self.tx.send_if_modified(|ready| {
            if *ready {
                false
            } else {
                *ready = true;
                true
            }
        });
        assert!(fired, "readiness signal fired twice");
    }

    /// Whether the signal has fired
    pub fn is_fired(&self) -> bool {
        *self.tx.borrow()
    }

    /// Wait until the signal fires
    ///
    /// There is no timeout; wrap in `tokio::time::timeout` if one is needed.
    pub async fn wait(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives as long as `self`, so this cannot observe a closed channel.
        let _ = rx.wait_for(|ready| *ready).await;
    }
}

impl Default for ReadySignal {
    fn default() -> Self {
        Self::new()
    }
}
