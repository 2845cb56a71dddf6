//! Lifetimes of views: timers and late replies die with their scope

use std::sync::{Arc, RwLock, RwLockReadGuard};

use tokio::sync::watch;

/// Cancellation token shared by everything started for one active view
#[derive(Debug, Clone)]
pub struct ViewScope {
    cancel_tx: Arc<watch::Sender<bool>>,
    cancel_rx: watch::Receiver<bool>,
    /// Held shared by writers, exclusively by `cancel`
    gate: Arc<RwLock<()>>,
}

impl ViewScope {
    pub fn new() -> Self {
        let (cancel_tx, cancel_rx) = watch::channel(false);

        Self {
            cancel_tx: Arc::new(cancel_tx),
            cancel_rx,
            gate: Arc::new(RwLock::new(())),
        }
    }

    /// Cancel the scope and every clone of it.
    ///
    /// Waits for writes that already entered the scope; none start afterwards.
    pub fn cancel(&self) {
        let _gate = self.gate.write().unwrap_or_else(|e| e.into_inner());
        self.cancel_tx.send_replace(true);
    }

    /// Enter the scope for one write, or `None` once it is cancelled
    pub fn enter(&self) -> Option<RwLockReadGuard<'_, ()>> {
        let guard = self.gate.read().unwrap_or_else(|e| e.into_inner());
        (!self.is_cancelled()).then_some(guard)
    }

    pub fn is_cancelled(&self) -> bool {
        *self.cancel_rx.borrow()
    }

    /// Resolves once the scope is cancelled
    pub async fn cancelled(&self) {
        let mut rx = self.cancel_rx.clone();
        // The sender lives as long as any clone of the scope, so this only
        // returns once the flag flips.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }
}

impl Default for ViewScope {
    fn default() -> Self {
        Self::new()
    }
}
