//! One-shot unban timers.
//!
//! At most one pending timer exists per address: scheduling over a live
//! timer aborts the old one first, so duplicate unban actions can never
//! race on the same record. Firing order across addresses is unspecified.

use std::collections::HashMap;
use std::net::IpAddr;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Per-address one-shot timer registry.
#[derive(Debug, Default)]
pub struct ExpiryScheduler {
    timers: HashMap<IpAddr, JoinHandle<()>>,
}

impl ExpiryScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arrange for `on_expire` to run once, no earlier than `delay` from
    /// now. A pending timer for the same address is cancelled first.
    pub fn schedule<F>(&mut self, address: IpAddr, delay: Duration, on_expire: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            on_expire();
        });
        if let Some(previous) = self.timers.insert(address, handle) {
            previous.abort();
        }
    }

    /// Cancel a pending timer. Idempotent: returns false when no timer was
    /// pending.
    pub fn cancel(&mut self, address: &IpAddr) -> bool {
        match self.timers.remove(address) {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    /// Drop the handle entry for a timer that has fired. Called by the
    /// expiry action itself; the task is already finishing, so no abort.
    pub(crate) fn clear(&mut self, address: &IpAddr) {
        self.timers.remove(address);
    }

    /// Number of pending timers.
    pub fn pending(&self) -> usize {
        self.timers.len()
    }
}

impl Drop for ExpiryScheduler {
    fn drop(&mut self) {
        for handle in self.timers.values() {
            handle.abort();
        }
    }
}
