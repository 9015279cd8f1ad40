//! Per-account unread counts

use std::collections::HashMap;
use std::sync::Mutex;

/// In-process badge counter keyed by normalized access token
///
/// Increments for the same installation are serialized by the lock.
#[derive(Debug, Default)]
pub struct BadgeCounter {
    counts: Mutex<HashMap<String, u32>>,
}

impl BadgeCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment and return the new count
    pub fn increment(&self, account: &str) -> u32 {
        let mut counts = self.lock();
        let count = counts.entry(account.to_string()).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    pub fn get(&self, account: &str) -> u32 {
        self.lock().get(account).copied().unwrap_or(0)
    }

    /// Clear the count, e.g. once the user has opened the app
    pub fn reset(&self, account: &str) {
        self.lock().remove(account);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, u32>> {
        self.counts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
