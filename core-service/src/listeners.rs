//! Host listener bookkeeping.
//!
//! Hosts announce listener registration and removal so native modules can
//! track interest. Events are delivered regardless of the count.

use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::debug;

#[derive(Debug, Default)]
pub struct ListenerRegistry {
    count: AtomicUsize,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, event_name: &str) {
        let count = self.count.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(event = event_name, count, "Listener added");
    }

    /// Remove up to `count` listeners; never drops below zero.
    pub fn remove(&self, count: usize) {
        let previous = self
            .count
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
                Some(current.saturating_sub(count))
            })
            .unwrap_or_else(|current| current);
        debug!(
            removed = count.min(previous),
            remaining = previous.saturating_sub(count),
            "Listeners removed"
        );
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_remove() {
        let registry = ListenerRegistry::new();
        registry.add("onTagDiscovered");
        registry.add("nfcStatusChange");
        registry.remove(1);
        assert_eq!(registry.count(), 1);
    }

    #[test]
    fn test_remove_saturates() {
        let registry = ListenerRegistry::new();
        registry.add("onTagDiscovered");
        registry.remove(5);
        assert_eq!(registry.count(), 0);
        registry.remove(1);
        assert_eq!(registry.count(), 0);
    }
}
