//! Per-page scroll position memory
//!
//! Offsets are stored under transient `scroll:<page>` keys and removed as soon
//! as they are read back.

use crate::storage::KeyValueStore;
use crate::timer::Debouncer;
use std::sync::Arc;
use std::time::Duration;

/// Saves and restores scroll offsets
#[derive(Clone)]
pub struct ScrollMemory {
    storage: Arc<dyn KeyValueStore>,
}

impl ScrollMemory {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    fn key(page: &str) -> String {
        format!("scroll:{}", page)
    }

    pub fn save(&self, page: &str, offset: u64) {
        if let Err(e) = self.storage.set(&Self::key(page), &offset.to_string()) {
            tracing::debug!("Failed to save scroll position for {}: {}", page, e);
        }
    }

    /// Read and clear the saved offset
    pub fn take(&self, page: &str) -> Option<u64> {
        let key = Self::key(page);
        let offset = self
            .storage
            .get(&key)
            .ok()
            .flatten()
            .and_then(|raw| raw.trim().parse().ok());
        if let Err(e) = self.storage.remove(&key) {
            tracing::debug!("Failed to clear scroll position for {}: {}", page, e);
        }
        offset
    }

    /// A debouncer that saves offsets for `page` once scrolling settles
    pub fn debounced(&self, page: &str, delay: Duration) -> Debouncer<u64> {
        let memory = self.clone();
        let page = page.to_string();
        Debouncer::new(delay, move |offset| memory.save(&page, offset))
    }
}
