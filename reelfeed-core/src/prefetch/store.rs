//! Bounded, insertion-ordered chunk store.

use std::collections::VecDeque;

use bytes::Bytes;
use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::info;

/// Leading chunks keyed by asset URL.
///
/// Writes are last-write-wins; an overwrite keeps the key's original
/// position in the eviction order. Eviction is oldest-insert-first with no
/// access tracking.
#[derive(Debug, Default)]
pub struct ChunkStore {
    entries: DashMap<String, Bytes>,
    order: Mutex<VecDeque<String>>,
}

impl ChunkStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.entries.contains_key(url)
    }

    pub fn get(&self, url: &str) -> Option<Bytes> {
        self.entries.get(url).map(|entry| entry.value().clone())
    }

    pub fn insert(&self, url: impl Into<String>, chunk: Bytes) {
        let url = url.into();
        // Hold the order lock across the map write so a concurrent trim
        // cannot observe a key missing from the queue.
        let mut order = self.order.lock();
        if self.entries.insert(url.clone(), chunk).is_none() {
            order.push_back(url);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in eviction order, oldest first.
    pub fn keys(&self) -> Vec<String> {
        self.order.lock().iter().cloned().collect()
    }

    /// Trim down to `low_watermark` keys once more than `max_entries` are
    /// held. Returns how many entries were evicted.
    pub fn run_maintenance(&self, max_entries: usize, low_watermark: usize) -> usize {
        let mut order = self.order.lock();
        if order.len() <= max_entries {
            return 0;
        }

        let mut evicted = 0;
        while order.len() > low_watermark {
            let Some(url) = order.pop_front() else {
                break;
            };
            self.entries.remove(&url);
            evicted += 1;
        }

        info!(
            evicted,
            remaining = order.len(),
            "prefetch store trimmed to low watermark"
        );
        evicted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(store: &ChunkStore, n: usize) {
        for i in 0..n {
            store.insert(format!("https://cdn.example/{i}.mp4"), Bytes::from_static(b"x"));
        }
    }

    #[test]
    fn maintenance_is_noop_at_ceiling() {
        let store = ChunkStore::new();
        fill(&store, 50);
        assert_eq!(store.run_maintenance(50, 20), 0);
        assert_eq!(store.len(), 50);
    }

    #[test]
    fn maintenance_evicts_oldest_first() {
        let store = ChunkStore::new();
        fill(&store, 51);
        assert_eq!(store.run_maintenance(50, 20), 31);
        assert_eq!(store.len(), 20);
        assert!(!store.contains("https://cdn.example/30.mp4"));
        assert!(store.contains("https://cdn.example/31.mp4"));
        assert_eq!(store.keys().first().map(String::as_str), Some("https://cdn.example/31.mp4"));
    }

    #[test]
    fn overwrite_keeps_position_and_replaces_bytes() {
        let store = ChunkStore::new();
        store.insert("a", Bytes::from_static(b"old"));
        store.insert("b", Bytes::from_static(b"b"));
        store.insert("a", Bytes::from_static(b"new"));
        assert_eq!(store.keys(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(store.get("a").as_deref(), Some(&b"new"[..]));
        assert_eq!(store.len(), 2);
    }
}
