//! Caches for fetched mesh files.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Storage for raw file bytes, keyed by mesh name.
pub trait Cache: Send + Sync {
    fn get(&self, name: &str) -> Option<Arc<[u8]>>;
    fn insert(&self, name: &str, data: Arc<[u8]>);
}

/// Keeps every fetched file in memory for the lifetime of the cache.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, Arc<[u8]>>>,
}

impl MemoryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().map_or(0, |entries| entries.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Cache for MemoryCache {
    fn get(&self, name: &str) -> Option<Arc<[u8]>> {
        self.entries.read().ok()?.get(name).cloned()
    }

    fn insert(&self, name: &str, data: Arc<[u8]>) {
        // A poisoned lock only means another insert panicked; skip caching.
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(name.to_owned(), data);
        }
    }
}

/// Never stores anything; every fetch goes to the network.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCache;

impl Cache for NoCache {
    fn get(&self, _name: &str) -> Option<Arc<[u8]>> {
        None
    }

    fn insert(&self, _name: &str, _data: Arc<[u8]>) {}
}
