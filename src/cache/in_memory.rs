//! In-memory session cache.
//!
//! Thread-safe map guarded by a tokio `RwLock`. Besides the
//! [`SessionCache`] operations it counts reads and can be switched into
//! a failing mode, which is what tests use to exercise cache outages.

use crate::cache::{CacheError, SessionCache};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// Thread-safe in-memory session cache.
///
/// Clones share the same underlying map.
#[derive(Clone, Default)]
pub struct InMemorySessionCache {
    entries: Arc<RwLock<HashMap<String, String>>>,
    reads: Arc<AtomicUsize>,
    unavailable: Arc<AtomicBool>,
}

impl InMemorySessionCache {
    /// Create a new empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache pre-populated with entries.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: Arc::new(RwLock::new(map)),
            ..Self::default()
        }
    }

    /// Number of `get` calls served so far.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Make every subsequent operation fail with [`CacheError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of entries currently stored.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Clear all entries (useful for testing).
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    fn check_available(&self) -> Result<(), CacheError> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(CacheError::unavailable("in-memory cache switched off"))
        } else {
            Ok(())
        }
    }
}

impl SessionCache for InMemorySessionCache {
    type Error = CacheError;

    async fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        self.check_available()?;
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.check_available()?;
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool, Self::Error> {
        self.check_available()?;
        Ok(self.entries.write().await.remove(key).is_some())
    }
}
