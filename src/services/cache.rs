// src/services/cache.rs
// DOCUMENTATION: Simple in-memory cache for maps search responses
// PURPOSE: Avoid repeating identical text searches within the TTL

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Cache entry with expiration
#[derive(Clone, Debug)]
struct CacheEntry<T> {
    data: T,
    expires_at: Instant,
}

impl<T> CacheEntry<T> {
    fn new(data: T, ttl: Duration) -> Self {
        Self {
            data,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() > self.expires_at
    }
}

/// In-memory cache with TTL
/// DOCUMENTATION: Values are the raw JSON bodies returned by the provider
#[derive(Clone)]
pub struct PlacesCache {
    store: Arc<RwLock<HashMap<String, CacheEntry<String>>>>,
    default_ttl: Duration,
}

impl PlacesCache {
    pub fn new(ttl_seconds: u64) -> Self {
        Self {
            store: Arc::new(RwLock::new(HashMap::new())),
            default_ttl: Duration::from_secs(ttl_seconds),
        }
    }

    /// Key for a text search; case and surrounding whitespace are ignored
    pub fn search_key(query: &str, language: &str) -> String {
        format!("text:{}:{}", language, query.trim().to_lowercase())
    }

    /// Key for a next-page lookup
    pub fn page_key(page_token: &str) -> String {
        format!("page:{}", page_token)
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        let store = self.store.read().await;

        match store.get(key) {
            Some(entry) if !entry.is_expired() => {
                log::debug!("Cache HIT for key: {}", key);
                Some(entry.data.clone())
            }
            Some(_) => {
                log::debug!("Cache EXPIRED for key: {}", key);
                None
            }
            None => {
                log::debug!("Cache MISS for key: {}", key);
                None
            }
        }
    }

    pub async fn set(&self, key: String, value: String) {
        self.set_with_ttl(key, value, self.default_ttl).await;
    }

    /// Store `value`; expired entries are dropped on every insert
    pub async fn set_with_ttl(&self, key: String, value: String, ttl: Duration) {
        let mut store = self.store.write().await;
        let before_count = store.len();
        store.retain(|_, entry| !entry.is_expired());
        if before_count > store.len() {
            log::debug!(
                "Cache cleanup: removed {} expired entries",
                before_count - store.len()
            );
        }

        log::debug!("Cache SET for key: {} (TTL: {}s)", key, ttl.as_secs());
        store.insert(key, CacheEntry::new(value, ttl));
    }
}
