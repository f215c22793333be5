// src/cache.rs
//! Process-wide search-result cache with a fixed time-to-live.
//!
//! Keys are normalized query strings; values are full [`CombinedResult`]
//! snapshots. An entry is valid for `ttl` measured from its insertion.
//! Writers prune anything already expired, so the map stays bounded by the
//! distinct queries seen inside one window.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::types::CombinedResult;

struct CacheEntry {
    inserted_at: Instant,
    result: CombinedResult,
}

pub struct ResultCache {
    ttl: Duration,
    inner: Mutex<HashMap<String, CacheEntry>>,
}

impl ResultCache {
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            inner: Mutex::new(HashMap::new()),
        }
    }

    /// Returns a clone of the entry for `query` if it is still inside its
    /// TTL window. Expired entries are left for the next `put` to sweep.
    pub fn get(&self, query: &str) -> Option<CombinedResult> {
        let guard = self.inner.lock().expect("result cache mutex poisoned");
        guard
            .get(query)
            .filter(|entry| entry.inserted_at.elapsed() < self.ttl)
            .map(|entry| entry.result.clone())
    }

    /// Stores `result` under `query`, restarting that query's TTL window and
    /// sweeping out every expired entry.
    pub fn put(&self, query: &str, result: CombinedResult) {
        let mut guard = self.inner.lock().expect("result cache mutex poisoned");
        let ttl = self.ttl;
        guard.retain(|_, entry| entry.inserted_at.elapsed() < ttl);
        guard.insert(
            query.to_string(),
            CacheEntry {
                inserted_at: Instant::now(),
                result,
            },
        );
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.inner.lock().expect("result cache mutex poisoned").len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_with_flag(cached: bool) -> CombinedResult {
        CombinedResult {
            posts: vec![],
            articles: vec![],
            social_error: None,
            news_error: None,
            cached,
            error: None,
        }
    }

    #[test]
    fn fresh_entry_is_returned() {
        let cache = ResultCache::with_ttl(Duration::from_secs(60));
        cache.put("rust", result_with_flag(false));
        assert!(cache.get("rust").is_some());
    }

    #[test]
    fn distinct_queries_do_not_share_entries() {
        let cache = ResultCache::with_ttl(Duration::from_secs(60));
        cache.put("rust", result_with_flag(false));
        assert!(cache.get("go").is_none());
    }

    #[test]
    fn entry_expires_after_ttl() {
        let cache = ResultCache::with_ttl(Duration::from_millis(20));
        cache.put("rust", result_with_flag(false));
        std::thread::sleep(Duration::from_millis(60));
        assert!(cache.get("rust").is_none());
    }

    #[test]
    fn put_sweeps_expired_entries() {
        let cache = ResultCache::with_ttl(Duration::from_millis(20));
        cache.put("old-1", result_with_flag(false));
        cache.put("old-2", result_with_flag(false));
        std::thread::sleep(Duration::from_millis(60));
        cache.put("fresh", result_with_flag(false));
        assert_eq!(cache.len(), 1, "expired entries are removed on write");
        assert!(cache.get("fresh").is_some());
    }

    #[test]
    fn put_restarts_the_window() {
        let cache = ResultCache::with_ttl(Duration::from_millis(80));
        cache.put("rust", result_with_flag(false));
        std::thread::sleep(Duration::from_millis(50));
        cache.put("rust", result_with_flag(true));
        std::thread::sleep(Duration::from_millis(50));
        // 100ms after the first put but only 50ms after the second.
        let hit = cache.get("rust").expect("window restarted by second put");
        assert!(hit.cached);
    }
}
