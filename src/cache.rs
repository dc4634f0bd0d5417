use crate::buckets::BucketId;
use crate::scoring::HintCandidate;
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

/// Number of leading note characters that distinguish cache entries.
pub const NOTE_PREFIX_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub bucket: BucketId,
    pub fingerprint: String,
}

impl CacheKey {
    pub fn new(bucket: BucketId, note: &str) -> Self {
        let prefix: String = note.chars().take(NOTE_PREFIX_CHARS).collect();
        let mut hasher = Sha256::new();
        hasher.update(prefix.trim().to_lowercase().as_bytes());
        let hash = hex::encode(hasher.finalize());
        Self {
            bucket,
            fingerprint: hash[..16].to_string(),
        }
    }
}

/// Advisory store for gathered hint candidates. A miss is never an error.
#[async_trait]
pub trait HintCache: Send + Sync {
    async fn get(&self, key: &CacheKey) -> Option<Vec<HintCandidate>>;

    async fn put(&self, key: CacheKey, candidates: Vec<HintCandidate>, ttl: Duration);

    async fn clear(&self);
}

struct CachedCandidates {
    expires_at: Instant,
    candidates: Vec<HintCandidate>,
}

/// Process-local cache; concurrent writers to one key resolve last-write-wins.
#[derive(Default)]
pub struct MemoryHintCache {
    entries: RwLock<HashMap<CacheKey, CachedCandidates>>,
}

impl MemoryHintCache {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[async_trait]
impl HintCache for MemoryHintCache {
    async fn get(&self, key: &CacheKey) -> Option<Vec<HintCandidate>> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(cached) if cached.expires_at > now => {
                    debug!(bucket = key.bucket.as_str(), "hint cache hit");
                    return Some(cached.candidates.clone());
                }
                None => {
                    debug!(bucket = key.bucket.as_str(), "hint cache miss");
                    return None;
                }
                Some(_) => {}
            }
        }

        debug!(bucket = key.bucket.as_str(), "hint cache entry expired");
        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|cached| cached.expires_at <= now) {
            entries.remove(key);
        }
        None
    }

    async fn put(&self, key: CacheKey, candidates: Vec<HintCandidate>, ttl: Duration) {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, cached| cached.expires_at > now);
        if entries.len() < before {
            debug!(evicted = before - entries.len(), "hint cache expired entries dropped");
        }
        entries.insert(
            key,
            CachedCandidates {
                expires_at: now + ttl,
                candidates,
            },
        );
    }

    async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn candidates() -> Vec<HintCandidate> {
        vec![HintCandidate {
            text: "Keep going.".to_string(),
            attribution: "Someone".to_string(),
            source: None,
            url: None,
            relevance: 0.0,
        }]
    }

    #[test]
    fn key_uses_only_note_prefix() {
        let base = "a".repeat(NOTE_PREFIX_CHARS);
        let a = CacheKey::new(BucketId::Low, &format!("{base} first ending"));
        let b = CacheKey::new(BucketId::Low, &format!("{base} second ending"));
        assert_eq!(a, b);
        assert_ne!(a, CacheKey::new(BucketId::Good, &base));
        assert_ne!(a, CacheKey::new(BucketId::Low, "different"));
    }

    #[tokio::test(start_paused = true)]
    async fn entries_expire_after_ttl() {
        let cache = MemoryHintCache::new();
        let key = CacheKey::new(BucketId::Neutral, "note");
        cache
            .put(key.clone(), candidates(), Duration::from_secs(60))
            .await;

        assert_eq!(cache.get(&key).await, Some(candidates()));

        tokio::time::advance(Duration::from_secs(61)).await;
        assert_eq!(cache.get(&key).await, None);
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn put_drops_expired_entries_for_other_keys() {
        let cache = MemoryHintCache::new();
        for i in 0..100 {
            let key = CacheKey::new(BucketId::Low, &format!("note {i}"));
            cache.put(key, candidates(), Duration::from_secs(1)).await;
        }
        assert_eq!(cache.len().await, 100);

        tokio::time::advance(Duration::from_secs(3600)).await;
        let fresh = CacheKey::new(BucketId::Good, "fresh note");
        cache
            .put(fresh.clone(), candidates(), Duration::from_secs(60))
            .await;

        assert_eq!(cache.len().await, 1);
        assert_eq!(cache.get(&fresh).await, Some(candidates()));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_writers_to_one_key_leave_a_single_entry() {
        let cache = Arc::new(MemoryHintCache::new());
        let key = CacheKey::new(BucketId::Neutral, "shared note");
        let writers = ["a", "b", "c", "d", "e", "f", "g", "h"];

        let mut handles = Vec::new();
        for attribution in writers {
            let cache = Arc::clone(&cache);
            let key = key.clone();
            handles.push(tokio::spawn(async move {
                let mut values = candidates();
                values[0].attribution = attribution.to_string();
                cache.put(key.clone(), values, Duration::from_secs(60)).await;
                cache.get(&key).await
            }));
        }
        for handle in handles {
            assert!(handle.await.unwrap().is_some());
        }

        assert_eq!(cache.len().await, 1);
        let stored = cache.get(&key).await.unwrap();
        assert!(writers.contains(&stored[0].attribution.as_str()));
    }

    #[tokio::test]
    async fn clear_drops_everything() {
        let cache = MemoryHintCache::new();
        cache
            .put(
                CacheKey::new(BucketId::Great, ""),
                candidates(),
                Duration::from_secs(60),
            )
            .await;
        cache.clear().await;
        assert_eq!(cache.len().await, 0);
    }
}
