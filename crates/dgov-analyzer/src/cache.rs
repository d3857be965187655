//! # Score Cache
//!
//! Memoizes [`ScoreTree`]s per analyzer instance.
//!
//! ## Keys
//!
//! A key is the company identity plus a *filing discriminant*:
//!
//! - [`CacheKeyStrategy::FilingCount`] (default): the number of filings.
//!   Two calls for the same company with different filing sets of equal
//!   length share an entry. This is the historical keying and is kept as
//!   the default so long-running services return the same scores they
//!   always have.
//! - [`CacheKeyStrategy::ContentDigest`]: SHA-256 over the canonical JSON
//!   of the filing set, order-independent. Any change to a filing yields a
//!   new entry.
//!
//! ## Locking
//!
//! The map sits behind a `parking_lot::Mutex`. Lookups and inserts each hold
//! the lock briefly; scores are computed outside it, so two threads missing
//! on the same key may both compute. Results are identical and the later
//! insert wins. Counters are atomics and never take the lock.
//!
//! ## Capacity
//!
//! Unbounded unless a capacity is configured. When bounded, inserting into a
//! full cache evicts the least recently used entry. A recency index ordered
//! by last-use tick sits under the same lock, so lookups, inserts and
//! evictions are `O(log n)` in the number of entries.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use dgov_core::{sha256_hex, CanonicalBytes, CompanyId, FilingRecord};

use crate::score::ScoreTree;

/// How filings contribute to the cache key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheKeyStrategy {
    #[default]
    FilingCount,
    ContentDigest,
}

impl CacheKeyStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FilingCount => "filing_count",
            Self::ContentDigest => "content_digest",
        }
    }
}

impl std::fmt::Display for CacheKeyStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filing-derived half of a [`CacheKey`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FilingDiscriminant {
    Count(usize),
    /// Hex SHA-256 of the canonical filing set.
    Content(String),
}

/// Cache lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub company_id: Option<CompanyId>,
    pub discriminant: FilingDiscriminant,
}

impl CacheKey {
    /// Build the key for a company and its filings under `strategy`.
    ///
    /// A filing set that cannot be canonicalized falls back to the count
    /// discriminant. Filings carry no float fields, so this only happens if
    /// the record type changes.
    pub fn new(
        company_id: Option<&CompanyId>,
        filings: &[FilingRecord],
        strategy: CacheKeyStrategy,
    ) -> Self {
        let discriminant = match strategy {
            CacheKeyStrategy::FilingCount => FilingDiscriminant::Count(filings.len()),
            CacheKeyStrategy::ContentDigest => match CanonicalBytes::from_unordered(filings) {
                Ok(bytes) => FilingDiscriminant::Content(sha256_hex(&bytes)),
                Err(e) => {
                    tracing::warn!(error = %e, "filing digest failed, keying on filing count");
                    FilingDiscriminant::Count(filings.len())
                }
            },
        };
        Self {
            company_id: company_id.cloned(),
            discriminant,
        }
    }
}

/// Point-in-time cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
    pub evictions: u64,
}

impl CacheStats {
    /// Fraction of lookups served from the cache, `0.0` before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[derive(Debug)]
struct Entry {
    tree: ScoreTree,
    last_used: u64,
}

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<CacheKey, Entry>,
    /// Keys by last-use tick; the first is the least recently used.
    recency: BTreeMap<u64, CacheKey>,
    tick: u64,
}

impl Inner {
    fn next_tick(&mut self) -> u64 {
        self.tick = self.tick.wrapping_add(1);
        self.tick
    }

    fn touch(&mut self, key: &CacheKey) -> Option<ScoreTree> {
        let tick = self.next_tick();
        let entry = self.entries.get_mut(key)?;
        self.recency.remove(&entry.last_used);
        entry.last_used = tick;
        self.recency.insert(tick, key.clone());
        Some(entry.tree)
    }

    fn store(&mut self, key: CacheKey, tree: ScoreTree) {
        let tick = self.next_tick();
        let entry = Entry {
            tree,
            last_used: tick,
        };
        if let Some(previous) = self.entries.insert(key.clone(), entry) {
            self.recency.remove(&previous.last_used);
        }
        self.recency.insert(tick, key);
    }

    fn evict_oldest(&mut self) -> bool {
        match self.recency.pop_first() {
            Some((_, key)) => self.entries.remove(&key).is_some(),
            None => false,
        }
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.recency.clear();
    }
}

/// Thread-safe memo of computed score trees.
#[derive(Debug)]
pub struct ScoreCache {
    inner: Mutex<Inner>,
    capacity: Option<usize>,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl ScoreCache {
    /// An unbounded cache.
    pub fn new() -> Self {
        Self::with_capacity(None)
    }

    /// A cache holding at most `capacity` entries, or unbounded for `None`.
    pub fn with_capacity(capacity: Option<usize>) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            capacity,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    /// Look up a tree, recording a hit or a miss.
    pub fn get(&self, key: &CacheKey) -> Option<ScoreTree> {
        let found = self.inner.lock().touch(key);
        let counter = if found.is_some() { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::Relaxed);
        found
    }

    /// Look up a tree without touching counters or recency.
    pub fn peek(&self, key: &CacheKey) -> Option<ScoreTree> {
        self.inner.lock().entries.get(key).map(|entry| entry.tree)
    }

    /// Store a tree, evicting the least recently used entry when full.
    pub fn insert(&self, key: CacheKey, tree: ScoreTree) {
        let mut inner = self.inner.lock();
        if let Some(capacity) = self.capacity {
            while !inner.entries.contains_key(&key) && inner.entries.len() >= capacity {
                if !inner.evict_oldest() {
                    break;
                }
                self.evictions.fetch_add(1, Ordering::Relaxed);
            }
        }
        inner.store(key, tree);
    }

    /// Number of cached trees.
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Configured entry limit, `None` when unbounded.
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Drop every entry. Counters are kept.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }
}

impl Default for ScoreCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::{Iso27001Scores, Iso27017Scores, PolicyScores, Soc2Scores};

    fn tree(v: u8) -> ScoreTree {
        ScoreTree {
            iso27001: Iso27001Scores {
                access_control: v,
                information_security: v,
                operations_security: v,
            },
            iso27017: Iso27017Scores {
                cloud_access_control: v,
                virtual_network_security: v,
                cloud_asset_management: v,
            },
            soc2: Soc2Scores {
                security: v,
                availability: v,
                processing_integrity: v,
                confidentiality: v,
                privacy: v,
            },
            policies: PolicyScores {
                privacy_policy: v,
                security_policy: v,
                data_handling_policy: v,
            },
        }
    }

    fn key(id: i64, count: usize) -> CacheKey {
        CacheKey {
            company_id: Some(CompanyId::from(id)),
            discriminant: FilingDiscriminant::Count(count),
        }
    }

    #[test]
    fn miss_then_hit() {
        let cache = ScoreCache::new();
        assert_eq!(cache.get(&key(1, 0)), None);
        cache.insert(key(1, 0), tree(60));
        assert_eq!(cache.get(&key(1, 0)), Some(tree(60)));

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.hit_rate(), 0.5);
    }

    #[test]
    fn count_key_ignores_filing_contents() {
        let a = vec![FilingRecord::new(2020)];
        let b = vec![FilingRecord::new(2025).with_pdf_url("p")];
        let id = CompanyId::from(7_i64);
        assert_eq!(
            CacheKey::new(Some(&id), &a, CacheKeyStrategy::FilingCount),
            CacheKey::new(Some(&id), &b, CacheKeyStrategy::FilingCount)
        );
    }

    #[test]
    fn digest_key_tracks_contents_not_order() {
        let id = CompanyId::from(7_i64);
        let a = vec![FilingRecord::new(2020), FilingRecord::new(2021)];
        let reversed = vec![FilingRecord::new(2021), FilingRecord::new(2020)];
        let changed = vec![FilingRecord::new(2020), FilingRecord::new(2022)];

        let k = |f: &[FilingRecord]| CacheKey::new(Some(&id), f, CacheKeyStrategy::ContentDigest);
        assert_eq!(k(&a), k(&reversed));
        assert_ne!(k(&a), k(&changed));
        assert!(matches!(k(&a).discriminant, FilingDiscriminant::Content(ref h) if h.len() == 64));
    }

    #[test]
    fn numeric_and_text_ids_are_distinct() {
        let numeric = CacheKey::new(Some(&CompanyId::from(7_i64)), &[], CacheKeyStrategy::FilingCount);
        let text = CacheKey::new(Some(&CompanyId::from("7")), &[], CacheKeyStrategy::FilingCount);
        assert_ne!(numeric, text);
    }

    #[test]
    fn missing_ids_share_a_key() {
        let a = CacheKey::new(None, &[], CacheKeyStrategy::FilingCount);
        let b = CacheKey::new(None, &[], CacheKeyStrategy::FilingCount);
        assert_eq!(a, b);
    }

    #[test]
    fn bounded_cache_evicts_least_recently_used() {
        let cache = ScoreCache::with_capacity(Some(2));
        cache.insert(key(1, 0), tree(61));
        cache.insert(key(2, 0), tree(62));
        // Touch 1 so 2 becomes the oldest.
        assert!(cache.get(&key(1, 0)).is_some());
        cache.insert(key(3, 0), tree(63));

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.peek(&key(2, 0)), None);
        assert_eq!(cache.peek(&key(1, 0)), Some(tree(61)));
        assert_eq!(cache.peek(&key(3, 0)), Some(tree(63)));
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn eviction_follows_recency_across_many_inserts() {
        let cache = ScoreCache::with_capacity(Some(3));
        assert_eq!(cache.capacity(), Some(3));
        for id in 1..=3 {
            cache.insert(key(id, 0), tree(60));
        }
        assert!(cache.get(&key(1, 0)).is_some());
        cache.insert(key(4, 0), tree(64));
        cache.insert(key(5, 0), tree(65));

        for id in [2, 3] {
            assert_eq!(cache.peek(&key(id, 0)), None, "{id}");
        }
        for id in [1, 4, 5] {
            assert!(cache.peek(&key(id, 0)).is_some(), "{id}");
        }
        assert_eq!(cache.stats().evictions, 2);
    }

    #[test]
    fn recency_index_matches_entries() {
        let cache = ScoreCache::with_capacity(Some(4));
        for round in 0..50_i64 {
            cache.insert(key(round % 7, 0), tree(60));
            let _ = cache.get(&key((round * 3) % 7, 0));
            // Re-insert over an existing key must not leave a stale tick.
            cache.insert(key(round % 7, 0), tree(61));
        }
        let inner = cache.inner.lock();
        assert_eq!(inner.recency.len(), inner.entries.len());
        assert!(inner.entries.len() <= 4);
        for (tick, k) in &inner.recency {
            assert_eq!(inner.entries[k].last_used, *tick);
        }
        drop(inner);

        cache.clear();
        assert!(cache.inner.lock().recency.is_empty());
    }

    #[test]
    fn reinserting_existing_key_does_not_evict() {
        let cache = ScoreCache::with_capacity(Some(1));
        cache.insert(key(1, 0), tree(61));
        cache.insert(key(1, 0), tree(70));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.peek(&key(1, 0)), Some(tree(70)));
        assert_eq!(cache.stats().evictions, 0);
    }

    #[test]
    fn zero_capacity_still_stores_latest() {
        // Validation rejects zero; the cache itself degrades to one slot.
        let cache = ScoreCache::with_capacity(Some(0));
        cache.insert(key(1, 0), tree(61));
        cache.insert(key(2, 0), tree(62));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn clear_keeps_counters() {
        let cache = ScoreCache::new();
        cache.insert(key(1, 0), tree(61));
        let _ = cache.get(&key(1, 0));
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn strategy_serde_names() {
        for s in [CacheKeyStrategy::FilingCount, CacheKeyStrategy::ContentDigest] {
            assert_eq!(serde_json::to_string(&s).unwrap(), format!("\"{}\"", s.as_str()));
        }
    }
}
