//! Process-wide, time- and size-bounded cache of synthesized diagrams.
//!
//! The cache is an explicit, constructor-injected service rather than ambient
//! global state: the application creates one at startup and hands it to every
//! render orchestrator. Eviction runs opportunistically at the start of each
//! synthesis attempt; there is no background timer.

use crate::catalog::CloudProvider;
use crate::primitive::{BinaryAsset, DiagramPrimitive};
use rustc_hash::FxHashMap;
use std::time::{Duration, Instant};

pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_MAX_ENTRIES: usize = 10;
pub const DEFAULT_RETAIN_RECENT: usize = 5;

/// Derived deterministically from (proposal title, provider, content hash of
/// the diagram source). Keying by content hash makes a stale attempt's cache
/// write harmless: it can only ever store the correct result for its own
/// source text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub title: String,
    pub provider: CloudProvider,
    pub source_hash: u32,
}

impl CacheKey {
    pub fn new(title: &str, provider: CloudProvider, diagram_source: &str) -> Self {
        Self {
            title: title.to_string(),
            provider,
            source_hash: content_hash(diagram_source),
        }
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}-{:x}", self.title, self.provider, self.source_hash)
    }
}

/// 32-bit string fold (the classic `h = h * 31 + c` shift form). Collisions
/// are tolerable: a collision only makes two sources share a cache slot, and
/// the slot always holds a result that was correct for some source.
pub fn content_hash(s: &str) -> u32 {
    let mut hash: i32 = 0;
    for c in s.chars() {
        hash = (hash << 5).wrapping_sub(hash).wrapping_add(c as i32);
    }
    hash as u32
}

#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub primitives: Vec<DiagramPrimitive>,
    pub assets: Vec<BinaryAsset>,
    last_access: Instant,
}

impl CacheEntry {
    pub fn last_access(&self) -> Instant {
        self.last_access
    }
}

#[derive(Debug)]
pub struct DiagramCache {
    entries: FxHashMap<CacheKey, CacheEntry>,
    ttl: Duration,
    max_entries: usize,
    retain_recent: usize,
}

impl Default for DiagramCache {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagramCache {
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_TTL, DEFAULT_MAX_ENTRIES, DEFAULT_RETAIN_RECENT)
    }

    pub fn with_limits(ttl: Duration, max_entries: usize, retain_recent: usize) -> Self {
        Self {
            entries: FxHashMap::default(),
            ttl,
            max_entries,
            retain_recent,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the cached primitives/assets for `key` and bumps the entry's
    /// access timestamp (content is never refreshed on a hit).
    pub fn get(&mut self, key: &CacheKey) -> Option<&CacheEntry> {
        self.get_at(key, Instant::now())
    }

    /// Inserts or overwrites the entry for `key`, stamped with the current
    /// time. At most one entry exists per key.
    pub fn put(&mut self, key: CacheKey, primitives: Vec<DiagramPrimitive>, assets: Vec<BinaryAsset>) {
        self.put_at(key, primitives, assets, Instant::now());
    }

    /// Removes expired entries, then enforces the capacity bound.
    ///
    /// The expiry pass must run first: it may free enough room that a
    /// just-inserted fresh entry survives the capacity check. When the count
    /// still exceeds `max_entries`, only the `retain_recent` most recently
    /// touched entries are kept.
    pub fn sweep(&mut self) {
        self.sweep_at(Instant::now());
    }

    /// Removes all entries unconditionally (user-triggered reset).
    pub fn clear(&mut self) {
        tracing::debug!(evicted = self.entries.len(), "clearing diagram cache");
        self.entries.clear();
    }

    pub(crate) fn get_at(&mut self, key: &CacheKey, now: Instant) -> Option<&CacheEntry> {
        let entry = self.entries.get_mut(key)?;
        entry.last_access = now;
        Some(&*entry)
    }

    pub(crate) fn put_at(
        &mut self,
        key: CacheKey,
        primitives: Vec<DiagramPrimitive>,
        assets: Vec<BinaryAsset>,
        now: Instant,
    ) {
        self.entries.insert(
            key,
            CacheEntry {
                primitives,
                assets,
                last_access: now,
            },
        );
    }

    pub(crate) fn sweep_at(&mut self, now: Instant) {
        let ttl = self.ttl;
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| now.duration_since(entry.last_access) <= ttl);
        let expired = before - self.entries.len();
        if expired > 0 {
            tracing::debug!(expired, "evicted expired diagram cache entries");
        }

        if self.entries.len() > self.max_entries {
            let mut by_age: Vec<(CacheKey, Instant)> = self
                .entries
                .iter()
                .map(|(k, e)| (k.clone(), e.last_access))
                .collect();
            by_age.sort_by_key(|(_, t)| *t);

            let excess = by_age.len().saturating_sub(self.retain_recent);
            for (key, _) in by_age.into_iter().take(excess) {
                tracing::debug!(key = %key, "evicted excess diagram cache entry");
                self.entries.remove(&key);
            }
        }
    }
}
