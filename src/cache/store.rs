//! Cache Store Module
//!
//! The bounded expiring cache: HashMap storage with recency tracking, lazy
//! expiry on read, LRU eviction on write, and snapshot persistence to a
//! durable slot.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::{CacheEntry, CacheStats, RecencyTracker};
use crate::error::Result;
use crate::storage::StorageBackend;

// == Snapshot ==
/// Durable form of one cache instance: `(key, entry)` pairs in recency
/// order, oldest first. Replaying the sequence with `touch` reproduces the
/// recency state exactly.
type Snapshot = Vec<(String, CacheEntry)>;

// == Cache Store ==
/// A capacity-bounded key/value cache with one max age for all entries.
///
/// Invariant after any mutation: `entries.len() == recency.len()`, both at
/// most `capacity`, over the same key set. Capacity and max age are fixed
/// at construction. A zero-capacity store retains nothing and every lookup
/// misses.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Touch order for eviction
    recency: RecencyTracker,
    /// Lookup and eviction counters
    stats: CacheStats,
    /// Maximum number of entries retained
    capacity: usize,
    /// Age beyond which an entry is treated as absent
    max_age_ms: u64,
    /// Durable slot this instance persists to
    slot: String,
    /// Slot storage
    storage: Arc<dyn StorageBackend>,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a store bound to a durable slot and seeds it from any prior
    /// snapshot in that slot.
    ///
    /// A missing, empty or unparseable slot yields an empty cache; storage
    /// problems are logged and never propagate past construction.
    pub fn new(
        capacity: usize,
        max_age_ms: u64,
        slot: impl Into<String>,
        storage: Arc<dyn StorageBackend>,
    ) -> Self {
        let mut store = Self {
            entries: HashMap::new(),
            recency: RecencyTracker::new(),
            stats: CacheStats::new(),
            capacity,
            max_age_ms,
            slot: slot.into(),
            storage,
        };
        store.load();
        store
    }

    // == Load ==
    /// Seeds `entries` and `recency` from the durable slot.
    fn load(&mut self) {
        let snapshot = match self.read_snapshot() {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => return,
            Err(err) => {
                warn!(
                    "Failed to load cache slot '{}', starting empty: {}",
                    self.slot, err
                );
                return;
            }
        };

        // Sequence order defines recency, oldest first. A snapshot written
        // under a larger capacity is truncated oldest-first.
        let overflow = snapshot.len().saturating_sub(self.capacity);
        for (key, entry) in snapshot.into_iter().skip(overflow) {
            self.recency.touch(&key);
            self.entries.insert(key, entry);
        }

        debug!(
            "Cache slot '{}' loaded with {} entries",
            self.slot,
            self.entries.len()
        );
    }

    /// Reads and parses the slot. `None` when the slot is missing or blank.
    fn read_snapshot(&self) -> Result<Option<Snapshot>> {
        let content = match self.storage.read_slot(&self.slot)? {
            Some(content) if !content.trim().is_empty() => content,
            _ => return Ok(None),
        };
        Ok(Some(serde_json::from_str(&content)?))
    }

    // == Get ==
    /// Retrieves a fresh value by key.
    ///
    /// An entry older than the max age is treated as absent: it is removed
    /// from both structures and the lookup counts as a miss (lazy expiry,
    /// no background sweep). A fresh hit moves the key to most recently
    /// used.
    pub fn get(&mut self, key: &str) -> Option<Value> {
        if let Some(entry) = self.entries.get(key) {
            if entry.is_expired(self.max_age_ms) {
                self.entries.remove(key);
                self.recency.remove(key);
                self.stats.record_expiry();
                self.stats.record_miss();
                debug!("Cache entry '{}' passed its max age, removed", key);
                return None;
            }

            let value = entry.value.clone();
            self.recency.touch(key);
            self.stats.record_hit();
            Some(value)
        } else {
            self.stats.record_miss();
            None
        }
    }

    // == Set ==
    /// Stores a value under `key`, stamped with the current time.
    ///
    /// When the store is at capacity and the key is new, the least recently
    /// touched entry is evicted first. The full entry sequence is then
    /// flushed to the durable slot; a flush failure is logged and absorbed,
    /// leaving the in-memory state already updated.
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        // Zero capacity degenerates to a cache that retains nothing.
        if self.capacity == 0 {
            return;
        }

        let key = key.into();
        let is_overwrite = self.entries.contains_key(&key);
        if !is_overwrite && self.entries.len() >= self.capacity {
            if let Some(evicted) = self.recency.pop_oldest() {
                self.entries.remove(&evicted);
                self.stats.record_eviction();
                debug!("Evicted least recently used cache entry '{}'", evicted);
            }
        }

        self.entries.insert(key.clone(), CacheEntry::new(value));
        self.recency.touch(&key);
        self.flush();
    }

    // == Invalidate ==
    /// Removes an entry explicitly. Returns whether anything was removed.
    pub fn invalidate(&mut self, key: &str) -> bool {
        if self.entries.remove(key).is_some() {
            self.recency.remove(key);
            self.flush();
            true
        } else {
            false
        }
    }

    // == Flush ==
    /// Serializes the current entry sequence to the durable slot.
    ///
    /// The in-memory structures are already updated when this runs, so a
    /// failure costs only the durability of this snapshot.
    fn flush(&self) {
        if let Err(err) = self.write_snapshot() {
            warn!("Failed to flush cache slot '{}': {}", self.slot, err);
        }
    }

    fn write_snapshot(&self) -> Result<()> {
        let snapshot: Snapshot = self
            .recency
            .iter_oldest_first()
            .filter_map(|key| {
                self.entries
                    .get(key)
                    .map(|entry| (key.clone(), entry.clone()))
            })
            .collect();

        let content = serde_json::to_string(&snapshot)?;
        self.storage.write_slot(&self.slot, &content)
    }

    // == Accessors ==
    /// Current number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The fixed capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The fixed max age in milliseconds.
    pub fn max_age_ms(&self) -> u64 {
        self.max_age_ms
    }

    /// Current counters.
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    // == Test Support ==
    /// Rewinds an entry's stored-at timestamp to simulate elapsed time.
    #[cfg(test)]
    pub(crate) fn backdate(&mut self, key: &str, ms: u64) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.stored_at = entry.stored_at.saturating_sub(ms);
        }
    }
}
