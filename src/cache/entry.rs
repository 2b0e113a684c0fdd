//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with their storage timestamp.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// == Cache Entry ==
/// A single cached payload and the time it was stored.
///
/// Entries carry no expiry of their own; the owning cache applies one max
/// age to every entry. Both fields round-trip through serde so a reloaded
/// snapshot reproduces identical expiry behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The cached payload
    pub value: Value,
    /// Storage timestamp (Unix milliseconds)
    pub stored_at: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with the current time.
    pub fn new(value: Value) -> Self {
        Self {
            value,
            stored_at: current_timestamp_ms(),
        }
    }

    // == Is Expired ==
    /// Checks whether the entry is older than `max_age_ms`.
    ///
    /// Boundary condition: an entry aged exactly `max_age_ms` is still
    /// fresh; expiry requires the age to exceed the max age.
    pub fn is_expired(&self, max_age_ms: u64) -> bool {
        self.is_expired_at(current_timestamp_ms(), max_age_ms)
    }

    /// Expiry check against an explicit clock reading.
    pub fn is_expired_at(&self, now_ms: u64, max_age_ms: u64) -> bool {
        now_ms.saturating_sub(self.stored_at) > max_age_ms
    }

    // == Age ==
    /// Milliseconds elapsed since the entry was stored.
    pub fn age_ms(&self) -> u64 {
        current_timestamp_ms().saturating_sub(self.stored_at)
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    Utc::now().timestamp_millis() as u64
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entry_creation_stamps_now() {
        let before = current_timestamp_ms();
        let entry = CacheEntry::new(json!("payload"));
        let after = current_timestamp_ms();

        assert_eq!(entry.value, json!("payload"));
        assert!(entry.stored_at >= before && entry.stored_at <= after);
    }

    #[test]
    fn test_fresh_entry_not_expired() {
        let entry = CacheEntry::new(json!({"id": 1}));
        assert!(!entry.is_expired(1_000));
    }

    #[test]
    fn test_expiry_boundary_is_strict() {
        let entry = CacheEntry {
            value: json!(null),
            stored_at: 10_000,
        };

        // Aged exactly max_age: still fresh
        assert!(!entry.is_expired_at(11_000, 1_000));
        // One millisecond past: expired
        assert!(entry.is_expired_at(11_001, 1_000));
    }

    #[test]
    fn test_clock_behind_stored_at() {
        // A snapshot written by a later clock must not underflow
        let entry = CacheEntry {
            value: json!(null),
            stored_at: 5_000,
        };
        assert!(!entry.is_expired_at(4_000, 1_000));
    }

    #[test]
    fn test_entry_serde_roundtrip_preserves_timestamp() {
        let entry = CacheEntry {
            value: json!({"episodes": [1, 2, 3]}),
            stored_at: 1_700_000_000_123,
        };

        let encoded = serde_json::to_string(&entry).unwrap();
        let decoded: CacheEntry = serde_json::from_str(&encoded).unwrap();

        assert_eq!(decoded, entry);
    }
}
