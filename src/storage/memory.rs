//! Memory Storage Module
//!
//! In-memory slot storage for tests and ephemeral runs.

use std::collections::HashMap;
use std::sync::Mutex;

use super::StorageBackend;
use crate::error::Result;

// == Memory Storage ==
/// A slot map held in memory. Shared across cache instances via `Arc`,
/// which is how tests observe a snapshot surviving a cache rebuild.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Creates an empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates a slot, bypassing the trait. Test setup helper.
    pub fn seed(&self, name: impl Into<String>, content: impl Into<String>) {
        self.slots
            .lock()
            .expect("slot map lock poisoned")
            .insert(name.into(), content.into());
    }
}

impl StorageBackend for MemoryStorage {
    fn read_slot(&self, name: &str) -> Result<Option<String>> {
        let slots = self.slots.lock().expect("slot map lock poisoned");
        Ok(slots.get(name).cloned())
    }

    fn write_slot(&self, name: &str, content: &str) -> Result<()> {
        let mut slots = self.slots.lock().expect("slot map lock poisoned");
        slots.insert(name.to_string(), content.to_string());
        Ok(())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_storage_reads_none() {
        let storage = MemoryStorage::new();
        assert!(storage.read_slot("anything").unwrap().is_none());
    }

    #[test]
    fn test_write_then_read() {
        let storage = MemoryStorage::new();
        storage.write_slot("metadata", "[]").unwrap();
        assert_eq!(storage.read_slot("metadata").unwrap().unwrap(), "[]");
    }

    #[test]
    fn test_slots_are_independent() {
        let storage = MemoryStorage::new();
        storage.write_slot("a", "one").unwrap();
        storage.write_slot("b", "two").unwrap();

        assert_eq!(storage.read_slot("a").unwrap().unwrap(), "one");
        assert_eq!(storage.read_slot("b").unwrap().unwrap(), "two");
    }

    #[test]
    fn test_seed_is_visible_through_trait() {
        let storage = MemoryStorage::new();
        storage.seed("search", "seeded");
        assert_eq!(storage.read_slot("search").unwrap().unwrap(), "seeded");
    }
}
