//! File Storage Module
//!
//! Stores each slot as a JSON file under a base directory.

use std::fs;
use std::path::PathBuf;

use super::StorageBackend;
use crate::error::Result;

// == File Storage ==
/// One file per slot, named `<slot>.json`, under a directory created on
/// demand.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Creates a file storage rooted at `dir`, creating the directory if it
    /// does not exist yet.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Maps a slot name to its file path.
    ///
    /// Slot names are caller-controlled identifiers; anything outside
    /// `[A-Za-z0-9_-]` is replaced so a name can never escape the base
    /// directory.
    fn slot_path(&self, name: &str) -> PathBuf {
        let file: String = name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.json", file))
    }
}

impl StorageBackend for FileStorage {
    fn read_slot(&self, name: &str) -> Result<Option<String>> {
        let path = self.slot_path(name);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn write_slot(&self, name: &str, content: &str) -> Result<()> {
        fs::write(self.slot_path(name), content)?;
        Ok(())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_slot_reads_none() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();

        assert!(storage.read_slot("search").unwrap().is_none());
    }

    #[test]
    fn test_write_then_read_roundtrip() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();

        storage.write_slot("episodes", r#"[["k",{"value":1,"stored_at":5}]]"#).unwrap();
        let content = storage.read_slot("episodes").unwrap().unwrap();

        assert_eq!(content, r#"[["k",{"value":1,"stored_at":5}]]"#);
    }

    #[test]
    fn test_overwrite_replaces_content() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();

        storage.write_slot("slot", "first").unwrap();
        storage.write_slot("slot", "second").unwrap();

        assert_eq!(storage.read_slot("slot").unwrap().unwrap(), "second");
    }

    #[test]
    fn test_slot_name_is_sanitized() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();

        storage.write_slot("../escape/attempt", "safe").unwrap();

        // The file lands inside the base directory under a mangled name
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(storage.read_slot("../escape/attempt").unwrap().unwrap(), "safe");
    }

    #[test]
    fn test_creates_base_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("cache").join("slots");

        let storage = FileStorage::new(&nested).unwrap();
        storage.write_slot("sources", "{}").unwrap();

        assert!(nested.join("sources.json").exists());
    }
}
