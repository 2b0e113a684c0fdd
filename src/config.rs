//! Configuration Module
//!
//! Cache configuration from environment variables with defaults.

use std::env;
use std::path::PathBuf;

/// Cache configuration shared by every category cache.
///
/// All values can be set via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum entries per category cache
    pub capacity: usize,
    /// Entry max age in milliseconds
    pub max_age_ms: u64,
    /// Directory holding the durable cache slots
    pub storage_dir: PathBuf,
}

impl Config {
    /// Creates a Config from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Entries per category cache (default: 20)
    /// - `CACHE_MAX_AGE_MS` - Max entry age in ms (default: 86400000, 24 hours)
    /// - `CACHE_STORAGE_DIR` - Slot directory (default: .catalog-cache)
    pub fn from_env() -> Self {
        Self {
            capacity: env::var("CACHE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(20),
            max_age_ms: env::var("CACHE_MAX_AGE_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(24 * 60 * 60 * 1000),
            storage_dir: env::var("CACHE_STORAGE_DIR")
                .ok()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".catalog-cache")),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: 20,
            max_age_ms: 24 * 60 * 60 * 1000,
            storage_dir: PathBuf::from(".catalog-cache"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.capacity, 20);
        assert_eq!(config.max_age_ms, 86_400_000);
        assert_eq!(config.storage_dir, PathBuf::from(".catalog-cache"));
    }

    #[test]
    fn test_config_from_env_defaults() {
        env::remove_var("CACHE_CAPACITY");
        env::remove_var("CACHE_MAX_AGE_MS");
        env::remove_var("CACHE_STORAGE_DIR");

        let config = Config::from_env();
        assert_eq!(config.capacity, 20);
        assert_eq!(config.max_age_ms, 86_400_000);
    }
}
