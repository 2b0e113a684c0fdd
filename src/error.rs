//! Error types for the catalog cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Error Enum ==
/// Unified error type for the catalog cache.
///
/// Only `Provider` and `Shape` reach dispatch callers. `Storage` and
/// `Snapshot` belong to the persistence layer; the cache store absorbs them
/// (empty cache on a failed read, dropped write with a warning) so they
/// never surface from `get`, `set` or `dispatch`.
#[derive(Error, Debug)]
pub enum Error {
    /// The provider reported a failure, the invocation failed, or the
    /// operation name is not registered
    #[error("Provider error: {0}")]
    Provider(String),

    /// The provider's result carried neither a payload nor an error message
    #[error("Unknown server error")]
    Shape,

    /// Durable slot read or write failed
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Snapshot serialization or parsing failed
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the catalog cache.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_carries_message() {
        let err = Error::Provider("not found".to_string());
        assert_eq!(err.to_string(), "Provider error: not found");
    }

    #[test]
    fn test_shape_error_message() {
        assert_eq!(Error::Shape.to_string(), "Unknown server error");
    }

    #[test]
    fn test_storage_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io.into();
        assert!(matches!(err, Error::Storage(_)));
    }
}
