//! Durable Storage Module
//!
//! Named-slot durable storage behind the cache's persistence.
//!
//! Slot content is an opaque serialized snapshot of one cache instance;
//! this layer never inspects it. A missing slot reads as `None`.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use std::fmt::Debug;

use crate::error::Result;

// == Storage Backend ==
/// A durable store addressed by slot name.
pub trait StorageBackend: Send + Sync + Debug {
    /// Reads a slot's content, or `None` if the slot does not exist.
    fn read_slot(&self, name: &str) -> Result<Option<String>>;

    /// Writes a slot's content, replacing anything previously stored.
    fn write_slot(&self, name: &str, content: &str) -> Result<()>;
}
