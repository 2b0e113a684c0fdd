//! Catalog Cache - a client-side response cache
//!
//! Bounded LRU capacity, time-based expiry, per-category persistence, and
//! a fetch-through dispatch layer over a pluggable data provider.

pub mod cache;
pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod storage;

pub use client::{CatalogClient, SearchFilters};
pub use config::Config;
pub use dispatch::{Dispatcher, ProviderOperation, ResponseEnvelope, SharedCache};
pub use error::{Error, Result};
