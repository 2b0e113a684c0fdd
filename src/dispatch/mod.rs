//! Dispatch Module
//!
//! The fetch-through layer. A hit returns the cached payload without
//! touching the provider; a miss invokes the registered provider operation,
//! validates its envelope, stores the payload and returns it.

mod envelope;

pub use envelope::{Outcome, ResponseEnvelope};

use std::collections::{BTreeMap, HashMap};
use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::CacheStore;
use crate::error::{Error, Result};

// == Shared Cache ==
/// A cache store shared between concurrent callers.
///
/// Both `get` and `set` mutate recency, and the capacity invariant needs
/// the read-modify-write plus flush to run as a critical section, so each
/// takes the write guard. The guard is never held across a provider call.
pub type SharedCache = Arc<RwLock<CacheStore>>;

/// Wraps a store for shared use.
pub fn shared(store: CacheStore) -> SharedCache {
    Arc::new(RwLock::new(store))
}

// == Parameters ==
/// Operation parameters, canonically ordered by name.
pub type Params = BTreeMap<String, String>;

// == Provider Operation ==
/// One backend operation behind the provider capability interface.
///
/// Implementations do the actual remote work; this layer inspects nothing
/// beyond the returned envelope. An `Err` is normalized to a provider
/// error by the dispatcher, so nothing propagates raw.
#[async_trait]
pub trait ProviderOperation: Send + Sync + Debug {
    async fn call(&self, params: &Params) -> anyhow::Result<ResponseEnvelope>;
}

// == Dispatcher ==
/// Operation registry plus the fetch-through algorithm.
#[derive(Debug, Default)]
pub struct Dispatcher {
    operations: HashMap<String, Arc<dyn ProviderOperation>>,
}

impl Dispatcher {
    /// Creates a dispatcher with an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an operation under `name`, replacing any previous one.
    pub fn register(&mut self, name: impl Into<String>, operation: Arc<dyn ProviderOperation>) {
        self.operations.insert(name.into(), operation);
    }

    /// Whether an operation name is registered.
    pub fn knows(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    // == Dispatch ==
    /// Fetches the value for `key`, invoking the provider only on a miss.
    ///
    /// The cache lookup runs to completion before any await point, so a
    /// slow provider never blocks it. Misses for the same key are not
    /// joined: concurrent callers may each invoke the provider, and the
    /// last store wins. An unregistered operation name is a configuration
    /// defect reported as a provider error.
    pub async fn dispatch(
        &self,
        operation: &str,
        params: &Params,
        cache: &SharedCache,
        key: &str,
    ) -> Result<Value> {
        if let Some(value) = cache.write().await.get(key) {
            debug!("Cache hit for '{}'", key);
            return Ok(value);
        }

        let op = self
            .operations
            .get(operation)
            .ok_or_else(|| Error::Provider(format!("unknown operation: {}", operation)))?;

        debug!("Cache miss for '{}', invoking operation '{}'", key, operation);
        let envelope = op
            .call(params)
            .await
            .map_err(|err| Error::Provider(err.to_string()))?;

        match envelope.into_outcome()? {
            Outcome::Success { payload } => {
                cache.write().await.set(key, payload.clone());
                Ok(payload)
            }
            Outcome::Failure { message } => Err(Error::Provider(message)),
        }
    }
}
