//! Catalog Client Module
//!
//! Typed fetch-through entry points over the dispatcher, with one cache
//! instance per data category. The client is built once per session and
//! injected where needed; category caches never share entries.

use std::sync::Arc;

use serde_json::Value;

use crate::cache::{make_key, params_to_parts, CacheStore};
use crate::config::Config;
use crate::dispatch::{shared, Dispatcher, Params, SharedCache};
use crate::error::Result;
use crate::storage::StorageBackend;

// == Operation Names ==
pub const OP_SEARCH: &str = "search";
pub const OP_METADATA: &str = "metadata";
pub const OP_EPISODES: &str = "episodes";
pub const OP_SERVERS: &str = "servers";
pub const OP_SOURCES: &str = "sources";
pub const OP_RECENT: &str = "recent";

/// Upstream source used when the caller does not name one.
pub const DEFAULT_SOURCE: &str = "primary";

// == Search Filters ==
/// Optional search refinements. Absent fields contribute no parameters, so
/// two filter sets with the same present fields produce the same cache key.
#[derive(Debug, Clone, Default)]
pub struct SearchFilters {
    /// Catalog entry kind (series, movie, ...)
    pub kind: Option<String>,
    /// Release season
    pub season: Option<String>,
    /// Release format
    pub format: Option<String>,
    /// Release year
    pub year: Option<String>,
    /// Airing status
    pub status: Option<String>,
    /// Sort criteria, applied in order
    pub sort: Option<Vec<String>>,
    /// Genre filter, all must match
    pub genres: Option<Vec<String>>,
}

impl SearchFilters {
    /// Folds present fields into the parameter map. List-valued filters are
    /// JSON-encoded so they stay single parameters.
    fn apply(&self, params: &mut Params) {
        if let Some(kind) = &self.kind {
            params.insert("kind".to_string(), kind.clone());
        }
        if let Some(season) = &self.season {
            params.insert("season".to_string(), season.clone());
        }
        if let Some(format) = &self.format {
            params.insert("format".to_string(), format.clone());
        }
        if let Some(year) = &self.year {
            params.insert("year".to_string(), year.clone());
        }
        if let Some(status) = &self.status {
            params.insert("status".to_string(), status.clone());
        }
        if let Some(sort) = &self.sort {
            params.insert("sort".to_string(), Value::from(sort.clone()).to_string());
        }
        if let Some(genres) = &self.genres {
            params.insert("genres".to_string(), Value::from(genres.clone()).to_string());
        }
    }
}

// == Catalog Client ==
/// Category caches plus the operation registry, one instance per session.
#[derive(Debug)]
pub struct CatalogClient {
    dispatcher: Dispatcher,
    search: SharedCache,
    metadata: SharedCache,
    episodes: SharedCache,
    servers: SharedCache,
    sources: SharedCache,
    recent: SharedCache,
}

impl CatalogClient {
    // == Constructor ==
    /// Builds the client: one persistent cache per category over a shared
    /// storage backend, plus the dispatcher carrying the registered
    /// operations.
    pub fn new(config: &Config, storage: Arc<dyn StorageBackend>, dispatcher: Dispatcher) -> Self {
        let cache = |slot: &str| {
            shared(CacheStore::new(
                config.capacity,
                config.max_age_ms,
                slot,
                Arc::clone(&storage),
            ))
        };

        Self {
            dispatcher,
            search: cache("search"),
            metadata: cache("metadata"),
            episodes: cache("episodes"),
            servers: cache("servers"),
            sources: cache("sources"),
            recent: cache("recent"),
        }
    }

    // == Search ==
    /// Searches the catalog. An empty query lists by filters alone.
    pub async fn search(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
        filters: &SearchFilters,
    ) -> Result<Value> {
        let mut params = Params::new();
        if !query.is_empty() {
            params.insert("query".to_string(), query.to_string());
        }
        params.insert("page".to_string(), page.to_string());
        params.insert("perPage".to_string(), per_page.to_string());
        filters.apply(&mut params);

        let key = make_key(OP_SEARCH, params_to_parts(&params));
        self.dispatcher
            .dispatch(OP_SEARCH, &params, &self.search, &key)
            .await
    }

    // == Metadata ==
    /// Full metadata for one title.
    pub async fn title_metadata(&self, id: &str, source: Option<&str>) -> Result<Value> {
        let source = source.unwrap_or(DEFAULT_SOURCE);
        let mut params = Params::new();
        params.insert("id".to_string(), id.to_string());
        params.insert("source".to_string(), source.to_string());

        let key = make_key(OP_METADATA, [id, source]);
        self.dispatcher
            .dispatch(OP_METADATA, &params, &self.metadata, &key)
            .await
    }

    // == Episodes ==
    /// Episode list for one title. Dubbed and subbed lists cache separately.
    pub async fn episodes(&self, id: &str, source: Option<&str>, dub: bool) -> Result<Value> {
        let source = source.unwrap_or(DEFAULT_SOURCE);
        let audio = if dub { "dub" } else { "sub" };
        let mut params = Params::new();
        params.insert("id".to_string(), id.to_string());
        params.insert("dub".to_string(), dub.to_string());

        let key = make_key(OP_EPISODES, [id, source, audio]);
        self.dispatcher
            .dispatch(OP_EPISODES, &params, &self.episodes, &key)
            .await
    }

    // == Servers ==
    /// Hosting servers for one episode.
    pub async fn episode_servers(&self, episode_id: &str) -> Result<Value> {
        let mut params = Params::new();
        params.insert("id".to_string(), episode_id.to_string());

        let key = make_key(OP_SERVERS, [episode_id]);
        self.dispatcher
            .dispatch(OP_SERVERS, &params, &self.servers, &key)
            .await
    }

    // == Sources ==
    /// Streaming sources for one episode.
    pub async fn streaming_sources(&self, episode_id: &str) -> Result<Value> {
        let mut params = Params::new();
        params.insert("episodeId".to_string(), episode_id.to_string());

        let key = make_key(OP_SOURCES, [episode_id]);
        self.dispatcher
            .dispatch(OP_SOURCES, &params, &self.sources, &key)
            .await
    }

    // == Recent ==
    /// Recently released episodes, paged.
    pub async fn recent_episodes(
        &self,
        page: u32,
        per_page: u32,
        source: Option<&str>,
    ) -> Result<Value> {
        let source = source.unwrap_or(DEFAULT_SOURCE);
        let mut params = Params::new();
        params.insert("page".to_string(), page.to_string());
        params.insert("perPage".to_string(), per_page.to_string());

        let key = make_key(
            OP_RECENT,
            [page.to_string(), per_page.to_string(), source.to_string()],
        );
        self.dispatcher
            .dispatch(OP_RECENT, &params, &self.recent, &key)
            .await
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_apply_only_present_fields() {
        let filters = SearchFilters {
            season: Some("WINTER".to_string()),
            year: Some("2024".to_string()),
            ..Default::default()
        };

        let mut params = Params::new();
        filters.apply(&mut params);

        assert_eq!(params.len(), 2);
        assert_eq!(params.get("season").map(String::as_str), Some("WINTER"));
        assert_eq!(params.get("year").map(String::as_str), Some("2024"));
        assert!(!params.contains_key("genres"));
    }

    #[test]
    fn test_list_filters_encode_as_json_arrays() {
        let filters = SearchFilters {
            sort: Some(vec!["SCORE_DESC".to_string()]),
            genres: Some(vec!["Action".to_string(), "Drama".to_string()]),
            ..Default::default()
        };

        let mut params = Params::new();
        filters.apply(&mut params);

        assert_eq!(params.get("sort").map(String::as_str), Some(r#"["SCORE_DESC"]"#));
        assert_eq!(
            params.get("genres").map(String::as_str),
            Some(r#"["Action","Drama"]"#)
        );
    }

    #[test]
    fn test_insertion_order_does_not_change_the_key() {
        let filters = SearchFilters {
            kind: Some("series".to_string()),
            status: Some("RELEASING".to_string()),
            ..Default::default()
        };

        // Filters folded in before the paging parameters
        let mut early = Params::new();
        filters.apply(&mut early);
        early.insert("page".to_string(), "1".to_string());
        early.insert("perPage".to_string(), "20".to_string());

        // Filters folded in after the paging parameters
        let mut late = Params::new();
        late.insert("perPage".to_string(), "20".to_string());
        late.insert("page".to_string(), "1".to_string());
        filters.apply(&mut late);

        assert_eq!(
            make_key(OP_SEARCH, params_to_parts(&early)),
            make_key(OP_SEARCH, params_to_parts(&late))
        );
    }
}
