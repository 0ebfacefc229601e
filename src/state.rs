//! Shared server state: the selected index and a cache of parsed indexes.
//!
//! Parsed indexes are kept in an LRU keyed by canonical path. Each slot stores
//! the xxh3 digest of the bytes it was parsed from, so a file rewritten by a
//! documentation rebuild is parsed again on next access while an unchanged
//! file is served from memory.

use crate::config::ServerConfig;
use crate::envelope::ScriptVariable;
use crate::error::Result;
use crate::index::SearchIndex;
use anyhow::Context;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use xxhash_rust::xxh3::xxh3_64;

struct CachedIndex {
    /// xxh3 of the raw file contents
    digest: u64,
    index: Arc<SearchIndex>,
}

/// Central coordination point for tool handlers.
pub struct IndexState {
    /// LRU cache of parsed indexes
    cache: RwLock<LruCache<PathBuf, CachedIndex>>,

    /// Index selected by `set_index` or startup detection
    current: RwLock<Option<PathBuf>>,

    /// Default variable for script exports
    variable: ScriptVariable,
}

impl std::fmt::Debug for IndexState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexState")
            .field("cache_size", &self.cache.try_read().map(|c| c.len()).ok())
            .field("current", &self.current.try_read().ok().map(|c| (*c).clone()))
            .field("variable", &self.variable)
            .finish()
    }
}

impl IndexState {
    pub fn new(capacity: NonZeroUsize, variable: ScriptVariable) -> Self {
        Self {
            cache: RwLock::new(LruCache::new(capacity)),
            current: RwLock::new(None),
            variable,
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(config.cache_capacity, config.variable.clone())
    }

    pub const fn default_variable(&self) -> &ScriptVariable {
        &self.variable
    }

    /// Loads an index, reusing the cached parse when the file is unchanged.
    ///
    /// Load failures are returned as [`crate::error::LoadError`] inside the
    /// anyhow error and can be recovered with `downcast_ref`.
    pub async fn load(&self, path: &Path) -> Result<Arc<SearchIndex>> {
        let raw = SearchIndex::read_raw(path).await?;
        let key = tokio::fs::canonicalize(path)
            .await
            .with_context(|| format!("Failed to resolve path {}", path.display()))?;
        let digest = xxh3_64(&raw);

        {
            let mut cache = self.cache.write().await;
            if let Some(cached) = cache.get(&key)
                && cached.digest == digest
            {
                tracing::debug!("Cache hit for {}", key.display());
                return Ok(cached.index.clone());
            }
        }

        let origin = key.display().to_string();
        let start = std::time::Instant::now();
        // Parse in spawn_blocking since large indexes are CPU intensive
        let index = tokio::task::spawn_blocking(move || SearchIndex::parse_bytes(&raw, &origin))
            .await
            .context("Index parsing task panicked")??;
        let index = Arc::new(index);
        tracing::info!(
            "Loaded search index {} ({} entries) in {:?}",
            key.display(),
            index.len(),
            start.elapsed()
        );

        self.cache.write().await.put(
            key,
            CachedIndex {
                digest,
                index: index.clone(),
            },
        );

        Ok(index)
    }

    /// Loads an index and makes it the current selection.
    ///
    /// The selection only changes when loading succeeds.
    pub async fn select(&self, path: &Path) -> Result<(PathBuf, Arc<SearchIndex>)> {
        let index = self.load(path).await?;
        let canonical = tokio::fs::canonicalize(path)
            .await
            .with_context(|| format!("Failed to resolve path {}", path.display()))?;
        *self.current.write().await = Some(canonical.clone());
        Ok((canonical, index))
    }

    pub async fn current_path(&self) -> Option<PathBuf> {
        self.current.read().await.clone()
    }

    /// Returns the current index, re-reading it if the file changed on disk.
    pub async fn current(&self) -> Result<(PathBuf, Arc<SearchIndex>)> {
        let path = self.current_path().await.context(
            "No search index selected. Use set_index with the path to a search_index.js file.",
        )?;
        let index = self.load(&path).await?;
        Ok((path, index))
    }

    pub async fn cached_count(&self) -> usize {
        self.cache.read().await.len()
    }

    pub async fn clear_cache(&self) {
        self.cache.write().await.clear();
    }
}
