//! State management and caching data structures.
//!
//! The resolver state is cached between invocations so that each command picks up
//! the navigation where the previous one left it.
//!
//! # Public API
//! - [`ResolverState`]: path, loaded option sets, file list and preview
//! - [`StateCache`]: resolver state plus the catalog it belongs to and a timestamp
//! - [`save_state`] / [`load_state`]: JSON persistence in the cache directory
//!
//! # Cache Strategy
//! - **JSON serialization**: Human-readable cache files for debugging
//! - **Timestamping**: Track when the selection last changed
//! - **Catalog isolation**: Separate cache per API base URL

use crate::core::dirs::get_cache_directory;
use crate::core::error::{NavigatorError, Result};
use crate::core::option_set::OptionSet;
use crate::core::records::{CatalogEntry, PreviewResult};
use crate::core::selection::SelectionPath;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::SystemTime;

const STATE_FILE: &str = "selection.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolverState {
    pub path: SelectionPath,
    /// Option sets indexed by level, `None` where not loaded
    pub options: Vec<Option<OptionSet>>,
    pub files: Option<Vec<CatalogEntry>>,
    pub preview: Option<PreviewResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateCache {
    pub selection: ResolverState,
    pub last_updated: SystemTime,
    pub api_base_url: String,
}

impl StateCache {
    pub fn new(api_base_url: impl Into<String>, selection: ResolverState) -> Self {
        Self {
            selection,
            last_updated: SystemTime::now(),
            api_base_url: api_base_url.into(),
        }
    }
}

/// Cache directory for one catalog, keyed by a hash of its base URL
pub fn get_cache_dir(api_base_url: &str) -> Result<PathBuf> {
    let catalog_hash = format!("{:x}", md5::compute(api_base_url.as_bytes()));
    log::debug!("get_cache_dir: api_base_url = {api_base_url:?}, hash = {catalog_hash}");
    Ok(get_cache_directory()?.join(catalog_hash))
}

pub fn save_state(cache: &StateCache) -> Result<()> {
    log::debug!(
        "Saving selection '{}' to cache",
        cache.selection.path.breadcrumb()
    );

    let cache_dir = get_cache_dir(&cache.api_base_url)?;
    if let Err(e) = fs::create_dir_all(&cache_dir) {
        log::warn!(
            "Failed to create cache directory '{}': {}",
            cache_dir.display(),
            e
        );
        return Err(NavigatorError::cache_directory_creation_failed(
            &cache_dir, e,
        ));
    }

    let cache_file = cache_dir.join(STATE_FILE);
    let json = serde_json::to_string_pretty(cache).map_err(|e| {
        log::error!("Failed to serialize cache data: {e}");
        NavigatorError::cache_serialization_failed(e)
    })?;

    if let Err(e) = fs::write(&cache_file, json) {
        log::warn!(
            "Failed to write cache file '{}': {}",
            cache_file.display(),
            e
        );
        return Err(NavigatorError::cache_write_failed(&cache_file, e));
    }

    log::debug!("Cache written to {}", cache_file.display());
    Ok(())
}

/// Load the cached state for a catalog; `None` when nothing was cached yet
pub fn load_state(api_base_url: &str) -> Result<Option<StateCache>> {
    let cache_file = get_cache_dir(api_base_url)?.join(STATE_FILE);
    log::debug!("Looking for cache file: {}", cache_file.display());

    if !cache_file.exists() {
        log::debug!("Cache file does not exist: {}", cache_file.display());
        return Ok(None);
    }

    let content = fs::read_to_string(&cache_file).map_err(|e| {
        log::warn!(
            "Failed to read cache file '{}': {}",
            cache_file.display(),
            e
        );
        NavigatorError::cache_read_failed(&cache_file, e)
    })?;

    let cache: StateCache = serde_json::from_str(&content).map_err(|e| {
        log::warn!(
            "Failed to parse cache file '{}': {}",
            cache_file.display(),
            e
        );
        NavigatorError::cache_parse_failed(&cache_file, e)
    })?;

    log::debug!(
        "Loaded selection '{}' from cache",
        cache.selection.path.breadcrumb()
    );
    Ok(Some(cache))
}
