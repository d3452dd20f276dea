//! Centralized initialization for navigation commands.
//!
//! Every command needs the same setup before it can touch the selection: the
//! configuration, an HTTP client, the region reference table and the resolver
//! restored from the state cache. [`CommandInit`] does that once and hands back a
//! [`CommandContext`].
//!
//! # Initialization Steps
//! 1. **Configuration**: load (or create) the config file and apply overrides
//! 2. **Client**: build the catalog client for the configured base URL
//! 3. **Reference table**: load the region table; an unavailable table leaves the
//!    region levels empty and is reported as a warning
//! 4. **State**: restore the cached selection for this catalog
//! 5. **Forecast types**: load the first level at the root or when it is missing

use crate::core::{
    client::CatalogClient,
    config::NavigatorConfig,
    error::{NavigatorError, Result},
    level::Level,
    output::print_warning,
    reference_table::RegionTable,
    resolver::CatalogResolver,
    state::{load_state, save_state, StateCache},
};
use std::path::PathBuf;
use std::sync::Arc;

/// Per-invocation overrides, from flags or the environment
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub api_base_url: Option<String>,
    pub region_table: Option<String>,
    pub download_dir: Option<PathBuf>,
}

/// Initialized context for one command
pub struct CommandContext {
    pub config: NavigatorConfig,
    pub client: Arc<CatalogClient>,
    pub resolver: CatalogResolver<CatalogClient>,
    /// Problems that did not stop initialization, in the order they happened
    pub warnings: Vec<NavigatorError>,
}

pub struct CommandInit;

impl CommandInit {
    pub async fn initialize(options: &SessionOptions) -> Result<CommandContext> {
        Self::initialize_with_config(Self::load_config(options)?).await
    }

    /// Configuration file with the per-invocation overrides applied
    pub fn load_config(options: &SessionOptions) -> Result<NavigatorConfig> {
        let mut config = NavigatorConfig::load_or_create()?
            .with_overrides(options.api_base_url.clone(), options.region_table.clone());
        if let Some(dir) = &options.download_dir {
            config.download_dir = dir.clone();
        }
        config.validate()?;
        Ok(config)
    }

    pub async fn initialize_with_config(config: NavigatorConfig) -> Result<CommandContext> {
        let client = Arc::new(CatalogClient::new(&config)?);
        let mut warnings = Vec::new();

        let table = match RegionTable::load(&config.region_table, config.request_timeout()).await
        {
            Ok(table) => table,
            Err(e) => {
                log::warn!("Continuing without region reference table: {e}");
                warnings.push(e);
                RegionTable::empty()
            }
        };

        let cached = match load_state(client.base_url()) {
            Ok(cached) => cached,
            Err(e) => {
                log::warn!("Ignoring unreadable selection cache: {e}");
                None
            }
        };

        let mut resolver = match cached {
            Some(cache) => CatalogResolver::from_state(Arc::clone(&client), table, cache.selection),
            None => CatalogResolver::new(Arc::clone(&client), table),
        };

        if resolver.path().is_empty() || resolver.options(Level::ForecastType).is_none() {
            warnings.extend(resolver.load_forecast_types().await);
        }

        log::debug!(
            "Initialized session at '{}' with {} region rows",
            resolver.path().breadcrumb(),
            resolver.table().len()
        );

        Ok(CommandContext {
            config,
            client,
            resolver,
            warnings,
        })
    }
}

impl CommandContext {
    /// Report what initialization had to work around
    pub fn print_warnings(&self) {
        for warning in &self.warnings {
            print_warning(&warning.user_message());
        }
    }

    /// Persist the resolver state for the next command
    pub fn save(&self) -> Result<()> {
        save_state(&StateCache::new(
            self.client.base_url(),
            self.resolver.to_state(),
        ))
    }

    /// Save the state whatever the outcome; the command's own error wins
    pub fn finish<T>(&self, outcome: Result<T>) -> Result<T> {
        let saved = self.save();
        match outcome {
            Ok(value) => saved.map(|()| value),
            Err(e) => {
                if let Err(save_err) = saved {
                    log::warn!("Selection cache not saved: {save_err}");
                }
                Err(e)
            }
        }
    }
}
