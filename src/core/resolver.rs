//! The catalog resolver: owner of the selection path and of every option set
//! derived from it.
//!
//! # Public API
//! - [`CatalogResolver`]: selection state plus the listing operations per level
//! - [`FetchRequest`] / [`FetchResponse`]: a planned remote listing and its result
//! - [`PreviewAction`] / [`PreviewRequest`] / [`PreviewResponse`]: preview toggling
//! - [`ApplyOutcome`]: whether a completed fetch was applied or discarded as stale
//! - [`Fallback`]: a value that survived a failed remote call, with the warning
//!
//! # Mutation rules
//! - Advancing goes through [`CatalogResolver::select_level`] only, one level at a
//!   time. Everything strictly deeper than the selected level is invalidated.
//! - [`CatalogResolver::retreat`] steps back exactly one level.
//! - Remote listings are planned, executed and applied in three steps. The planned
//!   request carries a snapshot of the path; a response whose snapshot no longer
//!   matches the current path is discarded, so the last selection wins.

use crate::core::error::{NavigatorError, Result};
use crate::core::level::{Level, Stage};
use crate::core::option_set::{CatalogOption, OptionSet};
use crate::core::records::{CatalogEntry, PreviewResult};
use crate::core::reference_table::RegionTable;
use crate::core::selection::{RegionPath, ResolvedPath, SelectionPath};
use crate::core::source::{CatalogSource, DownloadRequest, PreviewGateway};
use crate::core::state::ResolverState;
use std::sync::Arc;

/// Forecast types offered even when the catalog cannot be reached
pub const BASELINE_FORECAST_TYPES: [&str; 3] = ["단기예보", "초단기실황", "초단기예보"];

pub const DEFAULT_PREVIEW_LINES: u32 = 40;
pub const MAX_PREVIEW_LINES: u32 = 200;

/// A value produced despite a failed remote call
#[derive(Debug)]
pub struct Fallback<T> {
    pub value: T,
    pub warning: Option<NavigatorError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// The path moved on while the request was in flight
    Stale,
}

/// Remote listing to run for the level below a selection
#[derive(Debug, Clone, PartialEq)]
pub enum FetchTarget {
    Variables(RegionPath),
    Files(ResolvedPath),
}

/// A remote listing planned by [`CatalogResolver::select_level`]
#[derive(Debug, Clone)]
pub struct FetchRequest {
    snapshot: SelectionPath,
    target: FetchTarget,
}

impl FetchRequest {
    pub fn snapshot(&self) -> &SelectionPath {
        &self.snapshot
    }

    pub fn target(&self) -> &FetchTarget {
        &self.target
    }

    /// Run the listing. Only the source is borrowed, so other selections can be
    /// made while this is pending.
    pub async fn execute<S: CatalogSource + ?Sized>(self, source: &S) -> FetchResponse {
        let payload = match &self.target {
            FetchTarget::Variables(region) => fetch_variables(source, region)
                .await
                .map(FetchPayload::Variables),
            FetchTarget::Files(path) => fetch_files(source, path).await.map(FetchPayload::Files),
        };
        FetchResponse {
            snapshot: self.snapshot,
            payload,
        }
    }
}

#[derive(Debug)]
pub enum FetchPayload {
    Variables(OptionSet),
    Files(Vec<CatalogEntry>),
}

/// Completed listing, to be handed to [`CatalogResolver::apply`]
#[derive(Debug)]
pub struct FetchResponse {
    snapshot: SelectionPath,
    payload: Result<FetchPayload>,
}

/// What selecting a file for preview requires
#[derive(Debug)]
pub enum PreviewAction {
    /// The file was already previewed; the preview is gone and nothing is fetched
    Cleared,
    Fetch(PreviewRequest),
}

#[derive(Debug, Clone)]
pub struct PreviewRequest {
    snapshot: SelectionPath,
    path: ResolvedPath,
    entry: CatalogEntry,
    line_limit: u32,
}

impl PreviewRequest {
    pub fn identifier(&self) -> &str {
        &self.entry.identifier
    }

    pub async fn execute<G: PreviewGateway + ?Sized>(self, gateway: &G) -> PreviewResponse {
        let result = gateway
            .fetch_preview(&self.path, &self.entry, self.line_limit)
            .await;
        PreviewResponse {
            snapshot: self.snapshot,
            identifier: self.entry.identifier,
            result,
        }
    }
}

#[derive(Debug)]
pub struct PreviewResponse {
    snapshot: SelectionPath,
    identifier: String,
    result: Result<PreviewResult>,
}

/// Selection state and listings for one navigation session
pub struct CatalogResolver<S: ?Sized> {
    source: Arc<S>,
    table: RegionTable,
    path: SelectionPath,
    /// `options[level]` lists the candidates for `level`
    options: [Option<OptionSet>; Level::COUNT],
    files: Option<Vec<CatalogEntry>>,
    preview: Option<PreviewResult>,
    pending_preview: Option<String>,
}

impl<S: CatalogSource + ?Sized> CatalogResolver<S> {
    pub fn new(source: Arc<S>, table: RegionTable) -> Self {
        Self {
            source,
            table,
            path: SelectionPath::new(),
            options: Default::default(),
            files: None,
            preview: None,
            pending_preview: None,
        }
    }

    /// Rebuild a resolver from persisted state.
    ///
    /// Region option sets are derived again from `table`. If the table no longer
    /// contains a persisted region label, the path is cut just above it.
    pub fn from_state(source: Arc<S>, table: RegionTable, state: ResolverState) -> Self {
        let mut resolver = Self::new(source, table);
        let mut persisted = state.options;
        persisted.resize(Level::COUNT, None);
        resolver.options[Level::ForecastType.index()] = persisted[Level::ForecastType.index()].take();

        for (level, label) in state.path.iter() {
            if level.is_regional() && !resolver.regional_options(level).contains(label) {
                log::warn!("Region '{label}' is no longer in the reference table, stopping at {level}");
                break;
            }
            if resolver.path.set(level, label).is_err() {
                break;
            }
            match level.next() {
                Some(next) if next.is_regional() => {
                    resolver.options[next.index()] = Some(resolver.regional_options(next));
                }
                Some(next) => resolver.options[next.index()] = persisted[next.index()].take(),
                None => resolver.files = state.files.clone(),
            }
        }

        if resolver.path.is_complete() {
            resolver.preview = state.preview.filter(|preview| {
                resolver
                    .find_entry(&preview.entry.identifier)
                    .is_some()
            });
        }

        log::debug!(
            "Restored selection '{}' at depth {}",
            resolver.path.breadcrumb(),
            resolver.path.depth()
        );
        resolver
    }

    /// Snapshot for persistence
    pub fn to_state(&self) -> ResolverState {
        ResolverState {
            path: self.path.clone(),
            options: self.options.to_vec(),
            files: self.files.clone(),
            preview: self.preview.clone(),
        }
    }

    pub fn source(&self) -> Arc<S> {
        Arc::clone(&self.source)
    }

    pub fn path(&self) -> &SelectionPath {
        &self.path
    }

    pub fn stage(&self) -> Stage {
        self.path.stage()
    }

    /// Candidates for `level`; `None` until they have been loaded
    pub fn options(&self, level: Level) -> Option<&OptionSet> {
        self.options[level.index()].as_ref()
    }

    /// Candidates for the level the user is choosing now
    pub fn next_options(&self) -> Option<&OptionSet> {
        match self.stage() {
            Stage::Choose(level) => self.options(level),
            Stage::Files => None,
        }
    }

    pub fn files(&self) -> Option<&[CatalogEntry]> {
        self.files.as_deref()
    }

    pub fn preview(&self) -> Option<&PreviewResult> {
        self.preview.as_ref()
    }

    pub fn table(&self) -> &RegionTable {
        &self.table
    }

    /// Baseline forecast types plus whatever the catalog reports.
    ///
    /// Never fails: when the catalog is unreachable the baseline is returned
    /// together with the error as a warning.
    pub async fn list_forecast_types(&self) -> Fallback<OptionSet> {
        let baseline = OptionSet::from_labels_ordered(BASELINE_FORECAST_TYPES);
        match self.source.forecast_types().await {
            Ok(remote) => Fallback {
                value: baseline.union(&OptionSet::from_labels_ordered(remote)),
                warning: None,
            },
            Err(e) => {
                log::warn!("Falling back to baseline forecast types: {e}");
                Fallback {
                    value: baseline,
                    warning: Some(e),
                }
            }
        }
    }

    /// Load the forecast types into the first level and return the fallback
    /// warning, if any
    pub async fn load_forecast_types(&mut self) -> Option<NavigatorError> {
        let Fallback { value, warning } = self.list_forecast_types().await;
        self.options[Level::ForecastType.index()] = Some(value);
        warning
    }

    pub fn list_provinces(&self) -> OptionSet {
        self.table.options_for(&[])
    }

    /// `province` must come from [`Self::list_provinces`]
    pub fn list_districts(&self, province: &str) -> OptionSet {
        debug_assert!(
            self.list_provinces().contains(province),
            "unknown province {province}"
        );
        self.table.options_for(&[province])
    }

    /// `province` and `district` must come from the previous listings
    pub fn list_towns(&self, province: &str, district: &str) -> OptionSet {
        debug_assert!(
            self.list_districts(province).contains(district),
            "unknown district {district} in {province}"
        );
        self.table.options_for(&[province, district])
    }

    pub async fn list_variables(
        &self,
        forecast_type: &str,
        province: &str,
        district: &str,
        town: &str,
    ) -> Result<OptionSet> {
        let region = RegionPath {
            forecast_type: forecast_type.to_string(),
            province: province.to_string(),
            district: district.to_string(),
            town: town.to_string(),
        };
        fetch_variables(self.source.as_ref(), &region).await
    }

    pub async fn list_files(
        &self,
        forecast_type: &str,
        province: &str,
        district: &str,
        town: &str,
        variable: &str,
    ) -> Result<Vec<CatalogEntry>> {
        let path = ResolvedPath::new(forecast_type, province, district, town, variable);
        fetch_files(self.source.as_ref(), &path).await
    }

    /// Set `level` to `value` and invalidate everything below it.
    ///
    /// Region levels below are derived immediately. When the level below lives in
    /// the remote catalog, the listing is returned as a [`FetchRequest`] to be
    /// executed and applied.
    pub fn select_level(&mut self, level: Level, value: &str) -> Result<Option<FetchRequest>> {
        if level.index() > self.path.depth() {
            return Err(NavigatorError::level_out_of_order(level, self.path.depth()));
        }
        self.validate_choice(level, value)?;

        self.path.set(level, value)?;
        self.invalidate_below(level);
        log::debug!("Selected {level} '{value}', path is now '{}'", self.path.breadcrumb());

        let request = match level.next() {
            Some(next) if next.is_regional() => {
                self.options[next.index()] = Some(self.regional_options(next));
                None
            }
            Some(_) => self.path.region().map(FetchTarget::Variables),
            None => self.path.resolved().map(FetchTarget::Files),
        };

        Ok(request.map(|target| FetchRequest {
            snapshot: self.path.clone(),
            target,
        }))
    }

    /// Apply a completed listing unless the path has changed since it was planned
    pub fn apply(&mut self, response: FetchResponse) -> Result<ApplyOutcome> {
        if response.snapshot != self.path {
            log::warn!(
                "Discarding stale response for '{}' (current path '{}')",
                response.snapshot.breadcrumb(),
                self.path.breadcrumb()
            );
            return Ok(ApplyOutcome::Stale);
        }

        match response.payload? {
            FetchPayload::Variables(options) => {
                log::debug!("Loaded {} variables", options.len());
                self.options[Level::Variable.index()] = Some(options);
            }
            FetchPayload::Files(files) => {
                log::debug!("Loaded {} files", files.len());
                self.files = Some(files);
                self.preview = None;
                self.pending_preview = None;
            }
        }
        Ok(ApplyOutcome::Applied)
    }

    /// Select, then run and apply the listing for the level below
    pub async fn advance(&mut self, level: Level, value: &str) -> Result<ApplyOutcome> {
        match self.select_level(level, value)? {
            Some(request) => {
                let response = request.execute(self.source.as_ref()).await;
                self.apply(response)
            }
            None => Ok(ApplyOutcome::Applied),
        }
    }

    /// Select the deepest value again, reloading the listing below it
    pub fn reselect(&mut self) -> Result<Option<FetchRequest>> {
        let level = self.path.deepest().ok_or(NavigatorError::NothingSelected)?;
        let value = self
            .path
            .get(level)
            .map(str::to_string)
            .ok_or(NavigatorError::NothingSelected)?;
        self.select_level(level, &value)
    }

    /// Step back one level. Returns the value that was removed, `None` at the root.
    pub fn retreat(&mut self) -> Option<String> {
        let level = self.path.deepest()?;
        let removed = self.path.pop();
        self.invalidate_below(level);
        log::debug!("Retreated from {level}, path is now '{}'", self.path.breadcrumb());
        removed
    }

    /// Decide what selecting `identifier` for preview means.
    ///
    /// Selecting the file that is already previewed (or already being fetched)
    /// clears the preview without a network call. Any other file supersedes the
    /// current preview.
    pub fn preview_action(&mut self, identifier: &str, line_limit: u32) -> Result<PreviewAction> {
        if line_limit == 0 || line_limit > MAX_PREVIEW_LINES {
            return Err(NavigatorError::InvalidLineLimit {
                requested: line_limit,
            });
        }
        let path = self.path.resolved().ok_or(NavigatorError::PathIncomplete)?;
        let entry = self
            .find_entry(identifier)
            .cloned()
            .ok_or_else(|| NavigatorError::unknown_entry(identifier))?;

        let showing = self
            .preview
            .as_ref()
            .is_some_and(|preview| preview.entry.identifier == identifier);
        let pending = self.pending_preview.as_deref() == Some(identifier);

        self.preview = None;
        if showing || pending {
            self.pending_preview = None;
            log::debug!("Preview of '{identifier}' toggled off");
            return Ok(PreviewAction::Cleared);
        }

        self.pending_preview = Some(identifier.to_string());
        Ok(PreviewAction::Fetch(PreviewRequest {
            snapshot: self.path.clone(),
            path,
            entry,
            line_limit,
        }))
    }

    /// Apply a completed preview unless it was superseded
    pub fn apply_preview(&mut self, response: PreviewResponse) -> Result<ApplyOutcome> {
        let current = response.snapshot == self.path
            && self.pending_preview.as_deref() == Some(response.identifier.as_str());
        if !current {
            log::warn!("Discarding superseded preview of '{}'", response.identifier);
            return Ok(ApplyOutcome::Stale);
        }

        self.pending_preview = None;
        self.preview = Some(response.result?);
        Ok(ApplyOutcome::Applied)
    }

    /// Toggle the preview of `identifier`, fetching through `gateway` when needed
    pub async fn toggle_preview<G: PreviewGateway + ?Sized>(
        &mut self,
        gateway: &G,
        identifier: &str,
        line_limit: u32,
    ) -> Result<ApplyOutcome> {
        match self.preview_action(identifier, line_limit)? {
            PreviewAction::Cleared => Ok(ApplyOutcome::Applied),
            PreviewAction::Fetch(request) => {
                let response = request.execute(gateway).await;
                self.apply_preview(response)
            }
        }
    }

    /// Hand the fully resolved path and `identifier` to the download gateway
    pub fn download<G: PreviewGateway + ?Sized>(
        &self,
        gateway: &G,
        identifier: &str,
    ) -> Result<DownloadRequest> {
        let path = self.path.resolved().ok_or(NavigatorError::PathIncomplete)?;
        if self.find_entry(identifier).is_none() {
            return Err(NavigatorError::unknown_entry(identifier));
        }

        let request = DownloadRequest {
            path,
            identifier: identifier.to_string(),
        };
        log::debug!("Triggering download of '{identifier}'");
        gateway.trigger_download(request.clone());
        Ok(request)
    }

    fn find_entry(&self, identifier: &str) -> Option<&CatalogEntry> {
        self.files
            .as_ref()?
            .iter()
            .find(|entry| entry.identifier == identifier)
    }

    fn validate_choice(&self, level: Level, value: &str) -> Result<()> {
        let known = if level.is_regional() {
            self.regional_options(level).contains(value)
        } else {
            self.options(level)
                .map_or(true, |options| options.contains(value))
        };
        if known && !value.is_empty() {
            Ok(())
        } else {
            Err(NavigatorError::unknown_option(level, value))
        }
    }

    /// Region candidates for `level`, given the path above it
    fn regional_options(&self, level: Level) -> OptionSet {
        let labels = self.path.labels();
        match level {
            Level::Province => self.list_provinces(),
            Level::District => self.list_districts(&labels[Level::Province.index()]),
            Level::Town => self.list_towns(
                &labels[Level::Province.index()],
                &labels[Level::District.index()],
            ),
            Level::ForecastType | Level::Variable => OptionSet::default(),
        }
    }

    fn invalidate_below(&mut self, level: Level) {
        for slot in &mut self.options[level.index() + 1..] {
            *slot = None;
        }
        self.files = None;
        self.preview = None;
        self.pending_preview = None;
    }
}

async fn fetch_variables<S: CatalogSource + ?Sized>(
    source: &S,
    region: &RegionPath,
) -> Result<OptionSet> {
    let variables = source.variables(region).await?;
    Ok(OptionSet::sorted(variables.into_iter().map(|variable| {
        CatalogOption::with_file_count(variable.name, variable.file_count)
    })))
}

async fn fetch_files<S: CatalogSource + ?Sized>(
    source: &S,
    path: &ResolvedPath,
) -> Result<Vec<CatalogEntry>> {
    source.files(path).await
}
