//! Seams between the resolver and the remote catalog.
//!
//! [`CatalogSource`] answers listing queries; [`PreviewGateway`] fetches previews
//! and starts downloads. The HTTP client implements both, tests substitute
//! in-memory doubles.

use crate::core::error::Result;
use crate::core::records::{CatalogEntry, CatalogSummary, PreviewResult, VariableSummary};
use crate::core::selection::{RegionPath, ResolvedPath};
use async_trait::async_trait;

/// Read-only listing queries against the remote catalog
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Forecast types present in the catalog, in catalog order
    async fn forecast_types(&self) -> Result<Vec<String>>;

    /// Variable directories below a town
    async fn variables(&self, region: &RegionPath) -> Result<Vec<VariableSummary>>;

    /// Files of one variable directory, in catalog order
    async fn files(&self, path: &ResolvedPath) -> Result<Vec<CatalogEntry>>;

    async fn summary(&self) -> Result<CatalogSummary>;
}

/// A file download addressed by its full path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub path: ResolvedPath,
    pub identifier: String,
}

/// Preview and download side of the catalog
#[async_trait]
pub trait PreviewGateway: Send + Sync {
    async fn fetch_preview(
        &self,
        path: &ResolvedPath,
        entry: &CatalogEntry,
        line_limit: u32,
    ) -> Result<PreviewResult>;

    /// Start a download. Completion and failure are not reported back.
    fn trigger_download(&self, request: DownloadRequest);
}
