//! In-memory catalog and gateway with call counters

#![allow(dead_code)]

use super::fixtures::entry;
use async_trait::async_trait;
use forecast_navigator::core::{
    error::{NavigatorError, RemoteQuery, Result},
    CatalogEntry, CatalogSource, CatalogSummary, DownloadRequest, PreviewGateway, PreviewResult,
    RegionPath, ResolvedPath, VariableSummary,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Default)]
pub struct MockCatalog {
    /// Every call fails with `RemoteUnavailable`
    pub offline: bool,
    /// Forecast types reported by the catalog, on top of the baseline
    pub forecast_types: Vec<String>,
    pub variable_calls: AtomicUsize,
    pub file_calls: AtomicUsize,
    pub preview_calls: AtomicUsize,
    pub downloads: Mutex<Vec<DownloadRequest>>,
}

impl MockCatalog {
    pub fn online() -> Self {
        Self {
            forecast_types: vec!["단기예보".to_string(), "중기예보".to_string()],
            ..Default::default()
        }
    }

    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Default::default()
        }
    }

    pub fn variable_calls(&self) -> usize {
        self.variable_calls.load(Ordering::SeqCst)
    }

    pub fn preview_calls(&self) -> usize {
        self.preview_calls.load(Ordering::SeqCst)
    }

    pub fn recorded_downloads(&self) -> Vec<DownloadRequest> {
        self.downloads.lock().map(|d| d.clone()).unwrap_or_default()
    }

    fn check(&self, query: RemoteQuery) -> Result<()> {
        if self.offline {
            Err(NavigatorError::remote_unavailable(query, "connection refused"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CatalogSource for MockCatalog {
    async fn forecast_types(&self) -> Result<Vec<String>> {
        self.check(RemoteQuery::ForecastTypes)?;
        Ok(self.forecast_types.clone())
    }

    /// Two variables per town, the second named after the town
    async fn variables(&self, region: &RegionPath) -> Result<Vec<VariableSummary>> {
        self.variable_calls.fetch_add(1, Ordering::SeqCst);
        self.check(RemoteQuery::Variables)?;
        Ok(vec![
            VariableSummary {
                name: "습도".to_string(),
                file_count: 1,
            },
            VariableSummary {
                name: "기온".to_string(),
                file_count: 2,
            },
            VariableSummary {
                name: format!("강수-{}", region.town),
                file_count: 0,
            },
        ])
    }

    async fn files(&self, path: &ResolvedPath) -> Result<Vec<CatalogEntry>> {
        self.file_calls.fetch_add(1, Ordering::SeqCst);
        self.check(RemoteQuery::Files)?;
        if path.variable == "기온" {
            Ok(vec![entry("a.csv"), entry("b.csv")])
        } else {
            Ok(vec![entry("only.csv")])
        }
    }

    async fn summary(&self) -> Result<CatalogSummary> {
        self.check(RemoteQuery::Summary)?;
        Ok(CatalogSummary {
            storage_path: "/mnt/nas".to_string(),
            available: true,
            forecast_types: Vec::new(),
        })
    }
}

#[async_trait]
impl PreviewGateway for MockCatalog {
    async fn fetch_preview(
        &self,
        _path: &ResolvedPath,
        entry: &CatalogEntry,
        line_limit: u32,
    ) -> Result<PreviewResult> {
        self.preview_calls.fetch_add(1, Ordering::SeqCst);
        if self.offline {
            return Err(NavigatorError::preview_unavailable(
                &entry.identifier,
                "connection refused",
            ));
        }
        let sampled_lines: Vec<String> = ["date,value", "2024-01-01,1.5"]
            .iter()
            .take(line_limit as usize)
            .map(|line| line.to_string())
            .collect();
        Ok(PreviewResult {
            entry: entry.clone(),
            total_line_count: sampled_lines.len(),
            sampled_lines,
            encoding: "utf-8".to_string(),
            requested_line_count: line_limit as usize,
        })
    }

    fn trigger_download(&self, request: DownloadRequest) {
        if let Ok(mut downloads) = self.downloads.lock() {
            downloads.push(request);
        }
    }
}
