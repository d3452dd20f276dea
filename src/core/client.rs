//! HTTP client for the forecast catalog API.

use crate::core::config::NavigatorConfig;
use crate::core::error::{NavigatorError, RemoteQuery, Result};
use crate::core::records::{
    CatalogEntry, CatalogSummary, FilePreviewResponse, FilesResponse, ForecastTypesResponse,
    PreviewResult, SummaryResponse, VariableSummary, VariablesResponse,
};
use crate::core::selection::{RegionPath, ResolvedPath};
use crate::core::source::{CatalogSource, DownloadRequest, PreviewGateway};
use async_trait::async_trait;
use reqwest::header::CONTENT_DISPOSITION;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Catalog API client; also the preview and download gateway
pub struct CatalogClient {
    client: Client,
    base_url: String,
    download_dir: PathBuf,
    downloads: Mutex<Vec<JoinHandle<Result<PathBuf>>>>,
}

impl CatalogClient {
    /// Creates a new client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &NavigatorConfig) -> Result<Self> {
        Self::with_base_url(
            config.api_base(),
            config.request_timeout(),
            config.download_dir.clone(),
        )
    }

    pub fn with_base_url(
        base_url: impl Into<String>,
        timeout: Duration,
        download_dir: PathBuf,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(NavigatorError::HttpClient)?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            download_dir,
            downloads: Mutex::new(Vec::new()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// GET a JSON endpoint. Failures come back as a reason for the caller to
    /// wrap in the error that fits the query.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> std::result::Result<T, String> {
        let url = self.endpoint(path);
        log::debug!("GET {url} {query:?}");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| format!("request to {url} failed: {e}"))?;

        if response.status().is_success() {
            response
                .json()
                .await
                .map_err(|e| format!("malformed response from {url}: {e}"))
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(format!("API error ({status}): {body}"))
        }
    }

    /// Wait for every download started so far and report where each landed
    pub async fn wait_for_downloads(&self) -> Vec<Result<PathBuf>> {
        let handles = std::mem::take(
            &mut *self
                .downloads
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        );

        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            results.push(handle.await.unwrap_or_else(|e| {
                Err(NavigatorError::remote_unavailable(RemoteQuery::Download, e))
            }));
        }
        results
    }
}

#[async_trait]
impl CatalogSource for CatalogClient {
    async fn forecast_types(&self) -> Result<Vec<String>> {
        self.get_json::<ForecastTypesResponse>("/nas/forecast-types", &[])
            .await
            .and_then(ForecastTypesResponse::into_names)
            .map_err(|reason| NavigatorError::remote_unavailable(RemoteQuery::ForecastTypes, reason))
    }

    async fn variables(&self, region: &RegionPath) -> Result<Vec<VariableSummary>> {
        self.get_json::<VariablesResponse>("/nas/variables", &region.query_pairs())
            .await
            .and_then(VariablesResponse::into_summaries)
            .map_err(|reason| NavigatorError::remote_unavailable(RemoteQuery::Variables, reason))
    }

    async fn files(&self, path: &ResolvedPath) -> Result<Vec<CatalogEntry>> {
        self.get_json::<FilesResponse>("/nas/variable-files", &path.query_pairs())
            .await
            .and_then(FilesResponse::into_entries)
            .map_err(|reason| NavigatorError::remote_unavailable(RemoteQuery::Files, reason))
    }

    async fn summary(&self) -> Result<CatalogSummary> {
        self.get_json::<SummaryResponse>("/nas/data-summary", &[])
            .await
            .and_then(SummaryResponse::into_summary)
            .map_err(|reason| NavigatorError::remote_unavailable(RemoteQuery::Summary, reason))
    }
}

#[async_trait]
impl PreviewGateway for CatalogClient {
    async fn fetch_preview(
        &self,
        path: &ResolvedPath,
        entry: &CatalogEntry,
        line_limit: u32,
    ) -> Result<PreviewResult> {
        let lines = line_limit.to_string();
        let mut query = path.query_pairs();
        query.push(("filename", entry.identifier.as_str()));
        query.push(("lines", lines.as_str()));

        self.get_json::<FilePreviewResponse>("/nas/file-preview", &query)
            .await
            .and_then(|response| response.into_result(entry.clone(), line_limit))
            .map_err(|reason| NavigatorError::preview_unavailable(&entry.identifier, reason))
    }

    /// Spawns the transfer on the current tokio runtime.
    fn trigger_download(&self, request: DownloadRequest) {
        let client = self.client.clone();
        let url = self.endpoint("/nas/download");
        let dir = self.download_dir.clone();

        let handle = tokio::spawn(async move {
            let result = download_to(&client, &url, &request, &dir).await;
            match &result {
                Ok(target) => log::info!("Downloaded '{}' to {}", request.identifier, target.display()),
                Err(e) => log::error!("Download of '{}' failed: {e}", request.identifier),
            }
            result
        });

        self.downloads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(handle);
    }
}

async fn download_to(
    client: &Client,
    url: &str,
    request: &DownloadRequest,
    dir: &Path,
) -> Result<PathBuf> {
    let failed = |reason: String| NavigatorError::remote_unavailable(RemoteQuery::Download, reason);

    let mut query = request.path.query_pairs();
    query.push(("filename", request.identifier.as_str()));

    let response = client
        .get(url)
        .query(&query)
        .send()
        .await
        .map_err(|e| failed(format!("request to {url} failed: {e}")))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(failed(format!("API error ({status}): {body}")));
    }

    let name = response
        .headers()
        .get(CONTENT_DISPOSITION)
        .and_then(|value| value.to_str().ok())
        .and_then(filename_hint)
        .or_else(|| base_name(&request.identifier))
        .ok_or_else(|| failed(format!("no file name for '{}'", request.identifier)))?;

    let bytes = response
        .bytes()
        .await
        .map_err(|e| failed(format!("download interrupted: {e}")))?;

    tokio::fs::create_dir_all(dir).await?;
    let target = dir.join(name);
    tokio::fs::write(&target, &bytes).await?;
    Ok(target)
}

/// Base name from a `Content-Disposition` header's `filename=` parameter
fn filename_hint(header: &str) -> Option<String> {
    let raw = header
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))?
        .trim_matches('"');
    base_name(raw)
}

/// Last component of `raw`, with either separator style
fn base_name(raw: &str) -> Option<String> {
    let last = raw.rsplit(['/', '\\']).next()?;
    Path::new(last)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
}
