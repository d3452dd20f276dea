//! Catalog records: the wire format of each endpoint and the domain values built
//! from them.
//!
//! Every response body is deserialized into an explicit record type and then
//! checked before it reaches the resolver. A missing field, an empty name or a
//! nonsensical size rejects the whole response; callers map the message into
//! `RemoteUnavailable` (or `PreviewUnavailable` for previews).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Result of validating one response; the error is a human-readable reason
pub type Validated<T> = std::result::Result<T, String>;

/// `GET /nas/forecast-types`
#[derive(Debug, Deserialize)]
pub struct ForecastTypesResponse {
    pub forecast_types: Vec<ForecastTypeRecord>,
}

/// The catalog reports forecast types either as bare names or as objects
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ForecastTypeRecord {
    Name(String),
    Named { name: String },
}

impl ForecastTypesResponse {
    pub fn into_names(self) -> Validated<Vec<String>> {
        self.forecast_types
            .into_iter()
            .map(|record| {
                let name = match record {
                    ForecastTypeRecord::Name(name) => name,
                    ForecastTypeRecord::Named { name } => name,
                };
                non_empty("forecast type name", name)
            })
            .collect()
    }
}

/// `GET /nas/variables`
#[derive(Debug, Deserialize)]
pub struct VariablesResponse {
    pub variables: Vec<VariableRecord>,
}

#[derive(Debug, Deserialize)]
pub struct VariableRecord {
    pub name: String,
    pub file_count: u64,
}

/// A variable directory and the number of files in it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableSummary {
    pub name: String,
    pub file_count: u64,
}

impl VariablesResponse {
    pub fn into_summaries(self) -> Validated<Vec<VariableSummary>> {
        self.variables
            .into_iter()
            .map(|record| {
                Ok(VariableSummary {
                    name: non_empty("variable name", record.name)?,
                    file_count: record.file_count,
                })
            })
            .collect()
    }
}

/// `GET /nas/variable-files`
#[derive(Debug, Deserialize)]
pub struct FilesResponse {
    pub files: Vec<FileRecord>,
}

#[derive(Debug, Deserialize)]
pub struct FileRecord {
    pub filename: String,
    pub size: u64,
    pub size_mb: f64,
    pub start_date: String,
    pub end_date: String,
    /// POSIX seconds
    pub modified: f64,
}

/// One file of a variable directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub identifier: String,
    pub size_bytes: u64,
    pub size_mb: f64,
    pub coverage_start: String,
    pub coverage_end: String,
    pub last_modified: DateTime<Utc>,
}

impl TryFrom<FileRecord> for CatalogEntry {
    type Error = String;

    fn try_from(record: FileRecord) -> Validated<Self> {
        let identifier = plain_file_name(non_empty("filename", record.filename)?)?;
        if !record.size_mb.is_finite() || record.size_mb < 0.0 {
            return Err(format!("invalid size_mb {} for {identifier}", record.size_mb));
        }
        let last_modified = timestamp(record.modified)
            .ok_or_else(|| format!("invalid modified time {} for {identifier}", record.modified))?;

        Ok(CatalogEntry {
            identifier,
            size_bytes: record.size,
            size_mb: record.size_mb,
            coverage_start: record.start_date,
            coverage_end: record.end_date,
            last_modified,
        })
    }
}

impl FilesResponse {
    pub fn into_entries(self) -> Validated<Vec<CatalogEntry>> {
        self.files.into_iter().map(CatalogEntry::try_from).collect()
    }
}

/// `GET /nas/file-preview`
#[derive(Debug, Deserialize)]
pub struct FilePreviewResponse {
    pub lines: Vec<String>,
    pub encoding: String,
    pub line_count: usize,
    pub requested_lines: usize,
}

/// First lines of a file, as sampled by the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewResult {
    pub entry: CatalogEntry,
    pub sampled_lines: Vec<String>,
    pub encoding: String,
    pub total_line_count: usize,
    pub requested_line_count: usize,
}

impl FilePreviewResponse {
    pub fn into_result(self, entry: CatalogEntry, line_limit: u32) -> Validated<PreviewResult> {
        let limit = line_limit as usize;
        if self.lines.len() > limit || self.lines.len() > self.requested_lines {
            return Err(format!(
                "preview returned {} lines for a limit of {limit}",
                self.lines.len()
            ));
        }
        if self.line_count != self.lines.len() {
            return Err(format!(
                "line_count {} does not match {} sampled lines",
                self.line_count,
                self.lines.len()
            ));
        }

        Ok(PreviewResult {
            entry,
            sampled_lines: self.lines,
            encoding: self.encoding,
            total_line_count: self.line_count,
            requested_line_count: self.requested_lines,
        })
    }
}

/// `GET /nas/data-summary`
#[derive(Debug, Deserialize)]
pub struct SummaryResponse {
    #[serde(default)]
    pub nas_path: Option<String>,
    #[serde(default)]
    pub nas_available: bool,
    #[serde(default)]
    pub forecast_types: Vec<ForecastTypeSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastTypeSummary {
    pub name: String,
    #[serde(default)]
    pub city_count: Option<u64>,
    #[serde(default)]
    pub district_count: Option<u64>,
    #[serde(default)]
    pub town_count: Option<u64>,
}

/// Where the catalog lives and what it holds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSummary {
    pub storage_path: String,
    pub available: bool,
    pub forecast_types: Vec<ForecastTypeSummary>,
}

impl SummaryResponse {
    /// A summary without a storage path carries no usable information
    pub fn into_summary(self) -> Validated<CatalogSummary> {
        let storage_path = self
            .nas_path
            .filter(|path| !path.is_empty())
            .ok_or_else(|| "summary has no storage path".to_string())?;

        let forecast_types = self
            .forecast_types
            .into_iter()
            .map(|summary| {
                non_empty("forecast type name", summary.name.clone())?;
                Ok(summary)
            })
            .collect::<Validated<Vec<_>>>()?;

        Ok(CatalogSummary {
            storage_path,
            available: self.nas_available,
            forecast_types,
        })
    }
}

fn non_empty(field: &str, value: String) -> Validated<String> {
    if value.trim().is_empty() {
        Err(format!("empty {field}"))
    } else {
        Ok(value)
    }
}

/// A file name with no directory part, so it stays inside whatever directory
/// it is joined to
fn plain_file_name(value: String) -> Validated<String> {
    let bare = !value.contains(['/', '\\'])
        && Path::new(&value).file_name().is_some_and(|name| name == value.as_str());
    if bare {
        Ok(value)
    } else {
        Err(format!("filename '{value}' is not a plain file name"))
    }
}

fn timestamp(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() || seconds < 0.0 {
        return None;
    }
    let whole = seconds.trunc() as i64;
    let nanos = (seconds.fract() * 1e9) as u32;
    DateTime::from_timestamp(whole, nanos)
}
