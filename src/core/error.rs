//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`NavigatorError`] which covers every failure mode of the
//! catalog resolver and the command-line front end. It uses `thiserror` for the
//! error definitions and adds constructors for the structured variants.
//!
//! # Public API
//! - [`NavigatorError`]: Main error enum covering all failure modes
//! - [`RemoteQuery`]: Which catalog listing a remote failure belongs to
//! - [`Result<T>`]: Type alias for `std::result::Result<T, NavigatorError>`
//!
//! # Error Categories
//! - **Catalog**: remote listings, the region reference table, file previews
//! - **Navigation**: out-of-order levels, unknown options or files
//! - **Choice parsing**: invalid numbers, out-of-range indices
//! - **Cache and config**: state cache I/O, serialization, configuration values

use crate::core::level::Level;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Remote catalog query that failed, used to pick the user-facing message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteQuery {
    ForecastTypes,
    Variables,
    Files,
    Summary,
    Download,
}

impl RemoteQuery {
    pub fn as_str(&self) -> &'static str {
        match self {
            RemoteQuery::ForecastTypes => "forecast types",
            RemoteQuery::Variables => "variables",
            RemoteQuery::Files => "files",
            RemoteQuery::Summary => "catalog summary",
            RemoteQuery::Download => "download",
        }
    }
}

impl fmt::Display for RemoteQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Domain-specific error types for forecast-navigator
#[derive(Error, Debug)]
pub enum NavigatorError {
    // Catalog errors
    #[error("Remote catalog unavailable while listing {query}: {reason}")]
    RemoteUnavailable { query: RemoteQuery, reason: String },

    #[error("Region reference table '{location}' unavailable: {reason}")]
    ReferenceTableUnavailable { location: String, reason: String },

    #[error("Preview unavailable for '{identifier}': {reason}")]
    PreviewUnavailable { identifier: String, reason: String },

    // Navigation errors
    #[error("Cannot select {level} before the previous levels (current depth {depth})")]
    LevelOutOfOrder { level: Level, depth: usize },

    #[error("'{value}' is not a valid {level}")]
    UnknownOption { level: Level, value: String },

    #[error("File '{identifier}' is not in the current file list")]
    UnknownEntry { identifier: String },

    #[error("Selection is incomplete. Select a variable first.")]
    PathIncomplete,

    #[error("Nothing selected yet")]
    NothingSelected,

    #[error("Every level is selected. Use 'preview' or 'download' with a file number.")]
    SelectionComplete,

    #[error("Preview line limit must be between 1 and 200 (got {requested})")]
    InvalidLineLimit { requested: u32 },

    // Choice parsing errors
    #[error("No choice provided")]
    NoChoiceProvided,

    #[error("Invalid number: '{number}'")]
    InvalidNumber { number: String },

    #[error("Index must be positive (got 0)")]
    ZeroIndex,

    #[error("Index {index} is out of range (1-{max} available)")]
    IndexOutOfRange { index: usize, max: usize },

    #[error("No options available at this level. Run 'status' to see the current stage.")]
    NoOptionsAvailable,

    // Cache errors
    #[error("Failed to create cache directory '{path}': {source}")]
    CacheDirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize cache data: {source}")]
    CacheSerializationFailed { source: serde_json::Error },

    #[error("Failed to write cache file '{path}': {source}")]
    CacheWriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read cache file '{path}': {source}")]
    CacheReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse cache file '{path}': {source}")]
    CacheParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    // Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results using NavigatorError
pub type Result<T> = std::result::Result<T, NavigatorError>;

impl NavigatorError {
    /// Create a remote unavailable error for a catalog query
    pub fn remote_unavailable(query: RemoteQuery, reason: impl fmt::Display) -> Self {
        Self::RemoteUnavailable {
            query,
            reason: reason.to_string(),
        }
    }

    /// Create a reference table unavailable error
    pub fn reference_table_unavailable(
        location: impl Into<String>,
        reason: impl fmt::Display,
    ) -> Self {
        Self::ReferenceTableUnavailable {
            location: location.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a preview unavailable error
    pub fn preview_unavailable(identifier: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::PreviewUnavailable {
            identifier: identifier.into(),
            reason: reason.to_string(),
        }
    }

    pub fn level_out_of_order(level: Level, depth: usize) -> Self {
        Self::LevelOutOfOrder { level, depth }
    }

    pub fn unknown_option(level: Level, value: impl Into<String>) -> Self {
        Self::UnknownOption {
            level,
            value: value.into(),
        }
    }

    pub fn unknown_entry(identifier: impl Into<String>) -> Self {
        Self::UnknownEntry {
            identifier: identifier.into(),
        }
    }

    /// Create an index out of range error
    pub fn index_out_of_range(index: usize, max: usize) -> Self {
        Self::IndexOutOfRange { index, max }
    }

    /// Create an invalid number error
    pub fn invalid_number(number: impl Into<String>) -> Self {
        Self::InvalidNumber {
            number: number.into(),
        }
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a cache directory creation failed error
    pub fn cache_directory_creation_failed(
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::CacheDirectoryCreationFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a cache serialization failed error
    pub fn cache_serialization_failed(source: serde_json::Error) -> Self {
        Self::CacheSerializationFailed { source }
    }

    /// Create a cache write failed error
    pub fn cache_write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CacheWriteFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a cache read failed error
    pub fn cache_read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CacheReadFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a cache parse failed error
    pub fn cache_parse_failed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::CacheParseFailed {
            path: path.into(),
            source,
        }
    }

    /// Catalog failures the user can retry from the same selection
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::RemoteUnavailable { .. }
                | Self::ReferenceTableUnavailable { .. }
                | Self::PreviewUnavailable { .. }
        )
    }

    /// Localized message shown to the user.
    ///
    /// Catalog failures get the Korean wording the web front end used; every other
    /// variant falls back to its `Display` text.
    pub fn user_message(&self) -> String {
        match self {
            Self::RemoteUnavailable { query, .. } => match query {
                RemoteQuery::ForecastTypes => "데이터를 불러오는데 실패했습니다.".to_string(),
                RemoteQuery::Variables => "예보 변수 목록을 불러오는데 실패했습니다.".to_string(),
                RemoteQuery::Files => "파일 목록을 불러오는데 실패했습니다.".to_string(),
                RemoteQuery::Summary => "NAS 정보를 불러오는데 실패했습니다.".to_string(),
                RemoteQuery::Download => "파일을 다운로드하는데 실패했습니다.".to_string(),
            },
            Self::ReferenceTableUnavailable { .. } => {
                "지역 코드 데이터를 불러오는데 실패했습니다.".to_string()
            }
            Self::PreviewUnavailable { .. } => "파일 미리보기를 불러오는데 실패했습니다.".to_string(),
            other => other.to_string(),
        }
    }
}
