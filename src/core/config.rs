use crate::core::dirs::get_config_directory;
use crate::core::error::NavigatorError;
use crate::core::resolver::{DEFAULT_PREVIEW_LINES, MAX_PREVIEW_LINES};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
/// Published region code table used until the config names another one
pub const DEFAULT_REGION_TABLE_URL: &str = "https://hebbkx1anhila5yf.public.blob.vercel-storage.com/%E1%84%8C%E1%85%B5%E1%84%8B%E1%85%A7%E1%86%A8%E1%84%8F%E1%85%A9%E1%84%83%E1%85%B3-xrsyvxgfV3iHpORYkKc288guJ3R5m6.csv";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NavigatorConfig {
    /// Catalog server, with or without the trailing `/api`
    pub api_base_url: String,
    /// Region reference table, a local path or an http(s) URL
    pub region_table: String,
    #[serde(default = "default_preview_lines")]
    pub preview_lines: u32,
    pub download_dir: PathBuf,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

fn default_preview_lines() -> u32 {
    DEFAULT_PREVIEW_LINES
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl NavigatorConfig {
    fn with_defaults() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            region_table: DEFAULT_REGION_TABLE_URL.to_string(),
            preview_lines: DEFAULT_PREVIEW_LINES,
            download_dir: dirs::download_dir()
                .or_else(|| std::env::current_dir().ok())
                .unwrap_or_default(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            created_at: chrono::Utc::now(),
        }
    }

    pub fn load_or_create() -> Result<Self, NavigatorError> {
        let config_dir = get_config_directory()?;
        let config_file = config_dir.join("config.json");

        if config_file.exists() {
            let content = std::fs::read_to_string(&config_file)?;
            let config: Self = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            log::debug!("Creating default config at {}", config_file.display());
            let config = Self::with_defaults();
            config.save()?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<(), NavigatorError> {
        let config_dir = get_config_directory()?;
        std::fs::create_dir_all(&config_dir)?;

        let config_file = config_dir.join("config.json");
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_file, content)?;

        Ok(())
    }

    /// Apply per-invocation overrides from flags or the environment
    pub fn with_overrides(
        mut self,
        api_base_url: Option<String>,
        region_table: Option<String>,
    ) -> Self {
        if let Some(url) = api_base_url {
            self.api_base_url = url;
        }
        if let Some(table) = region_table {
            self.region_table = table;
        }
        self
    }

    pub fn validate(&self) -> Result<(), NavigatorError> {
        if self.preview_lines == 0 || self.preview_lines > MAX_PREVIEW_LINES {
            return Err(NavigatorError::config_error(format!(
                "preview_lines must be between 1 and {MAX_PREVIEW_LINES} (got {})",
                self.preview_lines
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(NavigatorError::config_error(
                "request_timeout_secs must be positive",
            ));
        }
        Ok(())
    }

    /// Base URL ending in `/api`, as every endpoint path is relative to it
    pub fn api_base(&self) -> String {
        normalize_api_base(&self.api_base_url)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Trim, drop one trailing `/`, and make sure the URL ends in `/api`
pub fn normalize_api_base(raw: &str) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
    if trimmed.is_empty() {
        format!("{DEFAULT_API_BASE_URL}/api")
    } else if trimmed.ends_with("/api") {
        trimmed.to_string()
    } else {
        format!("{trimmed}/api")
    }
}
