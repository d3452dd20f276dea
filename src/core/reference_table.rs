//! Static region reference table.
//!
//! The province, district and town levels come from a comma-delimited table with a
//! header row and the columns `(province, district, town, reserved)`. It is loaded
//! once per process, from a local file or an `http(s)://` URL, and never refetched.

use crate::core::error::{NavigatorError, Result};
use crate::core::level::Level;
use crate::core::option_set::OptionSet;
use std::path::Path;
use std::time::Duration;

/// One town row of the reference table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionRow {
    pub province: String,
    pub district: String,
    pub town: String,
    pub reserved: String,
}

impl RegionRow {
    /// Region column for a regional level
    fn column(&self, level: Level) -> &str {
        match level {
            Level::Province => &self.province,
            Level::District => &self.district,
            Level::Town => &self.town,
            Level::ForecastType | Level::Variable => "",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionTable {
    rows: Vec<RegionRow>,
}

impl RegionTable {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<RegionRow>) -> Self {
        Self { rows }
    }

    /// Parse the delimited text, skipping the header line.
    ///
    /// Cells are trimmed, `·` in town names becomes `.`, and rows without a
    /// province are dropped.
    pub fn parse(text: &str) -> Self {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let rows = text
            .lines()
            .skip(1)
            .filter_map(|line| {
                let mut cells = line.split(',').map(str::trim);
                let province = cells.next().unwrap_or_default().to_string();
                if province.is_empty() {
                    return None;
                }
                Some(RegionRow {
                    province,
                    district: cells.next().unwrap_or_default().to_string(),
                    town: cells.next().unwrap_or_default().replace('·', "."),
                    reserved: cells.next().unwrap_or_default().to_string(),
                })
            })
            .collect();
        Self { rows }
    }

    /// Load from a file path or an `http(s)://` URL
    pub async fn load(location: &str, timeout: Duration) -> Result<Self> {
        log::debug!("Loading region reference table from {location}");
        let text = if location.starts_with("http://") || location.starts_with("https://") {
            fetch_text(location, timeout).await?
        } else {
            let bytes = tokio::fs::read(Path::new(location))
                .await
                .map_err(|e| NavigatorError::reference_table_unavailable(location, e))?;
            String::from_utf8(bytes)
                .map_err(|e| NavigatorError::reference_table_unavailable(location, e))?
        };

        let table = Self::parse(&text);
        log::debug!("Region reference table has {} rows", table.len());
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Options for the regional level below `prefix`.
    ///
    /// `prefix` holds the already-chosen region labels, shallowest first: empty for
    /// provinces, one label for districts, two for towns. Rows matching the prefix
    /// are projected onto the next column, deduplicated and sorted.
    pub fn options_for(&self, prefix: &[&str]) -> OptionSet {
        let Some(level) = Level::from_index(Level::Province.index() + prefix.len())
            .filter(|level| level.is_regional())
        else {
            return OptionSet::default();
        };

        OptionSet::from_labels_sorted(
            self.rows
                .iter()
                .filter(|row| {
                    Level::ALL[Level::Province.index()..]
                        .iter()
                        .zip(prefix)
                        .all(|(level, wanted)| row.column(*level) == *wanted)
                })
                .map(|row| row.column(level).to_string()),
        )
    }
}

async fn fetch_text(url: &str, timeout: Duration) -> Result<String> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(NavigatorError::HttpClient)?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| NavigatorError::reference_table_unavailable(url, e))?;

    if !response.status().is_success() {
        return Err(NavigatorError::reference_table_unavailable(
            url,
            format!("HTTP {}", response.status()),
        ));
    }

    response
        .text()
        .await
        .map_err(|e| NavigatorError::reference_table_unavailable(url, e))
}
