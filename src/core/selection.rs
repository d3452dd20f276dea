//! The selection path value object.
//!
//! [`SelectionPath`] holds the labels chosen so far, shallowest first. Slot *i* is
//! only ever set when slots *0..i-1* are set, and truncating at a level drops every
//! deeper slot with it. Full prefixes convert into [`RegionPath`] and
//! [`ResolvedPath`], the typed query parameters of the remote catalog.

use crate::core::error::{NavigatorError, Result};
use crate::core::level::{Level, Stage};
use serde::{Deserialize, Serialize};

/// Ordered selection of at most five labels
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct SelectionPath {
    slots: Vec<String>,
}

impl SelectionPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of levels currently selected
    pub fn depth(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.slots.len() == Level::COUNT
    }

    pub fn get(&self, level: Level) -> Option<&str> {
        self.slots.get(level.index()).map(String::as_str)
    }

    /// Deepest selected level, if any
    pub fn deepest(&self) -> Option<Level> {
        self.depth().checked_sub(1).and_then(Level::from_index)
    }

    pub fn stage(&self) -> Stage {
        Stage::at_depth(self.depth())
    }

    /// Set `level` to `value`, dropping every deeper slot.
    ///
    /// `level` may be any already-selected level or the next one; anything deeper
    /// would leave a gap and is rejected.
    pub(crate) fn set(&mut self, level: Level, value: impl Into<String>) -> Result<()> {
        if level.index() > self.depth() {
            return Err(NavigatorError::level_out_of_order(level, self.depth()));
        }
        self.slots.truncate(level.index());
        self.slots.push(value.into());
        Ok(())
    }

    /// Remove the deepest slot and return it
    pub(crate) fn pop(&mut self) -> Option<String> {
        self.slots.pop()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Level, &str)> {
        Level::ALL
            .into_iter()
            .zip(self.slots.iter().map(String::as_str))
    }

    pub fn labels(&self) -> &[String] {
        &self.slots
    }

    /// Path down to the town, available once four levels are set
    pub fn region(&self) -> Option<RegionPath> {
        if self.depth() < Level::Variable.index() {
            return None;
        }
        Some(RegionPath {
            forecast_type: self.slots[0].clone(),
            province: self.slots[1].clone(),
            district: self.slots[2].clone(),
            town: self.slots[3].clone(),
        })
    }

    /// Fully resolved path, available once all five levels are set
    pub fn resolved(&self) -> Option<ResolvedPath> {
        let region = self.region()?;
        let variable = self.get(Level::Variable)?.to_string();
        Some(ResolvedPath { region, variable })
    }

    /// Breadcrumb text, e.g. `단기예보 › 서울 › 강남구`
    pub fn breadcrumb(&self) -> String {
        self.slots.join(" › ")
    }
}

impl TryFrom<Vec<String>> for SelectionPath {
    type Error = String;

    fn try_from(slots: Vec<String>) -> std::result::Result<Self, Self::Error> {
        if slots.len() > Level::COUNT {
            return Err(format!(
                "selection path has {} slots, at most {} allowed",
                slots.len(),
                Level::COUNT
            ));
        }
        Ok(Self { slots })
    }
}

impl From<SelectionPath> for Vec<String> {
    fn from(path: SelectionPath) -> Self {
        path.slots
    }
}

/// Forecast type plus the three region levels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionPath {
    pub forecast_type: String,
    pub province: String,
    pub district: String,
    pub town: String,
}

impl RegionPath {
    /// Query parameters understood by the catalog (`city` carries the province)
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("forecast_type", self.forecast_type.as_str()),
            ("city", self.province.as_str()),
            ("district", self.district.as_str()),
            ("town", self.town.as_str()),
        ]
    }
}

/// All five levels, enough to address a variable directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPath {
    pub region: RegionPath,
    pub variable: String,
}

impl ResolvedPath {
    pub fn new(
        forecast_type: impl Into<String>,
        province: impl Into<String>,
        district: impl Into<String>,
        town: impl Into<String>,
        variable: impl Into<String>,
    ) -> Self {
        Self {
            region: RegionPath {
                forecast_type: forecast_type.into(),
                province: province.into(),
                district: district.into(),
                town: town.into(),
            },
            variable: variable.into(),
        }
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = self.region.query_pairs();
        pairs.push(("variable", self.variable.as_str()));
        pairs
    }
}
