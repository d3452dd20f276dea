//! Type-safe selection levels.
//!
//! This module defines [`Level`], the five ordered stages of the selection funnel,
//! and [`Stage`], which adds the terminal file-selection stage.
//!
//! # Public API
//! - [`Level`]: forecast type, province, district, town, variable
//! - [`Stage`]: where the user currently is (a level, or the file list)

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the five ordered selection levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    ForecastType,
    Province,
    District,
    Town,
    Variable,
}

impl Level {
    /// All levels, shallowest first
    pub const ALL: [Level; 5] = [
        Level::ForecastType,
        Level::Province,
        Level::District,
        Level::Town,
        Level::Variable,
    ];

    /// Number of selectable levels
    pub const COUNT: usize = Self::ALL.len();

    /// Zero-based position in the funnel
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Level> {
        Self::ALL.get(index).copied()
    }

    /// The level after this one, `None` for the variable level
    pub fn next(self) -> Option<Level> {
        Self::from_index(self.index() + 1)
    }

    /// Levels backed by the static region reference table
    pub fn is_regional(self) -> bool {
        matches!(self, Level::Province | Level::District | Level::Town)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Level::ForecastType => "forecast type",
            Level::Province => "province",
            Level::District => "district",
            Level::Town => "town",
            Level::Variable => "variable",
        }
    }

    /// Heading shown above the option list
    pub fn title(self) -> &'static str {
        match self {
            Level::ForecastType => "예보 유형",
            Level::Province => "시/도",
            Level::District => "구/군",
            Level::Town => "동/읍/면",
            Level::Variable => "예보 변수",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Current position in the funnel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Choosing a value for this level
    Choose(Level),
    /// Every level is set, choosing among files
    Files,
}

impl Stage {
    /// Stage reached after `depth` levels have been selected
    pub fn at_depth(depth: usize) -> Stage {
        match Level::from_index(depth) {
            Some(level) => Stage::Choose(level),
            None => Stage::Files,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Stage::Choose(level) => level.title(),
            Stage::Files => "파일",
        }
    }
}
