//! Common assertion helpers for test output validation
//!
//! Provides predicates for validating forecast-navigator command output and
//! error messages.

#![allow(dead_code)]

use predicates::prelude::*;

/// Breadcrumb header for the given path, `-` when nothing is selected
pub fn has_path(path: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("Path: {path}\n"))
}

/// Section header naming the stage being chosen
pub fn has_stage(title: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("➤ {title}:"))
}

/// Numbered option line
pub fn has_option(index: u32, label: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("[{index}] {label}"))
}

/// Error line with its localized message
pub fn has_error(message: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("✕ Error: {message}"))
}

pub fn has_warning(message: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("! Warning: {message}"))
}

/// Warning printed when the forecast types fell back to the baseline
pub fn forecast_types_fell_back() -> impl Predicate<str> {
    has_warning("데이터를 불러오는데 실패했습니다.")
}
