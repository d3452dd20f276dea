//! Option sets: the valid labels for the next level of the funnel.
//!
//! An [`OptionSet`] never holds two options with the same label and never holds an
//! empty label. It is built either sorted (region levels, variables) or in a fixed
//! order (forecast types, where the baseline order matters).

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One selectable label, with the number of files behind it when known
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogOption {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_count: Option<u64>,
}

impl CatalogOption {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            file_count: None,
        }
    }

    pub fn with_file_count(label: impl Into<String>, file_count: u64) -> Self {
        Self {
            label: label.into(),
            file_count: Some(file_count),
        }
    }
}

/// Deduplicated, ordered set of options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSet {
    options: Vec<CatalogOption>,
}

impl OptionSet {
    /// Keep first occurrences in input order
    pub fn ordered(options: impl IntoIterator<Item = CatalogOption>) -> Self {
        let mut seen = HashSet::new();
        let options = options
            .into_iter()
            .filter(|option| !option.label.is_empty())
            .filter(|option| seen.insert(option.label.clone()))
            .collect();
        Self { options }
    }

    /// Deduplicate, then sort ascending by label
    pub fn sorted(options: impl IntoIterator<Item = CatalogOption>) -> Self {
        let mut set = Self::ordered(options);
        set.options.sort_by(|a, b| a.label.cmp(&b.label));
        set
    }

    pub fn from_labels_sorted<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::sorted(labels.into_iter().map(CatalogOption::new))
    }

    pub fn from_labels_ordered<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::ordered(labels.into_iter().map(CatalogOption::new))
    }

    /// `self` followed by the labels of `other` it does not already contain
    pub fn union(&self, other: &OptionSet) -> OptionSet {
        Self::ordered(self.options.iter().chain(other.options.iter()).cloned())
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.options.iter().any(|option| option.label == label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogOption> {
        self.options.iter()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.label.as_str()).collect()
    }

    /// Option at a 1-based position, as shown to the user
    pub fn nth(&self, index: usize) -> Option<&CatalogOption> {
        index.checked_sub(1).and_then(|i| self.options.get(i))
    }
}
