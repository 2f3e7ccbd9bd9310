//! Result ordering
//!
//! Four comparators over [`SearchResult`], each ascending. Reversing swaps
//! the comparator's arguments. Ties keep the backend's order since the
//! sort is stable.

use super::result::SearchResult;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Sort key selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKind {
    #[default]
    ModifiedDate,
    Name,
    Size,
    Backlinks,
}

impl SortKind {
    pub const ALL: [Self; 4] = [Self::ModifiedDate, Self::Name, Self::Size, Self::Backlinks];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ModifiedDate => "modified_date",
            Self::Name => "name",
            Self::Size => "size",
            Self::Backlinks => "backlinks",
        }
    }

    /// Human label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ModifiedDate => "Date Modified",
            Self::Name => "Name",
            Self::Size => "Note size",
            Self::Backlinks => "Number of backlinks",
        }
    }

    /// Ascending comparison of two results by this key
    #[must_use]
    pub fn compare(self, a: &SearchResult, b: &SearchResult) -> Ordering {
        match self {
            Self::ModifiedDate => a.modified_at.cmp(&b.modified_at),
            Self::Name => compare_names(&a.title, &b.title),
            Self::Size => a.size.cmp(&b.size),
            Self::Backlinks => a.backlinks.cmp(&b.backlinks),
        }
    }
}

/// Case-insensitive, falling back to the raw strings so that the order
/// stays total
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

impl fmt::Display for SortKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown sort '{0}' (expected one of: modified_date, name, size, backlinks)")]
pub struct UnknownSort(pub String);

impl FromStr for SortKind {
    type Err = UnknownSort;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == normalized)
            .ok_or_else(|| UnknownSort(s.to_string()))
    }
}

/// Active sort choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SortOption {
    #[serde(rename = "type")]
    pub kind: SortKind,
    #[serde(default)]
    pub reverse: bool,
}

impl SortOption {
    #[must_use]
    pub const fn new(kind: SortKind, reverse: bool) -> Self {
        Self { kind, reverse }
    }

    #[must_use]
    pub const fn ascending(kind: SortKind) -> Self {
        Self::new(kind, false)
    }

    /// Same key, opposite direction
    #[must_use]
    pub const fn flipped(self) -> Self {
        Self::new(self.kind, !self.reverse)
    }

    /// Options offered to users; backlinks default to most-linked first
    #[must_use]
    pub const fn presets() -> [Self; 4] {
        [
            Self::ascending(SortKind::ModifiedDate),
            Self::ascending(SortKind::Name),
            Self::ascending(SortKind::Size),
            Self::new(SortKind::Backlinks, true),
        ]
    }

    #[must_use]
    pub fn compare(self, a: &SearchResult, b: &SearchResult) -> Ordering {
        if self.reverse {
            self.kind.compare(b, a)
        } else {
            self.kind.compare(a, b)
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = if self.reverse { "desc" } else { "asc" };
        write!(f, "{} ({arrow})", self.kind.label())
    }
}

/// Sort results in place
///
/// No sort option means modification date, oldest first.
pub fn sort_results(results: &mut [SearchResult], sort: Option<SortOption>) {
    let option = sort.unwrap_or_default();
    results.sort_by(|a, b| option.compare(a, b));
}
