//! Output formatting for CLI display
//!
//! This module renders results, filters and suggestions for the terminal,
//! plus JSON for scripting.

use crate::filter::{Filter, FilterType};
use crate::search::{SearchResult, SortOption};
use byte_unit::{Byte, UnitType};
use chrono::{DateTime, Local, Utc};
use colored::Colorize;

/// Human-readable size, e.g. `2 KiB`
#[must_use]
pub fn format_size(bytes: u64) -> String {
    Byte::from_u64(bytes)
        .get_appropriate_unit(UnitType::Binary)
        .to_string()
}

/// Local date and time, minute precision
#[must_use]
pub fn format_date(timestamp: DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

/// Format one result row
#[must_use]
pub fn result_line(result: &SearchResult, quiet: bool) -> String {
    if quiet {
        return result.path.clone();
    }

    let folder = if result.folder.is_empty() {
        "/".to_string()
    } else {
        result.folder.clone()
    };
    format!(
        "  {} {}  {}  {}  {} backlink(s)",
        result.title.bold(),
        folder.dimmed(),
        format_size(result.size),
        format_date(result.modified_at),
        result.backlinks
    )
}

/// Format an active filter with its description
#[must_use]
pub fn filter_line(filter: &Filter) -> String {
    let description = filter.describe();
    let colored = match filter.filter_type() {
        FilterType::Tag => description.cyan(),
        FilterType::Folder => description.blue(),
        FilterType::Link | FilterType::Backlink => description.magenta(),
        FilterType::Text => description.yellow(),
    };
    if filter.reversed {
        format!("  {}", colored.strikethrough())
    } else {
        format!("  {colored}")
    }
}

/// Format a suggestion; quiet mode prints the textual filter syntax only
#[must_use]
pub fn suggestion_line(filter: &Filter, quiet: bool) -> String {
    if quiet {
        filter.to_string()
    } else {
        format!("  {}  {}", filter.to_string().green(), filter.describe().dimmed())
    }
}

/// Footer below a page of results
#[must_use]
pub fn page_footer(shown: usize, total: usize, sort: Option<SortOption>) -> String {
    let sort = sort.unwrap_or_default();
    format!("Showing {shown} of {total} result(s), sorted by {sort}")
}

/// Hint shown when more suggestions matched than were printed
#[must_use]
pub fn truncated_hint() -> String {
    "  ... keep typing to narrow down".dimmed().to_string()
}

/// Results as pretty JSON
///
/// # Errors
/// Returns `serde_json::Error` if serialization fails.
pub fn results_json(results: &[SearchResult]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(results)
}
