//! Suggestion aggregation
//!
//! Builds the universe of selectable filters from the corpus: every tag,
//! folder, link target, and (as backlink probes) every document. Results
//! are deduplicated by [`FilterKey`](crate::filter::FilterKey) and ordered
//! by value length, shortest first. The sort is stable, so equal lengths
//! keep source order: tags, folders, links, backlinks.
//!
//! The whole set is recomputed on demand; there is no incremental diffing.

use crate::corpus::Corpus;
use crate::filter::Filter;
use std::collections::HashSet;

/// Default cap on narrowed suggestions shown to the user
pub const MAX_SUGGESTIONS: usize = 50;

/// Collect, deduplicate and order suggestions from all corpus sources
#[must_use]
pub fn collect_suggestions<C: Corpus + ?Sized>(corpus: &C) -> Vec<Filter> {
    let tags = corpus.tags().into_keys().map(Filter::tag);
    let folders = corpus.folders().into_iter().map(Filter::folder);
    let links = corpus.link_suggestions().into_iter().map(|s| match s.alias {
        Some(alias) => Filter::link_with_alias(s.path, s.exists, alias),
        None => Filter::link(s.path, s.exists),
    });
    let backlinks = corpus.documents().into_iter().map(Filter::backlink);

    let mut suggestions = dedup(tags.chain(folders).chain(links).chain(backlinks));
    order_by_length(&mut suggestions);

    tracing::debug!(count = suggestions.len(), "collected suggestions");
    suggestions
}

/// Drop empty values and repeated keys, keeping first occurrences
#[must_use]
pub fn dedup(suggestions: impl IntoIterator<Item = Filter>) -> Vec<Filter> {
    let mut seen = HashSet::new();
    suggestions
        .into_iter()
        .filter(|f| !f.value.is_empty())
        .filter(|f| seen.insert(f.key()))
        .collect()
}

/// Stable sort by value length in characters
pub fn order_by_length(suggestions: &mut [Filter]) {
    suggestions.sort_by_key(|f| f.value.chars().count());
}

/// Suggestions narrowed to the user's current input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Narrowed {
    /// Text filter for the raw input first, then matching suggestions
    pub filters: Vec<Filter>,
    /// More suggestions matched than fit under the cap
    pub truncated: bool,
}

/// Narrow suggestions to those matching `input`
///
/// A suggestion matches when its value contains `input` case-insensitively
/// and no active filter already targets the same kind and value. The
/// in-progress text filter for `input` always comes first and counts
/// towards `max`.
#[must_use]
pub fn narrow(suggestions: &[Filter], input: &str, active: &[Filter], max: usize) -> Narrowed {
    let needle = input.to_lowercase();
    let mut matching = suggestions
        .iter()
        .filter(|s| s.value.to_lowercase().contains(&needle))
        .filter(|s| !active.iter().any(|a| a.same_target(s)));

    let mut filters = Vec::with_capacity(max.min(suggestions.len() + 1));
    if max > 0 {
        filters.push(Filter::text(input));
    }
    filters.extend(matching.by_ref().take(max.saturating_sub(1)).cloned());
    let truncated = matching.next().is_some();

    Narrowed { filters, truncated }
}
