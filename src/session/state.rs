//! Session state
//!
//! The filter set, active sort and current suggestions. Every transition
//! consumes the state and returns the next one; nothing is patched in place.

use super::error::{Result, SessionError};
use crate::filter::Filter;
use crate::search::SortOption;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Active filters in display order; no two are equal
    filters: Vec<Filter>,
    sort: Option<SortOption>,
    #[serde(skip)]
    suggestions: Vec<Filter>,
}

impl SessionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    #[must_use]
    pub const fn sort(&self) -> Option<SortOption> {
        self.sort
    }

    #[must_use]
    pub fn suggestions(&self) -> &[Filter] {
        &self.suggestions
    }

    /// Append a filter unless an equal one is already active
    #[must_use]
    pub fn add_filter(mut self, filter: Filter) -> Self {
        if !self.filters.contains(&filter) {
            self.filters.push(filter);
        }
        self
    }

    /// Remove the filter at `index`
    ///
    /// # Errors
    /// Returns `SessionError::IndexOutOfRange` if there is no such filter.
    pub fn remove_filter(mut self, index: usize) -> Result<Self> {
        let len = self.filters.len();
        if index >= len {
            return Err(SessionError::IndexOutOfRange { index, len });
        }
        self.filters.remove(index);
        Ok(self)
    }

    /// Remove the final filter, if any
    #[must_use]
    pub fn remove_last_filter(mut self) -> Self {
        self.filters.pop();
        self
    }

    /// Replace the whole filter set
    ///
    /// Later duplicates are dropped so the set stays free of equal filters.
    #[must_use]
    pub fn set_filters(self, filters: impl IntoIterator<Item = Filter>) -> Self {
        let cleared = Self {
            filters: Vec::new(),
            ..self
        };
        filters.into_iter().fold(cleared, Self::add_filter)
    }

    /// Flip `reversed` on the first filter equal to `filter`
    #[must_use]
    pub fn reverse_filter(mut self, filter: &Filter) -> Self {
        if let Some(position) = self.filters.iter().position(|f| f == filter) {
            let flipped = self.filters[position].clone().toggled();
            if self.filters.contains(&flipped) {
                self.filters.remove(position);
            } else {
                self.filters[position] = flipped;
            }
        }
        self
    }

    #[must_use]
    pub const fn set_sort(mut self, sort: Option<SortOption>) -> Self {
        self.sort = sort;
        self
    }

    /// Flip the direction of the active sort; no-op without one
    #[must_use]
    pub fn toggle_sort_direction(mut self) -> Self {
        self.sort = self.sort.map(SortOption::flipped);
        self
    }

    #[must_use]
    pub const fn clear_sort(self) -> Self {
        self.set_sort(None)
    }

    #[must_use]
    pub fn with_suggestions(mut self, suggestions: Vec<Filter>) -> Self {
        self.suggestions = suggestions;
        self
    }
}
