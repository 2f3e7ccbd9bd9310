//! Search-specific error types
//!
//! Errors raised while running the result pipeline: a missing backend, a
//! failed backend query, a failed or stalled document fetch during local
//! text matching, and runs abandoned because a newer one started.

use crate::corpus::CorpusError;
use crate::query::QueryError;
use thiserror::Error;

/// Result pipeline errors
#[derive(Debug, Error)]
pub enum SearchError {
    /// No page-query backend is installed or enabled
    #[error("Query backend is not available")]
    BackendUnavailable,

    /// Backend failed to run the compiled query
    #[error("Backend error: {0}")]
    Backend(#[source] CorpusError),

    /// A document body could not be fetched for text matching
    #[error("Failed to fetch '{path}': {source}")]
    DocumentFetch {
        path: String,
        #[source]
        source: CorpusError,
    },

    /// Filters could not be compiled
    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    /// A newer run started before this one finished
    #[error("Search was superseded by a newer run")]
    Superseded,
}

impl SearchError {
    /// Whether the run was abandoned rather than failed
    #[must_use]
    pub const fn is_superseded(&self) -> bool {
        matches!(self, Self::Superseded)
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
