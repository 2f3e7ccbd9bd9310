//! Desk - faceted filtering over a linked markdown vault
//!
//! This library composes tag, folder, link, backlink and text filters into
//! a query for a page-query backend, applies text filters locally, and
//! serves sorted results in batches.
//!
//! - [`filter`]: the filter model
//! - [`query`]: compiling filters into the backend grammar
//! - [`corpus`]: traits for the corpus, backend and navigation sink
//! - [`vault`]: bundled in-memory and filesystem implementations
//! - [`suggest`]: suggestion aggregation and narrowing
//! - [`search`]: the result pipeline and sorting
//! - [`session`]: session state, pagination and the [`session::Desk`] driver

use thiserror::Error;

pub mod cli;
pub mod config;
pub mod corpus;
pub mod filter;
pub mod output;
pub mod query;
pub mod search;
pub mod session;
pub mod suggest;
pub mod vault;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum DeskError {
    /// Filter could not be parsed
    #[error("Filter error: {0}")]
    Filter(#[from] filter::FilterError),
    /// Filters could not be compiled
    #[error("Query error: {0}")]
    Query(#[from] query::QueryError),
    /// Corpus or backend failure
    #[error("Vault error: {0}")]
    Corpus(#[from] corpus::CorpusError),
    /// Pipeline run failed
    #[error("Search error: {0}")]
    Search(#[from] search::SearchError),
    /// Session operation failed
    #[error("Session error: {0}")]
    Session(#[from] session::SessionError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    /// JSON output failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for desk operations
pub type Result<T> = std::result::Result<T, DeskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversions() {
        let err: DeskError = session::SessionError::IndexOutOfRange { index: 1, len: 0 }.into();
        assert!(err.to_string().starts_with("Session error"));

        let err: DeskError = search::SearchError::BackendUnavailable.into();
        assert_eq!(err.to_string(), "Search error: Query backend is not available");

        let err: DeskError = "colour:red".parse::<filter::Filter>().unwrap_err().into();
        assert!(matches!(err, DeskError::Filter(_)));
    }
}
