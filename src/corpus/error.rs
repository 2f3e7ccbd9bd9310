//! Errors reported by corpus and backend collaborators

use crate::query::QueryError;
use std::io;
use std::time::Duration;
use thiserror::Error;

/// Failures while reading from the document corpus or querying the backend
#[derive(Debug, Error)]
pub enum CorpusError {
    /// Document path is not part of the corpus
    #[error("Document not found: {0}")]
    NotFound(String),

    /// Underlying read failed
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Vault root could not be enumerated
    #[error("Cannot scan vault: {0}")]
    Scan(String),

    /// Read did not complete in time
    #[error("Reading '{path}' timed out after {}ms", timeout.as_millis())]
    Timeout { path: String, timeout: Duration },

    /// Reader went away without reporting a result
    #[error("Reading '{0}' was interrupted")]
    Interrupted(String),

    /// Backend could not make sense of the query
    #[error("Backend rejected query: {0}")]
    Query(#[from] QueryError),
}
