//! Session error types

use crate::search::SearchError;
use thiserror::Error;

/// Session result type
pub type Result<T> = std::result::Result<T, SessionError>;

/// Errors raised by session transitions and the driver
#[derive(Debug, Error)]
pub enum SessionError {
    /// Caller asked for a filter position that does not exist
    #[error("Filter index {index} out of range (session has {len} filters)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Pipeline run failed; previous results are kept
    #[error("Search failed: {0}")]
    Search(#[from] SearchError),
}
