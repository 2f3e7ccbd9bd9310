//! Query compilation and parsing errors

use crate::filter::FilterType;
use thiserror::Error;

/// Errors produced while compiling filters or parsing a compiled query
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    /// The filter kind has no term in the backend grammar
    #[error("Filter kind '{0}' cannot be compiled into a backend query")]
    UnsupportedFilterKind(FilterType),

    /// The query string does not follow `term (" and " term)*`
    #[error("Query syntax error at byte {position}: {message}")]
    Syntax { position: usize, message: String },
}
