//! Error types for filter construction and parsing
//!
//! Filters are closed sum types, so the only failures are in turning user
//! text (`tag:#project`, `!folder:notes`) into a [`Filter`](super::Filter).

use super::types::FilterType;
use thiserror::Error;

/// Errors that can occur while building a filter from text
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    /// Input is not of the form `[!]kind:value`
    #[error("Invalid filter '{0}': expected [!]kind:value")]
    InvalidFormat(String),

    /// Kind prefix is not one of tag, folder, link, backlink, text
    #[error("Unknown filter kind '{0}' (expected tag, folder, link, backlink or text)")]
    UnknownKind(String),

    /// Non-text filters need a value to match against
    #[error("Filter of kind '{0}' needs a non-empty value")]
    EmptyValue(FilterType),

    /// Tags are single words
    #[error("Invalid tag '{0}': tags cannot contain whitespace")]
    InvalidTag(String),
}
