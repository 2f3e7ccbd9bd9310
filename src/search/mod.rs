//! Result pipeline
//!
//! Turns a filter set into an ordered list of [`SearchResult`]s:
//! 1. Compile backend-expressible filters and run the query
//! 2. Match text filters locally against document bodies
//! 3. Map backend records and sort them

pub mod cancel;
pub mod error;
pub mod pipeline;
pub mod result;
pub mod sort;
pub mod text;

pub use cancel::{CancellationToken, VersionTracker};
pub use error::SearchError;
pub use pipeline::{DEFAULT_FETCH_TIMEOUT, Pipeline};
pub use result::SearchResult;
pub use sort::{SortKind, SortOption, UnknownSort, sort_results};
pub use text::TextMatcher;
