//! Search results
//!
//! One [`SearchResult`] per backend page that survived filtering. Results are
//! rebuilt on every pipeline run and identified by `path`.

use crate::corpus::PageRecord;
use crate::filter::Filter;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A document in the result list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    /// Document name, without extension
    pub title: String,
    /// Unique path; stable key across runs
    pub path: String,
    /// Size in bytes
    pub size: u64,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    /// Parent folder, empty for the root
    pub folder: String,
    /// Number of documents linking here
    pub backlinks: usize,
}

impl From<PageRecord> for SearchResult {
    fn from(record: PageRecord) -> Self {
        Self {
            title: record.name,
            path: record.path,
            size: record.size,
            created_at: record.ctime,
            modified_at: record.mtime,
            folder: record.folder,
            backlinks: record.inbound_links,
        }
    }
}

impl SearchResult {
    /// Filter set for "show everything in this result's folder"
    ///
    /// Returns `None` for documents at the root.
    #[must_use]
    pub fn folder_filter(&self) -> Option<Filter> {
        (!self.folder.is_empty()).then(|| Filter::folder(&self.folder))
    }

    /// Filter set for "show everything linking to this result"
    #[must_use]
    pub fn backlinks_filter(&self) -> Filter {
        Filter::link(&self.path, true)
    }
}
