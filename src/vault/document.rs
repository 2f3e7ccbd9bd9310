//! Indexed document metadata

use super::markdown::{RawLink, extract_links, extract_tags};
use chrono::{DateTime, Utc};

/// Metadata the index keeps for one markdown document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Vault-relative path with `/` separators, e.g. `notes/today.md`
    pub path: String,
    pub size: u64,
    pub ctime: DateTime<Utc>,
    pub mtime: DateTime<Utc>,
    pub tags: Vec<String>,
    pub links: Vec<RawLink>,
}

impl Document {
    /// Index a markdown body; size is the body length in bytes
    #[must_use]
    pub fn from_markdown(
        path: impl Into<String>,
        body: &str,
        ctime: DateTime<Utc>,
        mtime: DateTime<Utc>,
    ) -> Self {
        Self {
            path: path.into(),
            size: body.len() as u64,
            ctime,
            mtime,
            tags: extract_tags(body),
            links: extract_links(body),
        }
    }

    /// File name without the `.md` extension
    #[must_use]
    pub fn name(&self) -> &str {
        let file_name = self.path.rsplit('/').next().unwrap_or(&self.path);
        file_name.strip_suffix(".md").unwrap_or(file_name)
    }

    /// Parent folder, empty at the vault root
    #[must_use]
    pub fn folder(&self) -> &str {
        self.path.rsplit_once('/').map_or("", |(folder, _)| folder)
    }

    /// Every ancestor folder, nearest last
    pub fn ancestors(&self) -> impl Iterator<Item = &str> {
        self.path
            .match_indices('/')
            .map(|(i, _)| &self.path[..i])
    }
}
