//! Boundary with the external collaborators
//!
//! The engine never reaches for a global vault or backend. Everything it
//! needs is passed in through these traits:
//!
//! - [`Corpus`]: tag/folder/link metadata, document bodies, and
//!   document-created notifications
//! - [`PageQuery`]: executes a compiled query and returns page records
//! - [`Navigator`]: opens a document for the user (fire-and-forget)
//!
//! [`crate::vault`] ships in-memory and filesystem implementations.

pub mod error;

pub use error::CorpusError;

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Callback invoked with the path of each newly created document
///
/// Returns whether it wants further events; corpora drop callbacks that
/// return `false`.
pub type CreatedCallback = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// A link target offered for link filters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkSuggestion {
    /// Resolved document path, or the raw target of an unresolved link
    pub path: String,
    /// Whether `path` is a real document
    pub exists: bool,
    /// Display label used by the linking document
    pub alias: Option<String>,
}

/// Lightweight reference to an existing document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentHandle {
    pub path: String,
    pub name: String,
    pub folder: String,
}

/// One page as reported by the query backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRecord {
    pub path: String,
    /// File name without extension
    pub name: String,
    /// Parent folder, empty for the vault root
    pub folder: String,
    /// Size in bytes
    pub size: u64,
    pub ctime: DateTime<Utc>,
    pub mtime: DateTime<Utc>,
    /// Number of distinct documents linking here
    pub inbound_links: usize,
}

/// Document store and metadata index
pub trait Corpus: Send + Sync {
    /// All tags with their usage counts
    fn tags(&self) -> BTreeMap<String, usize>;

    /// Link targets: documents, aliases and unresolved targets
    fn link_suggestions(&self) -> Vec<LinkSuggestion>;

    /// Folder paths, excluding the root
    fn folders(&self) -> Vec<String>;

    /// Paths of every document
    fn documents(&self) -> Vec<String>;

    /// Look up a document by path
    fn document(&self, path: &str) -> Option<DocumentHandle>;

    /// Read a document body
    ///
    /// # Errors
    /// Returns `CorpusError` if the document is unknown or cannot be read.
    fn read_document(&self, path: &str) -> Result<String, CorpusError>;

    /// Register a callback fired when a document is created
    fn subscribe_created(&self, callback: CreatedCallback);
}

/// External page-query engine
pub trait PageQuery: Send + Sync {
    /// Whether the backend is present and enabled
    fn is_available(&self) -> bool {
        true
    }

    /// Run a compiled query; the empty query matches every page
    ///
    /// # Errors
    /// Returns `CorpusError` if the query is rejected or evaluation fails.
    fn run_query(&self, query: &str) -> Result<Vec<PageRecord>, CorpusError>;
}

/// Opens a document for the user
pub trait Navigator {
    fn open(&self, path: &str);
}
