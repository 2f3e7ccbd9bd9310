//! Filesystem vault
//!
//! Indexes every `*.md` file under a root directory (hidden entries such as
//! `.obsidian/` are skipped). Bodies are read lazily and cached; call
//! [`FsVault::rescan`] to pick up changes on disk.

use super::document::Document;
use super::index::VaultIndex;
use crate::corpus::{
    Corpus, CorpusError, CreatedCallback, DocumentHandle, LinkSuggestion, Navigator, PageQuery,
    PageRecord,
};
use chrono::{DateTime, Utc};
use glob::MatchOptions;
use moka::sync::Cache;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError, RwLock};

/// Default number of cached document bodies
pub const DEFAULT_CACHE_CAPACITY: u64 = 1000;

/// Corpus and page-query backend over a directory of markdown files
pub struct FsVault {
    root: PathBuf,
    index: RwLock<VaultIndex>,
    bodies: Cache<String, String>,
    subscribers: Mutex<Vec<CreatedCallback>>,
}

impl FsVault {
    /// Open and index a vault
    ///
    /// # Errors
    /// Returns `CorpusError` if the root cannot be scanned.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, CorpusError> {
        Self::with_cache_capacity(root, DEFAULT_CACHE_CAPACITY)
    }

    /// Open a vault caching at most `capacity` bodies
    ///
    /// # Errors
    /// Returns `CorpusError` if the root cannot be scanned.
    pub fn with_cache_capacity(root: impl AsRef<Path>, capacity: u64) -> Result<Self, CorpusError> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(CorpusError::NotFound(root.display().to_string()));
        }

        let index = scan(&root)?;
        tracing::debug!(root = %root.display(), documents = index.len(), "indexed vault");

        Ok(Self {
            root,
            index: RwLock::new(index),
            bodies: Cache::builder().max_capacity(capacity).build(),
            subscribers: Mutex::new(Vec::new()),
        })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Re-index the vault from disk
    ///
    /// Cached bodies are dropped. Created-callbacks fire for each document
    /// that was not indexed before; the new paths are also returned.
    ///
    /// # Errors
    /// Returns `CorpusError` if the root cannot be scanned.
    pub fn rescan(&self) -> Result<Vec<String>, CorpusError> {
        let fresh = scan(&self.root)?;

        let created: Vec<String> = {
            let mut index = self.index.write().unwrap_or_else(PoisonError::into_inner);
            let created = {
                let known: HashSet<&str> = index.paths().collect();
                fresh
                    .paths()
                    .filter(|p| !known.contains(p))
                    .map(str::to_string)
                    .collect()
            };
            *index = fresh;
            created
        };
        self.bodies.invalidate_all();

        tracing::debug!(created = created.len(), "rescanned vault");
        let mut subscribers = self.subscribers.lock().unwrap_or_else(PoisonError::into_inner);
        for path in &created {
            subscribers.retain(|callback| callback(path));
        }

        Ok(created)
    }

    fn with_index<T>(&self, f: impl FnOnce(&VaultIndex) -> T) -> T {
        let index = self.index.read().unwrap_or_else(PoisonError::into_inner);
        f(&index)
    }
}

fn scan(root: &Path) -> Result<VaultIndex, CorpusError> {
    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::default()
    };
    let pattern = format!("{}/**/*", glob::Pattern::escape(&root.to_string_lossy()));
    let entries =
        glob::glob_with(&pattern, options).map_err(|e| CorpusError::Scan(format!("{pattern}: {e}")))?;

    let mut documents = Vec::new();
    let mut folders = Vec::new();
    for entry in entries {
        let full = entry.map_err(|e| CorpusError::Io {
            path: e.path().display().to_string(),
            source: e.into_error(),
        })?;
        let Some(relative) = relative_path(root, &full) else {
            continue;
        };

        if full.is_dir() {
            folders.push(relative);
        } else if relative.ends_with(".md") {
            documents.push(load_document(&full, relative)?);
        }
    }

    Ok(VaultIndex::build(documents).with_folders(folders))
}

fn relative_path(root: &Path, full: &Path) -> Option<String> {
    let relative = full.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

fn load_document(full: &Path, relative: String) -> Result<Document, CorpusError> {
    let io_error = |source| CorpusError::Io {
        path: relative.clone(),
        source,
    };

    let metadata = fs::metadata(full).map_err(io_error)?;
    let bytes = fs::read(full).map_err(io_error)?;
    let body = String::from_utf8_lossy(&bytes);

    let mtime: DateTime<Utc> = metadata.modified().map_err(io_error)?.into();
    let ctime: DateTime<Utc> = metadata.created().map_or(mtime, Into::into);

    let mut document = Document::from_markdown(relative.clone(), &body, ctime, mtime);
    document.size = metadata.len();
    Ok(document)
}

impl Corpus for FsVault {
    fn tags(&self) -> BTreeMap<String, usize> {
        self.with_index(VaultIndex::tags)
    }

    fn link_suggestions(&self) -> Vec<LinkSuggestion> {
        self.with_index(VaultIndex::link_suggestions)
    }

    fn folders(&self) -> Vec<String> {
        self.with_index(VaultIndex::folders)
    }

    fn documents(&self) -> Vec<String> {
        self.with_index(|index| index.paths().map(str::to_string).collect())
    }

    fn document(&self, path: &str) -> Option<DocumentHandle> {
        self.with_index(|index| index.handle(path))
    }

    fn read_document(&self, path: &str) -> Result<String, CorpusError> {
        if let Some(body) = self.bodies.get(path) {
            return Ok(body);
        }
        if !self.with_index(|index| index.contains(path)) {
            return Err(CorpusError::NotFound(path.to_string()));
        }

        let bytes = fs::read(self.root.join(path)).map_err(|source| CorpusError::Io {
            path: path.to_string(),
            source,
        })?;
        let body = String::from_utf8_lossy(&bytes).into_owned();
        self.bodies.insert(path.to_string(), body.clone());
        Ok(body)
    }

    fn subscribe_created(&self, callback: CreatedCallback) {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(callback);
    }
}

impl PageQuery for FsVault {
    fn run_query(&self, query: &str) -> Result<Vec<PageRecord>, CorpusError> {
        self.with_index(|index| index.run_query(query))
    }
}

/// Opens documents with the system's default application
#[derive(Debug, Clone)]
pub struct SystemOpener {
    root: PathBuf,
}

impl SystemOpener {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Navigator for SystemOpener {
    fn open(&self, path: &str) {
        let full = self.root.join(path);
        if let Err(e) = open::that_detached(&full) {
            tracing::warn!(path = %full.display(), error = %e, "failed to open document");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TempVault;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_open_indexes_markdown_files() {
        let temp = TempVault::sample();
        temp.write("attachments/image.png", "binary");
        temp.write(".obsidian/workspace.md", "#hidden");
        let vault = FsVault::open(temp.path()).unwrap();

        let mut docs = vault.documents();
        docs.sort();
        assert_eq!(
            docs,
            vec![
                "alpha.md",
                "archive/old.md",
                "index.md",
                "notes/beta.md",
                "notes/daily/today.md"
            ]
        );
        assert!(vault.folders().contains(&"attachments".to_string()));
        assert!(!vault.tags().contains_key("#hidden"));
    }

    #[test]
    fn test_open_missing_root() {
        assert!(matches!(
            FsVault::open("/definitely/not/a/vault"),
            Err(CorpusError::NotFound(_))
        ));
    }

    #[test]
    fn test_read_document_caches_until_rescan() {
        let temp = TempVault::sample();
        let vault = FsVault::open(temp.path()).unwrap();

        assert_eq!(vault.read_document("notes/daily/today.md").unwrap(), "#daily plain day");
        temp.write("notes/daily/today.md", "rewritten");
        assert_eq!(vault.read_document("notes/daily/today.md").unwrap(), "#daily plain day");

        vault.rescan().unwrap();
        assert_eq!(vault.read_document("notes/daily/today.md").unwrap(), "rewritten");
        assert!(matches!(vault.read_document("nope.md"), Err(CorpusError::NotFound(_))));
    }

    #[test]
    fn test_rescan_reports_created_documents() {
        let temp = TempVault::sample();
        let vault = FsVault::open(temp.path()).unwrap();
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        vault.subscribe_created(Box::new(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
            true
        }));

        temp.write("inbox/new.md", "#fresh");
        let created = vault.rescan().unwrap();
        assert_eq!(created, vec!["inbox/new.md"]);
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(vault.tags().contains_key("#fresh"));

        assert!(vault.rescan().unwrap().is_empty());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_query_over_disk() {
        let temp = TempVault::sample();
        let vault = FsVault::open(temp.path()).unwrap();
        let records = vault.run_query("#project and !\"archive\"").unwrap();
        let paths: Vec<_> = records.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["alpha.md", "index.md"]);
        assert_eq!(records[1].inbound_links, 1);
    }
}
