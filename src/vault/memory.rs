//! In-memory vault
//!
//! Holds document bodies alongside a [`VaultIndex`]. Useful for embedding
//! the engine over documents that do not live on disk, and as the fixture
//! corpus in tests.

use super::document::Document;
use super::index::VaultIndex;
use crate::corpus::{
    Corpus, CorpusError, CreatedCallback, DocumentHandle, LinkSuggestion, PageQuery, PageRecord,
};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError, RwLock};

#[derive(Default)]
struct State {
    documents: Vec<Document>,
    bodies: HashMap<String, String>,
    index: VaultIndex,
}

/// Corpus and page-query backend over documents held in memory
pub struct MemoryVault {
    state: RwLock<State>,
    subscribers: Mutex<Vec<CreatedCallback>>,
    backend_enabled: AtomicBool,
}

impl Default for MemoryVault {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryVault {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State::default()),
            subscribers: Mutex::new(Vec::new()),
            backend_enabled: AtomicBool::new(true),
        }
    }

    /// Insert or replace a document, timestamped now
    ///
    /// Returns `true` if the document is new; created-callbacks fire only
    /// in that case.
    pub fn insert(&self, path: &str, body: &str) -> bool {
        let now = Utc::now();
        self.insert_at(path, body, now, now)
    }

    /// Insert or replace a document with explicit timestamps
    pub fn insert_at(
        &self,
        path: &str,
        body: &str,
        ctime: DateTime<Utc>,
        mtime: DateTime<Utc>,
    ) -> bool {
        let created = {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            let created = !state.bodies.contains_key(path);

            state.documents.retain(|d| d.path != path);
            state
                .documents
                .push(Document::from_markdown(path, body, ctime, mtime));
            state.bodies.insert(path.to_string(), body.to_string());
            state.index = VaultIndex::build(state.documents.iter().cloned());
            created
        };

        if created {
            self.subscribers
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .retain(|callback| callback(path));
        }
        created
    }

    /// Remove a document; returns whether it existed
    pub fn remove(&self, path: &str) -> bool {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if state.bodies.remove(path).is_none() {
            return false;
        }
        state.documents.retain(|d| d.path != path);
        state.index = VaultIndex::build(state.documents.iter().cloned());
        true
    }

    /// Number of registered created-callbacks
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Enable or disable the page-query backend
    pub fn set_backend_enabled(&self, enabled: bool) {
        self.backend_enabled.store(enabled, Ordering::SeqCst);
    }

    fn with_index<T>(&self, f: impl FnOnce(&VaultIndex) -> T) -> T {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&state.index)
    }
}

impl Corpus for MemoryVault {
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
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state
            .bodies
            .get(path)
            .cloned()
            .ok_or_else(|| CorpusError::NotFound(path.to_string()))
    }

    fn subscribe_created(&self, callback: CreatedCallback) {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(callback);
    }
}

impl PageQuery for MemoryVault {
    fn is_available(&self) -> bool {
        self.backend_enabled.load(Ordering::SeqCst)
    }

    fn run_query(&self, query: &str) -> Result<Vec<PageRecord>, CorpusError> {
        self.with_index(|index| index.run_query(query))
    }
}
