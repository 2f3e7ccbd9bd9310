//! In-memory metadata index and query evaluation
//!
//! [`VaultIndex`] resolves wiki links between documents, keeps the
//! backlink graph, and evaluates compiled queries term by term. Both bundled
//! vaults delegate their [`PageQuery`](crate::corpus::PageQuery) support to it.

use super::document::Document;
use crate::corpus::{CorpusError, DocumentHandle, LinkSuggestion, PageRecord};
use crate::query::{self, Term, TermKind};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Outgoing link after resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    /// Document path when `exists`, otherwise the target as written
    pub target: String,
    pub exists: bool,
    pub alias: Option<String>,
}

/// Link-resolved view over a set of documents
#[derive(Debug, Clone, Default)]
pub struct VaultIndex {
    documents: BTreeMap<String, Document>,
    folders: BTreeSet<String>,
    outgoing: HashMap<String, Vec<ResolvedLink>>,
    inbound: HashMap<String, BTreeSet<String>>,
}

impl VaultIndex {
    /// Build an index; folders are derived from document paths
    #[must_use]
    pub fn build(documents: impl IntoIterator<Item = Document>) -> Self {
        let documents: BTreeMap<String, Document> = documents
            .into_iter()
            .map(|d| (d.path.clone(), d))
            .collect();

        let mut index = Self {
            documents,
            ..Self::default()
        };

        index.folders = index
            .documents
            .values()
            .flat_map(|d| d.ancestors().map(str::to_string))
            .collect();

        let mut outgoing = HashMap::new();
        let mut inbound: HashMap<String, BTreeSet<String>> = HashMap::new();
        for doc in index.documents.values() {
            let links: Vec<ResolvedLink> = doc
                .links
                .iter()
                .map(|raw| match index.resolve(&raw.target) {
                    Some(path) => ResolvedLink {
                        target: path.to_string(),
                        exists: true,
                        alias: raw.alias.clone(),
                    },
                    None => ResolvedLink {
                        target: raw.target.clone(),
                        exists: false,
                        alias: raw.alias.clone(),
                    },
                })
                .collect();

            for link in links.iter().filter(|l| l.exists) {
                inbound
                    .entry(link.target.clone())
                    .or_default()
                    .insert(doc.path.clone());
            }
            outgoing.insert(doc.path.clone(), links);
        }
        index.outgoing = outgoing;
        index.inbound = inbound;

        index
    }

    /// Add folders that hold no documents (e.g. empty directories)
    #[must_use]
    pub fn with_folders(mut self, folders: impl IntoIterator<Item = String>) -> Self {
        self.folders
            .extend(folders.into_iter().filter(|f| !f.is_empty()));
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.documents.contains_key(path)
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Document> {
        self.documents.get(path)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(String::as_str)
    }

    #[must_use]
    pub fn handle(&self, path: &str) -> Option<DocumentHandle> {
        self.documents.get(path).map(|d| DocumentHandle {
            path: d.path.clone(),
            name: d.name().to_string(),
            folder: d.folder().to_string(),
        })
    }

    /// Resolve a wiki-link target to a document path
    ///
    /// Tries the exact path, then the path with `.md` appended, then (for
    /// targets without a folder) a file-name match, preferring the
    /// shallowest document.
    #[must_use]
    pub fn resolve(&self, target: &str) -> Option<&str> {
        let target = target.trim().trim_start_matches('/');

        if let Some((path, _)) = self.documents.get_key_value(target) {
            return Some(path.as_str());
        }
        let with_ext = format!("{target}.md");
        if let Some((path, _)) = self.documents.get_key_value(with_ext.as_str()) {
            return Some(path.as_str());
        }
        if target.contains('/') {
            return None;
        }

        let file_name = if target.ends_with(".md") {
            target
        } else {
            with_ext.as_str()
        };
        self.documents
            .keys()
            .filter(|p| p.rsplit('/').next() == Some(file_name))
            .min_by_key(|p| p.matches('/').count())
            .map(String::as_str)
    }

    /// Tag usage counts: number of documents carrying each tag
    #[must_use]
    pub fn tags(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for tag in self.documents.values().flat_map(|d| d.tags.iter()) {
            *counts.entry(tag.clone()).or_insert(0) += 1;
        }
        counts
    }

    #[must_use]
    pub fn folders(&self) -> Vec<String> {
        self.folders.iter().cloned().collect()
    }

    /// Link targets: every document, then aliased targets, then unresolved ones
    #[must_use]
    pub fn link_suggestions(&self) -> Vec<LinkSuggestion> {
        let documents = self.documents.keys().map(|path| LinkSuggestion {
            path: path.clone(),
            exists: true,
            alias: None,
        });

        let mut aliased = BTreeSet::new();
        let mut unresolved = BTreeSet::new();
        for link in self.outgoing.values().flatten() {
            match (&link.alias, link.exists) {
                (Some(alias), true) => {
                    aliased.insert((link.target.clone(), alias.clone()));
                }
                (_, false) => {
                    unresolved.insert(link.target.clone());
                }
                (None, true) => {}
            }
        }

        documents
            .chain(aliased.into_iter().map(|(path, alias)| LinkSuggestion {
                path,
                exists: true,
                alias: Some(alias),
            }))
            .chain(unresolved.into_iter().map(|path| LinkSuggestion {
                path,
                exists: false,
                alias: None,
            }))
            .collect()
    }

    /// Number of distinct documents linking to `path`
    #[must_use]
    pub fn inbound_count(&self, path: &str) -> usize {
        self.inbound.get(path).map_or(0, BTreeSet::len)
    }

    #[must_use]
    pub fn outgoing(&self, path: &str) -> &[ResolvedLink] {
        self.outgoing.get(path).map(Vec::as_slice).unwrap_or_default()
    }

    #[must_use]
    pub fn record(&self, doc: &Document) -> PageRecord {
        PageRecord {
            path: doc.path.clone(),
            name: doc.name().to_string(),
            folder: doc.folder().to_string(),
            size: doc.size,
            ctime: doc.ctime,
            mtime: doc.mtime,
            inbound_links: self.inbound_count(&doc.path),
        }
    }

    /// Evaluate a compiled query against every document
    ///
    /// # Errors
    /// Returns `CorpusError::Query` if the query does not parse.
    pub fn run_query(&self, query: &str) -> Result<Vec<PageRecord>, CorpusError> {
        let terms = query::parse(query)?;

        Ok(self
            .documents
            .values()
            .filter(|doc| terms.iter().all(|term| self.matches(doc, term) != term.negated))
            .map(|doc| self.record(doc))
            .collect())
    }

    fn matches(&self, doc: &Document, term: &Term) -> bool {
        match term.kind {
            TermKind::Tag => {
                let wanted = normalize_tag(&term.target);
                doc.tags.iter().any(|tag| {
                    let tag = tag.to_lowercase();
                    tag == wanted
                        || tag
                            .strip_prefix(wanted.as_str())
                            .is_some_and(|rest| rest.starts_with('/'))
                })
            }
            TermKind::Folder => {
                let folder = term.target.trim_matches('/');
                folder.is_empty()
                    || doc.path == folder
                    || doc
                        .path
                        .strip_prefix(folder)
                        .is_some_and(|rest| rest.starts_with('/'))
            }
            TermKind::Link => {
                let target = self.resolve(&term.target).unwrap_or(term.target.trim());
                self.outgoing(&doc.path).iter().any(|l| l.target == target)
            }
            TermKind::Outgoing => self.resolve(&term.target).is_some_and(|source| {
                self.outgoing(source)
                    .iter()
                    .any(|l| l.exists && l.target == doc.path)
            }),
        }
    }
}

fn normalize_tag(tag: &str) -> String {
    let tag = tag.trim().to_lowercase();
    if tag.starts_with('#') { tag } else { format!("#{tag}") }
}

#[cfg(test)]
#[path = "index_tests.rs"]
mod index_tests;
