//! Testing utilities for desk
//!
//! Fixture builders shared by the unit tests: a small linked sample vault,
//! page records with controlled metadata, a temporary on-disk vault, and a
//! navigator that records what it was asked to open.
//!
//! Only available when compiled with `cfg(test)`.

use crate::corpus::{Navigator, PageRecord};
use crate::vault::{Document, MemoryVault, VaultIndex};
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;

/// Sample vault: paths and bodies
///
/// - `index.md` links to alpha, beta (aliased) and an unresolved `ghost`
/// - `alpha.md` and `notes/beta.md` link to each other
/// - `archive/old.md` links back to the index
pub const SAMPLE: &[(&str, &str)] = &[
    (
        "index.md",
        "#project hub for [[alpha]] and [[notes/beta|Beta]], see also [[ghost]]",
    ),
    ("alpha.md", "#project/sub alpha mentions the Needle. [[notes/beta]]"),
    ("notes/beta.md", "#area beta text [[alpha]]"),
    ("notes/daily/today.md", "#daily plain day"),
    ("archive/old.md", "#project archived [[index]]"),
];

/// Fixed point in time, `minutes` after a constant epoch
#[must_use]
pub fn at(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
        + Duration::minutes(minutes)
}

/// Index a markdown body with deterministic timestamps
#[must_use]
pub fn document(path: &str, body: &str, minutes: i64) -> Document {
    Document::from_markdown(path, body, at(0), at(minutes))
}

/// The sample vault as an index; each document is modified one minute
/// after the previous one in `SAMPLE` order
#[must_use]
pub fn sample_index() -> VaultIndex {
    VaultIndex::build(
        SAMPLE
            .iter()
            .zip(0..)
            .map(|((path, body), i)| document(path, body, i)),
    )
}

/// The sample vault as an in-memory corpus and backend
#[must_use]
pub fn sample_vault() -> MemoryVault {
    let vault = MemoryVault::new();
    for ((path, body), i) in SAMPLE.iter().zip(0..) {
        vault.insert_at(path, body, at(0), at(i));
    }
    vault
}

/// Page record with controlled sort keys
#[must_use]
pub fn record(path: &str, size: u64, minutes: i64, inbound_links: usize) -> PageRecord {
    let name = path.rsplit('/').next().unwrap_or(path).trim_end_matches(".md");
    PageRecord {
        path: path.to_string(),
        name: name.to_string(),
        folder: path.rsplit_once('/').map_or("", |(f, _)| f).to_string(),
        size,
        ctime: at(0),
        mtime: at(minutes),
        inbound_links,
    }
}

/// Temporary on-disk vault, removed on drop
pub struct TempVault {
    dir: TempDir,
}

impl TempVault {
    /// # Panics
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp vault"),
        }
    }

    /// Temporary vault populated with `SAMPLE`
    #[must_use]
    pub fn sample() -> Self {
        let vault = Self::new();
        for (path, body) in SAMPLE {
            vault.write(path, body);
        }
        vault
    }

    /// Write a file, creating parent folders
    ///
    /// # Panics
    /// Panics if the file cannot be written.
    pub fn write(&self, path: &str, body: &str) {
        let full = self.dir.path().join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).expect("Failed to create folder");
        }
        fs::write(full, body).expect("Failed to write file");
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// Navigator that records opened paths instead of opening them
#[derive(Debug, Default)]
pub struct MockNavigator {
    opened: Mutex<Vec<String>>,
}

impl MockNavigator {
    #[must_use]
    pub fn opened(&self) -> Vec<String> {
        self.opened
            .lock()
            .map(|opened| opened.clone())
            .unwrap_or_default()
    }
}

impl Navigator for MockNavigator {
    fn open(&self, path: &str) {
        if let Ok(mut opened) = self.opened.lock() {
            opened.push(path.to_string());
        }
    }
}
