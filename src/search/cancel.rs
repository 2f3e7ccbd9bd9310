//! Run versioning for superseded pipeline runs
//!
//! Every change to the session bumps the tracker's version. A run captures a
//! [`CancellationToken`] for the version it started under and gives up as
//! soon as the tracker has moved on.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Shared counter of the newest requested run
#[derive(Debug, Clone, Default)]
pub struct VersionTracker {
    active: Arc<AtomicU64>,
}

impl VersionTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new version, cancelling tokens for every older one
    pub fn bump(&self) -> u64 {
        self.active.fetch_add(1, Ordering::SeqCst) + 1
    }

    #[must_use]
    pub fn current(&self) -> u64 {
        self.active.load(Ordering::SeqCst)
    }

    /// Token tied to the current version
    #[must_use]
    pub fn token(&self) -> CancellationToken {
        CancellationToken {
            active: Some(Arc::clone(&self.active)),
            version: self.current(),
        }
    }
}

/// Handle checked by a run to see whether it is still wanted
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    active: Option<Arc<AtomicU64>>,
    version: u64,
}

impl CancellationToken {
    /// Token that is never cancelled
    #[must_use]
    pub const fn noop() -> Self {
        Self {
            active: None,
            version: 0,
        }
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|active| active.load(Ordering::SeqCst) != self.version)
    }

    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }
}
