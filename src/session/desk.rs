//! Session driver
//!
//! [`Desk`] owns the session state and the current results. Mutations only
//! mark the session dirty and bump the run version; [`Desk::tick`] performs
//! at most one pipeline run for however many mutations came before it.
//!
//! Corpus change notifications may arrive from any thread. They flag the
//! suggestions for recomputation and cancel an in-flight run, which is then
//! retried on the next tick.

use super::error::{Result, SessionError};
use super::pager::Pager;
use super::state::SessionState;
use crate::config::DeskConfig;
use crate::corpus::{Corpus, Navigator, PageQuery};
use crate::filter::{Filter, FilterKind};
use crate::search::{Pipeline, SearchError, SearchResult, SortOption, VersionTracker};
use crate::suggest::{self, MAX_SUGGESTIONS, Narrowed};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

/// What a call to [`Desk::tick`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing changed since the last run
    Idle,
    /// Results were replaced
    Updated { results: usize },
    /// The run was overtaken by a newer change; still dirty
    Superseded,
}

#[derive(Debug, Default)]
struct Signals {
    corpus_changed: AtomicBool,
    tracker: VersionTracker,
}

impl Signals {
    fn notify_corpus_changed(&self) {
        self.corpus_changed.store(true, Ordering::SeqCst);
        self.tracker.bump();
    }
}

/// Thread-safe handle for poking a [`Desk`] from elsewhere
#[derive(Debug, Clone)]
pub struct DeskHandle {
    signals: Weak<Signals>,
}

impl DeskHandle {
    /// Report a corpus change; returns `false` if the desk is gone
    pub fn notify_corpus_changed(&self) -> bool {
        self.signals
            .upgrade()
            .map(|signals| signals.notify_corpus_changed())
            .is_some()
    }
}

/// Session driver over a corpus and page-query backend
pub struct Desk<C: ?Sized, B: ?Sized> {
    pipeline: Pipeline<C, B>,
    state: SessionState,
    results: Vec<SearchResult>,
    pager: Pager,
    signals: Arc<Signals>,
    dirty: bool,
    max_suggestions: usize,
}

impl<C, B> Desk<C, B>
where
    C: Corpus + ?Sized + 'static,
    B: PageQuery + ?Sized,
{
    /// Create a desk and subscribe to document-created events
    ///
    /// Suggestions are collected immediately; the first [`tick`](Self::tick)
    /// runs the empty filter set.
    pub fn new(corpus: Arc<C>, backend: Arc<B>) -> Self {
        let signals = Arc::new(Signals::default());

        let weak = Arc::downgrade(&signals);
        corpus.subscribe_created(Box::new(move |path| {
            let Some(signals) = weak.upgrade() else {
                return false;
            };
            tracing::debug!(path, "document created");
            signals.notify_corpus_changed();
            true
        }));

        let state = SessionState::new().with_suggestions(suggest::collect_suggestions(&*corpus));

        Self {
            pipeline: Pipeline::new(corpus, backend),
            state,
            results: Vec::new(),
            pager: Pager::default(),
            signals,
            dirty: true,
            max_suggestions: MAX_SUGGESTIONS,
        }
    }

    /// Apply batch size, fetch timeout, suggestion cap and default sort
    #[must_use]
    pub fn with_config(self, config: &DeskConfig) -> Self {
        let mut desk = self
            .with_batch_size(config.batch_size)
            .with_fetch_timeout(config.fetch_timeout())
            .with_max_suggestions(config.max_suggestions);
        if config.default_sort.is_some() && desk.state.sort().is_none() {
            desk.set_sort(config.default_sort);
        }
        desk
    }

    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        let total = self.results.len();
        self.pager = Pager::new(batch_size);
        self.pager.reset(total);
        self
    }

    #[must_use]
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.pipeline = self.pipeline.with_fetch_timeout(timeout);
        self
    }

    #[must_use]
    pub const fn with_max_suggestions(mut self, max: usize) -> Self {
        self.max_suggestions = max;
        self
    }

    #[must_use]
    pub fn handle(&self) -> DeskHandle {
        DeskHandle {
            signals: Arc::downgrade(&self.signals),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn filters(&self) -> &[Filter] {
        self.state.filters()
    }

    #[must_use]
    pub const fn sort(&self) -> Option<SortOption> {
        self.state.sort()
    }

    /// Whether a change is waiting for the next tick
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty || self.signals.corpus_changed.load(Ordering::SeqCst)
    }

    fn apply(&mut self, transition: impl FnOnce(SessionState) -> SessionState) {
        let state = std::mem::take(&mut self.state);
        self.state = transition(state);
        self.mark_dirty();
    }

    fn try_apply(
        &mut self,
        transition: impl FnOnce(SessionState) -> Result<SessionState>,
    ) -> Result<()> {
        self.state = transition(self.state.clone())?;
        self.mark_dirty();
        Ok(())
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
        self.signals.tracker.bump();
    }

    pub fn add_filter(&mut self, filter: Filter) {
        self.apply(|s| s.add_filter(filter));
    }

    /// # Errors
    /// Returns `SessionError::IndexOutOfRange` if there is no filter at `index`.
    pub fn remove_filter(&mut self, index: usize) -> Result<()> {
        self.try_apply(|s| s.remove_filter(index))
    }

    pub fn remove_last_filter(&mut self) {
        self.apply(SessionState::remove_last_filter);
    }

    pub fn set_filters(&mut self, filters: Vec<Filter>) {
        self.apply(|s| s.set_filters(filters));
    }

    pub fn reverse_filter(&mut self, filter: &Filter) {
        self.apply(|s| s.reverse_filter(filter));
    }

    pub fn set_sort(&mut self, sort: Option<SortOption>) {
        self.apply(|s| s.set_sort(sort));
    }

    pub fn toggle_sort_direction(&mut self) {
        self.apply(SessionState::toggle_sort_direction);
    }

    pub fn clear_sort(&mut self) {
        self.apply(SessionState::clear_sort);
    }

    /// Run the pipeline if anything changed since the last run
    ///
    /// A failed run leaves the previous results and pagination in place.
    ///
    /// # Errors
    /// Returns `SessionError::Search` if the run failed for any reason other
    /// than being superseded.
    pub fn tick(&mut self) -> Result<TickOutcome> {
        if self.signals.corpus_changed.swap(false, Ordering::SeqCst) {
            self.refresh_suggestions();
            self.dirty = true;
        }
        if !self.dirty {
            return Ok(TickOutcome::Idle);
        }

        let token = self.signals.tracker.token();
        let span = tracing::debug_span!("pipeline_run", version = token.version());
        let _guard = span.enter();

        match self
            .pipeline
            .run(self.state.filters(), self.state.sort(), &token)
        {
            Ok(_) if token.is_cancelled() => {
                tracing::debug!("run superseded after completion");
                Ok(TickOutcome::Superseded)
            }
            Ok(results) => {
                self.pager.reset(results.len());
                self.results = results;
                self.dirty = false;
                Ok(TickOutcome::Updated {
                    results: self.results.len(),
                })
            }
            Err(SearchError::Superseded) => {
                tracing::debug!("run superseded");
                Ok(TickOutcome::Superseded)
            }
            Err(e) => {
                tracing::warn!(error = %e, "run failed, keeping previous results");
                self.dirty = false;
                Err(SessionError::Search(e))
            }
        }
    }

    /// Results of the last successful run
    #[must_use]
    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    /// Revealed prefix of the results
    #[must_use]
    pub fn window(&self) -> &[SearchResult] {
        self.pager.window(&self.results)
    }

    #[must_use]
    pub const fn pager(&self) -> &Pager {
        &self.pager
    }

    /// Reveal the next batch; returns whether anything new appeared
    pub fn reveal_more(&mut self) -> bool {
        self.pager.reveal_more()
    }

    #[must_use]
    pub fn suggestions(&self) -> &[Filter] {
        self.state.suggestions()
    }

    /// Recollect suggestions from the corpus
    pub fn refresh_suggestions(&mut self) {
        let suggestions = suggest::collect_suggestions(&**self.pipeline.corpus());
        let state = std::mem::take(&mut self.state);
        self.state = state.with_suggestions(suggestions);
    }

    /// Suggestions matching `input`, hiding active filters
    #[must_use]
    pub fn narrowed_suggestions(&self, input: &str) -> Narrowed {
        suggest::narrow(
            self.state.suggestions(),
            input,
            self.state.filters(),
            self.max_suggestions,
        )
    }

    /// Set a link filter's `exists` flag from the corpus
    ///
    /// Other filters are returned unchanged.
    #[must_use]
    pub fn resolve_link(&self, filter: Filter) -> Filter {
        match filter.kind {
            FilterKind::Link { alias, .. } => {
                let exists = self.pipeline.corpus().document(&filter.value).is_some();
                Filter {
                    kind: FilterKind::Link { exists, alias },
                    ..filter
                }
            }
            _ => filter,
        }
    }

    /// Open a document if it exists; returns whether it was opened
    pub fn open<N: Navigator + ?Sized>(&self, path: &str, navigator: &N) -> bool {
        if self.pipeline.corpus().document(path).is_none() {
            tracing::debug!(path, "not opening unknown document");
            return false;
        }
        navigator.open(path);
        true
    }
}

#[cfg(test)]
#[path = "desk_tests.rs"]
mod desk_tests;
