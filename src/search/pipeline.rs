//! Result pipeline
//!
//! One run goes: compile backend-expressible filters, query the backend,
//! fetch bodies for local text matching, map to [`SearchResult`], sort.
//!
//! Body fetches fan out across the rayon pool, one job per candidate, and
//! are joined before anything is mapped. Any failed or stalled fetch fails
//! the run. A run notices a newer version through its
//! [`CancellationToken`] between stages and while joining, and bails out
//! with [`SearchError::Superseded`].

use super::cancel::CancellationToken;
use super::error::SearchError;
use super::result::SearchResult;
use super::sort::{SortOption, sort_results};
use super::text::{TextMatcher, matches_all};
use crate::corpus::{Corpus, CorpusError, PageQuery, PageRecord};
use crate::filter::Filter;
use crate::query::compile;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default time allowed between two completed body fetches
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

type FetchOutcome = (usize, Result<bool, CorpusError>);

/// Runs filter sets against a corpus and page-query backend
pub struct Pipeline<C: ?Sized, B: ?Sized> {
    corpus: Arc<C>,
    backend: Arc<B>,
    fetch_timeout: Duration,
}

impl<C: ?Sized, B: ?Sized> Clone for Pipeline<C, B> {
    fn clone(&self) -> Self {
        Self {
            corpus: Arc::clone(&self.corpus),
            backend: Arc::clone(&self.backend),
            fetch_timeout: self.fetch_timeout,
        }
    }
}

impl<C, B> Pipeline<C, B>
where
    C: Corpus + ?Sized + 'static,
    B: PageQuery + ?Sized,
{
    #[must_use]
    pub fn new(corpus: Arc<C>, backend: Arc<B>) -> Self {
        Self {
            corpus,
            backend,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    #[must_use]
    pub const fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    #[must_use]
    pub fn corpus(&self) -> &Arc<C> {
        &self.corpus
    }

    /// Run the filters and return sorted results
    ///
    /// # Errors
    /// - `BackendUnavailable` if the backend is disabled
    /// - `Backend` if the backend rejects or fails the query
    /// - `DocumentFetch` if any candidate body cannot be read in time
    /// - `Superseded` if `token` is cancelled before the run finishes
    pub fn run(
        &self,
        filters: &[Filter],
        sort: Option<SortOption>,
        token: &CancellationToken,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let started = Instant::now();
        let matchers: Vec<TextMatcher> = filters.iter().filter_map(TextMatcher::new).collect();
        let query = compile(filters)?;

        if !self.backend.is_available() {
            return Err(SearchError::BackendUnavailable);
        }
        ensure_current(token)?;

        let records = self.backend.run_query(&query).map_err(SearchError::Backend)?;
        let candidates = records.len();
        ensure_current(token)?;

        let records = if matchers.is_empty() {
            records
        } else {
            self.match_text(records, matchers, token)?
        };
        ensure_current(token)?;

        let mut results: Vec<SearchResult> = records.into_iter().map(SearchResult::from).collect();
        sort_results(&mut results, sort);

        tracing::debug!(
            query = %query,
            candidates,
            results = results.len(),
            elapsed_ms = started.elapsed().as_millis(),
            "pipeline run complete"
        );
        Ok(results)
    }

    /// Keep records whose bodies pass every matcher
    fn match_text(
        &self,
        records: Vec<PageRecord>,
        matchers: Vec<TextMatcher>,
        token: &CancellationToken,
    ) -> Result<Vec<PageRecord>, SearchError> {
        let matchers: Arc<[TextMatcher]> = matchers.into();
        let (tx, rx) = mpsc::channel::<FetchOutcome>();

        for (index, record) in records.iter().enumerate() {
            let corpus = Arc::clone(&self.corpus);
            let matchers = Arc::clone(&matchers);
            let token = token.clone();
            let tx = tx.clone();
            let path = record.path.clone();

            rayon::spawn(move || {
                let outcome = if token.is_cancelled() {
                    Ok(false)
                } else {
                    corpus
                        .read_document(&path)
                        .map(|body| matches_all(&body, &matchers))
                };
                // Receiver is gone once the run has failed or been superseded
                let _ = tx.send((index, outcome));
            });
        }
        drop(tx);

        let mut keep: Vec<Option<bool>> = vec![None; records.len()];
        for _ in 0..records.len() {
            let received = rx.recv_timeout(self.fetch_timeout);
            ensure_current(token)?;

            match received {
                Ok((index, Ok(passed))) => keep[index] = Some(passed),
                Ok((index, Err(source))) => {
                    return Err(SearchError::DocumentFetch {
                        path: records[index].path.clone(),
                        source,
                    });
                }
                Err(RecvTimeoutError::Timeout) => {
                    let path = first_pending(&records, &keep);
                    tracing::warn!(path = %path, "document fetch timed out");
                    return Err(SearchError::DocumentFetch {
                        source: CorpusError::Timeout {
                            path: path.clone(),
                            timeout: self.fetch_timeout,
                        },
                        path,
                    });
                }
                Err(RecvTimeoutError::Disconnected) => {
                    let path = first_pending(&records, &keep);
                    return Err(SearchError::DocumentFetch {
                        source: CorpusError::Interrupted(path.clone()),
                        path,
                    });
                }
            }
        }

        Ok(records
            .into_iter()
            .zip(keep)
            .filter_map(|(record, passed)| passed.unwrap_or(false).then_some(record))
            .collect())
    }
}

fn ensure_current(token: &CancellationToken) -> Result<(), SearchError> {
    if token.is_cancelled() {
        Err(SearchError::Superseded)
    } else {
        Ok(())
    }
}

fn first_pending(records: &[PageRecord], keep: &[Option<bool>]) -> String {
    keep.iter()
        .position(Option::is_none)
        .map(|i| records[i].path.clone())
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod pipeline_tests;
