//! Unit tests for the session driver

#[cfg(test)]
mod tests {
    use crate::config::DeskConfig;
    use crate::corpus::{Corpus, CorpusError, CreatedCallback, DocumentHandle, LinkSuggestion};
    use crate::filter::{Filter, FilterType};
    use crate::search::{SearchError, SortKind, SortOption};
    use crate::session::desk::{Desk, DeskHandle, TickOutcome};
    use crate::session::error::SessionError;
    use crate::testing::{MockNavigator, sample_vault};
    use crate::vault::MemoryVault;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, OnceLock};

    fn desk() -> (Arc<MemoryVault>, Desk<MemoryVault, MemoryVault>) {
        let vault = Arc::new(sample_vault());
        let desk = Desk::new(Arc::clone(&vault), Arc::clone(&vault));
        (vault, desk)
    }

    fn paths<C: ?Sized, B: ?Sized>(desk: &Desk<C, B>) -> Vec<&str>
    where
        C: Corpus + 'static,
        B: crate::corpus::PageQuery,
    {
        desk.results().iter().map(|r| r.path.as_str()).collect()
    }

    #[test]
    fn test_first_tick_runs_empty_filter_set() {
        let (_, mut desk) = desk();
        assert!(desk.is_dirty());
        assert_eq!(desk.tick().unwrap(), TickOutcome::Updated { results: 5 });
        assert_eq!(paths(&desk)[0], "index.md");
        assert!(!desk.is_dirty());
        assert_eq!(desk.tick().unwrap(), TickOutcome::Idle);
    }

    #[test]
    fn test_mutations_coalesce_into_one_run() {
        let (_, mut desk) = desk();
        desk.add_filter(Filter::tag("#project"));
        desk.add_filter(Filter::folder("archive").negated());
        desk.set_sort(Some(SortOption::ascending(SortKind::Name)));

        assert_eq!(desk.tick().unwrap(), TickOutcome::Updated { results: 2 });
        assert_eq!(paths(&desk), vec!["alpha.md", "index.md"]);
        assert_eq!(desk.tick().unwrap(), TickOutcome::Idle);
    }

    #[test]
    fn test_reverse_filter_reruns() {
        let (_, mut desk) = desk();
        desk.add_filter(Filter::folder("notes"));
        desk.tick().unwrap();
        assert_eq!(paths(&desk), vec!["notes/beta.md", "notes/daily/today.md"]);

        desk.reverse_filter(&Filter::folder("notes"));
        desk.tick().unwrap();
        assert_eq!(paths(&desk), vec!["index.md", "alpha.md", "archive/old.md"]);
        assert!(desk.filters()[0].reversed);
    }

    #[test]
    fn test_pagination_resets_on_new_run() {
        let (_, desk) = desk();
        let mut desk = desk.with_batch_size(2);
        desk.tick().unwrap();
        assert_eq!(desk.window().len(), 2);

        assert!(desk.reveal_more());
        assert_eq!(desk.window().len(), 4);
        assert!(desk.reveal_more());
        assert_eq!(desk.window().len(), 5);
        assert!(!desk.reveal_more());

        desk.clear_sort();
        desk.tick().unwrap();
        assert_eq!(desk.pager().revealed(), 2);
    }

    #[test]
    fn test_failed_run_keeps_previous_results() {
        let (vault, mut desk) = desk();
        desk.tick().unwrap();
        desk.reveal_more();

        vault.set_backend_enabled(false);
        desk.add_filter(Filter::tag("#daily"));
        let err = desk.tick().unwrap_err();
        assert!(matches!(err, SessionError::Search(SearchError::BackendUnavailable)));

        assert_eq!(desk.results().len(), 5);
        assert!(!desk.is_dirty());
        assert_eq!(desk.tick().unwrap(), TickOutcome::Idle);

        vault.set_backend_enabled(true);
        desk.remove_last_filter();
        desk.add_filter(Filter::tag("#daily"));
        assert_eq!(desk.tick().unwrap(), TickOutcome::Updated { results: 1 });
    }

    #[test]
    fn test_remove_filter_out_of_range_leaves_state() {
        let (_, mut desk) = desk();
        desk.add_filter(Filter::tag("#a"));
        desk.tick().unwrap();

        let err = desk.remove_filter(3).unwrap_err();
        assert!(matches!(err, SessionError::IndexOutOfRange { index: 3, len: 1 }));
        assert_eq!(desk.filters().len(), 1);
        assert!(!desk.is_dirty());

        desk.remove_filter(0).unwrap();
        assert!(desk.filters().is_empty());
        assert!(desk.is_dirty());
    }

    #[test]
    fn test_created_document_refreshes_suggestions_and_results() {
        let (vault, mut desk) = desk();
        desk.tick().unwrap();
        assert!(!desk.suggestions().contains(&Filter::tag("#fresh")));

        vault.insert("inbox/new.md", "#fresh");
        assert!(desk.is_dirty());
        assert_eq!(desk.tick().unwrap(), TickOutcome::Updated { results: 6 });
        assert!(desk.suggestions().contains(&Filter::tag("#fresh")));
        assert!(desk.suggestions().contains(&Filter::folder("inbox")));
    }

    /// Sample corpus that reports a corpus change while the first body is read
    struct Interrupting {
        inner: MemoryVault,
        handle: OnceLock<DeskHandle>,
        fired: AtomicBool,
    }

    impl Corpus for Interrupting {
        fn tags(&self) -> BTreeMap<String, usize> {
            self.inner.tags()
        }

        fn link_suggestions(&self) -> Vec<LinkSuggestion> {
            self.inner.link_suggestions()
        }

        fn folders(&self) -> Vec<String> {
            self.inner.folders()
        }

        fn documents(&self) -> Vec<String> {
            self.inner.documents()
        }

        fn document(&self, path: &str) -> Option<DocumentHandle> {
            self.inner.document(path)
        }

        fn read_document(&self, path: &str) -> Result<String, CorpusError> {
            if !self.fired.swap(true, Ordering::SeqCst) {
                if let Some(handle) = self.handle.get() {
                    handle.notify_corpus_changed();
                }
            }
            self.inner.read_document(path)
        }

        fn subscribe_created(&self, callback: CreatedCallback) {
            self.inner.subscribe_created(callback);
        }
    }

    #[test]
    fn test_run_overtaken_by_corpus_change_is_retried() {
        let corpus = Arc::new(Interrupting {
            inner: sample_vault(),
            handle: OnceLock::new(),
            fired: AtomicBool::new(false),
        });
        let mut desk = Desk::new(Arc::clone(&corpus), Arc::new(sample_vault()));
        corpus.handle.set(desk.handle()).unwrap();

        desk.add_filter(Filter::text("needle"));
        assert_eq!(desk.tick().unwrap(), TickOutcome::Superseded);
        assert!(desk.results().is_empty());
        assert!(desk.is_dirty());

        assert_eq!(desk.tick().unwrap(), TickOutcome::Updated { results: 1 });
        assert_eq!(paths(&desk), vec!["alpha.md"]);
    }

    #[test]
    fn test_handle_outlived_by_nothing() {
        let (_, desk) = desk();
        let handle = desk.handle();
        assert!(handle.notify_corpus_changed());
        drop(desk);
        assert!(!handle.notify_corpus_changed());
    }

    #[test]
    fn test_dropped_desks_unsubscribe_on_next_event() {
        let vault = Arc::new(sample_vault());
        let mut live = Desk::new(Arc::clone(&vault), Arc::clone(&vault));
        live.tick().unwrap();
        assert!(!live.is_dirty());
        for _ in 0..3 {
            drop(Desk::new(Arc::clone(&vault), Arc::clone(&vault)));
        }
        assert_eq!(vault.subscriber_count(), 4);

        vault.insert("inbox/new.md", "#fresh");
        assert_eq!(vault.subscriber_count(), 1);
        assert!(live.is_dirty());
    }

    #[test]
    fn test_narrowed_suggestions_hide_active_filters() {
        let (_, mut desk) = desk();
        desk.add_filter(Filter::tag("#project"));

        let narrowed = desk.narrowed_suggestions("proj");
        assert_eq!(narrowed.filters[0], Filter::text("proj"));
        assert!(!narrowed.filters.contains(&Filter::tag("#project")));
        assert!(narrowed.filters.contains(&Filter::tag("#project/sub")));
        assert!(!narrowed.truncated);
    }

    #[test]
    fn test_narrowed_suggestions_respect_cap() {
        let (_, desk) = desk();
        let desk = desk.with_max_suggestions(3);
        let narrowed = desk.narrowed_suggestions("");
        assert_eq!(narrowed.filters.len(), 3);
        assert!(narrowed.truncated);
    }

    #[test]
    fn test_suggestions_cover_every_kind_but_text() {
        let (_, desk) = desk();
        for kind in [FilterType::Tag, FilterType::Folder, FilterType::Link, FilterType::Backlink] {
            assert!(desk.suggestions().iter().any(|f| f.filter_type() == kind));
        }
    }

    #[test]
    fn test_resolve_link() {
        let (_, desk) = desk();
        let resolved = desk.resolve_link("link:alpha.md".parse().unwrap());
        assert_eq!(resolved, Filter::link("alpha.md", true));

        let missing = desk.resolve_link("!link:ghost|Boo".parse().unwrap());
        assert_eq!(missing, Filter::link_with_alias("ghost", false, "Boo").negated());

        let tag = desk.resolve_link(Filter::tag("#a"));
        assert_eq!(tag, Filter::tag("#a"));
    }

    #[test]
    fn test_open_only_existing_documents() {
        let (_, desk) = desk();
        let navigator = MockNavigator::default();

        assert!(desk.open("notes/beta.md", &navigator));
        assert!(!desk.open("ghost.md", &navigator));
        assert_eq!(navigator.opened(), vec!["notes/beta.md"]);
    }

    #[test]
    fn test_with_config() {
        let (_, desk) = desk();
        let config = DeskConfig {
            batch_size: 1,
            max_suggestions: 2,
            default_sort: Some(SortOption::new(SortKind::Size, true)),
            ..DeskConfig::default()
        };
        let mut desk = desk.with_config(&config);
        desk.tick().unwrap();

        assert_eq!(desk.sort(), Some(SortOption::new(SortKind::Size, true)));
        assert_eq!(desk.window().len(), 1);
        assert_eq!(desk.narrowed_suggestions("").filters.len(), 2);
        assert!(desk.results().windows(2).all(|w| w[0].size >= w[1].size));
    }

    #[test]
    fn test_toggle_sort_direction() {
        let (_, mut desk) = desk();
        desk.set_sort(Some(SortOption::ascending(SortKind::ModifiedDate)));
        desk.toggle_sort_direction();
        desk.tick().unwrap();
        assert_eq!(paths(&desk)[0], "archive/old.md");
    }
}
