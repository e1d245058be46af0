//! Search service: worker pool, supersession, and the owned state

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use flume::{Receiver, Sender};
use log::{debug, warn};

use crate::cache::FragmentCache;
use crate::highlight::PageHighlight;
use crate::request::{SearchEvent, SearchId, SearchRequest, SearchResponse};
use crate::source::TextSource;
use crate::state::SearchState;
use crate::types::{ResultSet, SearchMatch};
use crate::{DEFAULT_FRAGMENT_CACHE_SIZE, DEFAULT_WORKERS};

/// Manages document search with worker threads and a fragment cache.
///
/// One service owns the state for one loaded document at a time:
/// the committed result set, the cursor, and the zoom factor. Searches
/// run on worker threads; the host pumps `poll_events` from its event
/// loop. Only the most recently requested search can commit results;
/// anything slower is discarded when it eventually reports back.
pub struct SearchService {
    source: Arc<dyn TextSource>,
    state: SearchState,
    request_tx: Sender<SearchRequest>,
    response_rx: Receiver<SearchResponse>,
    /// Token of the latest issued search, shared with workers so a
    /// superseded invocation can stop between pages
    latest: Arc<AtomicU64>,
    next_search_id: u64,
    generation: u64,
    cache: Arc<Mutex<FragmentCache>>,
    num_workers: usize,
    in_flight: Option<SearchId>,
}

impl SearchService {
    /// Create a new service with default configuration
    #[must_use]
    pub fn new(source: Arc<dyn TextSource>) -> Self {
        Self::with_config(source, DEFAULT_WORKERS, DEFAULT_FRAGMENT_CACHE_SIZE)
    }

    /// Create a new service with custom worker count and cache capacity
    #[must_use]
    pub fn with_config(source: Arc<dyn TextSource>, num_workers: usize, cache_size: usize) -> Self {
        let cache = Arc::new(Mutex::new(FragmentCache::new(cache_size)));
        let latest = Arc::new(AtomicU64::new(0));

        // We use flume for MPMC (multi-producer, multi-consumer)
        // channels. std::sync::mpsc and tokio::sync::mpsc are MPSC
        // only - their Receiver cannot be cloned. Multiple workers
        // pulling from a shared request queue (fan-out) requires MPMC.
        let (request_tx, request_rx) = flume::unbounded();
        let (response_tx, response_rx) = flume::unbounded();

        for _ in 0..num_workers.max(1) {
            let rx = request_rx.clone();
            let tx = response_tx.clone();
            let latest_clone = Arc::clone(&latest);
            let cache_clone = Arc::clone(&cache);

            std::thread::spawn(move || {
                crate::worker::search_worker(rx, tx, latest_clone, cache_clone);
            });
        }

        Self {
            source,
            state: SearchState::new(),
            request_tx,
            response_rx,
            latest,
            next_search_id: 1,
            generation: 0,
            cache,
            num_workers: num_workers.max(1),
            in_flight: None,
        }
    }

    /// Start a new search, superseding any search still in flight.
    ///
    /// An empty query commits an empty result set immediately without
    /// touching the extraction source.
    pub fn request_search(&mut self, query: &str) -> SearchId {
        let id = self.next_id();
        self.latest.store(id.0, Ordering::Release);

        if query.is_empty() {
            self.in_flight = None;
            self.state.clear_results();
            return id;
        }

        let _ = self.request_tx.send(SearchRequest::Search {
            id,
            query: query.to_owned(),
            source: Arc::clone(&self.source),
            generation: self.generation,
        });
        self.in_flight = Some(id);
        id
    }

    /// Drain worker responses, committing only the latest invocation.
    ///
    /// Superseded and stale responses are dropped here; the host only
    /// ever observes the newest search's outcome.
    pub fn poll_events(&mut self) -> Vec<SearchEvent> {
        let mut events = Vec::new();

        while let Ok(response) = self.response_rx.try_recv() {
            match response {
                SearchResponse::Results { id, results } => {
                    if self.is_latest(id) {
                        self.in_flight = None;
                        let total = results.len();
                        self.state.commit_results(results);
                        events.push(SearchEvent::ResultsReady { id, total });
                    } else {
                        debug!("discarding stale search {id:?}");
                    }
                }

                SearchResponse::Superseded(id) => {
                    debug!("search {id:?} stopped early after supersession");
                }

                SearchResponse::Failed { id, error } => {
                    if self.is_latest(id) {
                        self.in_flight = None;
                        self.state.clear_results();
                        warn!("search {id:?} failed: {error}");
                        events.push(SearchEvent::SearchFailed { id, error });
                    } else {
                        debug!("discarding stale failure of search {id:?}");
                    }
                }
            }
        }

        events
    }

    /// Replace the loaded document.
    ///
    /// Supersedes any in-flight search, invalidates the fragment
    /// cache, and clears results, cursor, and zoom before the new
    /// document is used for anything.
    pub fn set_document(&mut self, source: Arc<dyn TextSource>) {
        self.generation += 1;

        // Claim a fresh token first so a racing worker can no longer
        // commit against the old document.
        let id = self.next_id();
        self.latest.store(id.0, Ordering::Release);
        self.in_flight = None;

        self.cache
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .invalidate_all();
        self.state.clear_for_new_document();
        self.source = source;

        debug!("document replaced, generation {}", self.generation);
    }

    /// Dismiss the current search: results and cursor are cleared,
    /// zoom is kept, and any in-flight search is superseded.
    pub fn clear_search(&mut self) {
        let id = self.next_id();
        self.latest.store(id.0, Ordering::Release);
        self.in_flight = None;
        self.state.clear_results();
    }

    /// Whether a search has been requested and not yet resolved
    #[must_use]
    pub fn is_search_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    /// The committed result set
    #[must_use]
    pub fn results(&self) -> &ResultSet {
        self.state.results()
    }

    /// The cursor's active match, if any
    #[must_use]
    pub fn active_match(&self) -> Option<&SearchMatch> {
        self.state.active_match()
    }

    /// 1-based position and total of the active match
    #[must_use]
    pub fn match_position(&self) -> Option<(usize, usize)> {
        self.state.cursor().position()
    }

    /// Advance to the next match, wrapping past the end
    pub fn next_match(&mut self) -> Option<&SearchMatch> {
        self.state.cursor_mut().next();
        self.state.active_match()
    }

    /// Step back to the previous match, wrapping past the start
    pub fn previous_match(&mut self) -> Option<&SearchMatch> {
        self.state.cursor_mut().previous();
        self.state.active_match()
    }

    /// Highlights for `page` at the current zoom factor.
    ///
    /// A page whose intrinsic height cannot be read gets no highlights;
    /// the host cannot position anything on it either.
    #[must_use]
    pub fn highlights_for_page(&self, page: usize) -> Vec<PageHighlight> {
        match self.source.page_height(page) {
            Ok(height) => self.state.highlights_for_page(page, height),
            Err(err) => {
                warn!("no page height for page {page}: {err}");
                Vec::new()
            }
        }
    }

    /// Zoom in one step, returning the new factor
    pub fn zoom_in(&mut self) -> f32 {
        let zoom = self.state.zoom_mut();
        zoom.step_in();
        zoom.factor()
    }

    /// Zoom out one step, returning the new factor
    pub fn zoom_out(&mut self) -> f32 {
        let zoom = self.state.zoom_mut();
        zoom.step_out();
        zoom.factor()
    }

    /// Set the zoom factor, clamped into range
    pub fn set_zoom(&mut self, factor: f32) -> f32 {
        let zoom = self.state.zoom_mut();
        zoom.set_factor(factor);
        zoom.factor()
    }

    /// Current zoom factor
    #[must_use]
    pub fn zoom_factor(&self) -> f32 {
        self.state.zoom().factor()
    }

    /// Borrow the owned search state
    #[must_use]
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Shutdown all workers
    pub fn shutdown(&self) {
        for _ in 0..self.num_workers {
            let _ = self.request_tx.send(SearchRequest::Shutdown);
        }
    }

    fn next_id(&mut self) -> SearchId {
        let id = SearchId::new(self.next_search_id);
        self.next_search_id += 1;
        id
    }

    fn is_latest(&self, id: SearchId) -> bool {
        self.latest.load(Ordering::Acquire) == id.0
    }
}
