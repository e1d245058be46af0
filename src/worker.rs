//! Search worker, runs in dedicated thread(s)

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use flume::{Receiver, Sender};
use log::{debug, warn};

use crate::cache::{CacheKey, FragmentCache};
use crate::matcher::extract_matches;
use crate::request::{SearchId, SearchRequest, SearchResponse};
use crate::source::{ExtractError, SearchError, TextSource};
use crate::types::{ResultSet, SearchMatch, TextFragment};

/// Main worker loop. Pulls requests from the shared queue until
/// shutdown. One request is handled start to finish by one worker, so
/// pages within an invocation are always visited in ascending order.
pub fn search_worker(
    requests: Receiver<SearchRequest>,
    responses: Sender<SearchResponse>,
    latest: Arc<AtomicU64>,
    cache: Arc<Mutex<FragmentCache>>,
) {
    for request in requests {
        match request {
            SearchRequest::Search {
                id,
                query,
                source,
                generation,
            } => {
                let response =
                    run_search(id, &query, source.as_ref(), generation, &latest, &cache);
                let _ = responses.send(response);
            }

            SearchRequest::Shutdown => break,
        }
    }
}

/// Run one search invocation, page by page in ascending order.
///
/// Between pages the worker compares its token against the latest
/// issued one and stops once superseded; a stale result set is never
/// sent back as results.
fn run_search(
    id: SearchId,
    query: &str,
    source: &dyn TextSource,
    generation: u64,
    latest: &AtomicU64,
    cache: &Mutex<FragmentCache>,
) -> SearchResponse {
    let page_count = source.page_count();
    let mut matches: Vec<SearchMatch> = Vec::new();

    for page in 1..=page_count {
        if latest.load(Ordering::Acquire) != id.0 {
            debug!("search {id:?} superseded at page {page}, stopping");
            return SearchResponse::Superseded(id);
        }

        match page_fragments(source, page, generation, cache) {
            Ok(fragments) => {
                matches.extend(extract_matches(&fragments, query, page));
            }
            Err(ExtractError::PageUnreadable { detail, .. }) => {
                warn!("search {id:?} skipping page {page}: {detail}");
            }
            Err(ExtractError::DocumentUnreadable { detail }) => {
                return SearchResponse::Failed {
                    id,
                    error: SearchError::DocumentUnreadable { detail },
                };
            }
        }
    }

    debug!(
        "search {:?} found {} matches across {} pages",
        id,
        matches.len(),
        page_count
    );
    SearchResponse::Results {
        id,
        results: ResultSet::new(matches),
    }
}

/// Fetch a page's fragments through the shared cache
fn page_fragments(
    source: &dyn TextSource,
    page: usize,
    generation: u64,
    cache: &Mutex<FragmentCache>,
) -> Result<Arc<Vec<TextFragment>>, ExtractError> {
    let key = CacheKey::new(generation, page);

    let cached = cache
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .get(&key);
    if let Some(fragments) = cached {
        return Ok(fragments);
    }

    let fragments = source.text_fragments(page)?;
    Ok(cache
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .insert(key, fragments))
}
