//! Search request, response, and event types

use std::sync::Arc;

use crate::source::{SearchError, TextSource};
use crate::types::ResultSet;

/// Invocation token for one search; strictly increasing per service
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SearchId(pub u64);

impl SearchId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

/// Request sent to search workers
pub enum SearchRequest {
    /// Run a full-document search
    Search {
        id: SearchId,
        query: String,
        source: Arc<dyn TextSource>,
        /// Document generation the request was issued under
        generation: u64,
    },

    /// Shutdown the worker
    Shutdown,
}

impl std::fmt::Debug for SearchRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Search {
                id,
                query,
                generation,
                ..
            } => f
                .debug_struct("Search")
                .field("id", id)
                .field("query", query)
                .field("generation", generation)
                .finish_non_exhaustive(),
            Self::Shutdown => write!(f, "Shutdown"),
        }
    }
}

/// Response from search workers
#[derive(Debug)]
pub enum SearchResponse {
    /// Completed result set for one invocation
    Results { id: SearchId, results: ResultSet },

    /// The invocation noticed it was superseded and stopped early
    Superseded(SearchId),

    /// The invocation failed at the document level
    Failed { id: SearchId, error: SearchError },
}

/// Host-facing events produced when responses are committed
#[derive(Clone, Debug)]
pub enum SearchEvent {
    /// A new result set was committed and the cursor reset
    ResultsReady { id: SearchId, total: usize },

    /// The current search failed; results were cleared
    SearchFailed { id: SearchId, error: SearchError },
}
