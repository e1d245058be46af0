//! Search-and-highlight synchronization for paginated document viewers.
//!
//! Given per-page text fragments from the host's document parser, this
//! crate builds an ordered index of literal case-insensitive matches,
//! stores each match's geometry in intrinsic page coordinates, and
//! projects zoom-correct highlight rectangles on demand. Overlapping
//! searches are resolved by invocation token: only the most recently
//! requested search ever commits results.

pub mod builder;
pub mod cache;
pub mod cursor;
pub mod geometry;
pub mod highlight;
pub mod matcher;
pub mod request;
pub mod service;
pub mod source;
pub mod state;
pub mod types;
pub mod worker;
pub mod zoom;

pub mod test_utils;

pub use builder::collect_matches;
pub use cursor::ResultCursor;
pub use geometry::{to_display_rect, DisplayRect};
pub use highlight::{highlights_for_page, PageHighlight};
pub use matcher::extract_matches;
pub use request::{SearchEvent, SearchId};
pub use service::SearchService;
pub use source::{ExtractError, SearchError, TextSource};
pub use state::SearchState;
pub use types::{FragmentError, MatchRect, ResultSet, SearchMatch, TextFragment};
pub use zoom::Zoom;

/// Default number of search worker threads
pub const DEFAULT_WORKERS: usize = 2;

/// Default fragment cache capacity, in pages
pub const DEFAULT_FRAGMENT_CACHE_SIZE: usize = 64;
