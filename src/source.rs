//! Extraction collaborator boundary
//!
//! The engine never parses documents itself. The host opens a document
//! and hands the engine a `TextSource` for it; swapping documents means
//! swapping sources. Substituting a scripted source is also how the
//! engine is tested.

use crate::types::TextFragment;

/// Extraction failure reported by a `TextSource`
#[derive(Clone, Debug, thiserror::Error)]
pub enum ExtractError {
    /// One page could not be read; a search skips it
    #[error("page {page} extraction failed: {detail}")]
    PageUnreadable { page: usize, detail: String },

    /// The whole document is unreadable; a search fails
    #[error("document unreadable: {detail}")]
    DocumentUnreadable { detail: String },
}

/// Search-level failure surfaced to the caller.
///
/// Per-page failures never surface here; they are absorbed while the
/// search continues. An empty query is "no results", not an error.
#[derive(Clone, Debug, thiserror::Error)]
pub enum SearchError {
    #[error("document unreadable: {detail}")]
    DocumentUnreadable { detail: String },
}

/// Per-page text and geometry supplier for one loaded document.
///
/// Implementations wrap whatever the host uses to parse documents.
/// All returned coordinates are intrinsic: unscaled, bottom-left
/// origin. Pages are 1-indexed.
pub trait TextSource: Send + Sync {
    /// Number of pages in the document
    fn page_count(&self) -> usize;

    /// Intrinsic viewport height of `page`
    fn page_height(&self, page: usize) -> Result<f32, ExtractError>;

    /// Extract the text fragments of `page`
    fn text_fragments(&self, page: usize) -> Result<Vec<TextFragment>, ExtractError>;
}
