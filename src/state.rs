//! Owned search state: results, cursor, and zoom in one place
//!
//! One mutable owner holds the document-scoped state; the projector
//! and other read paths only ever borrow it.

use crate::cursor::ResultCursor;
use crate::highlight::{highlights_for_page, PageHighlight};
use crate::types::{ResultSet, SearchMatch};
use crate::zoom::Zoom;

/// The engine's mutable state for one loaded document
#[derive(Clone, Debug, Default)]
pub struct SearchState {
    results: ResultSet,
    cursor: ResultCursor,
    zoom: Zoom,
}

impl SearchState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the result set wholesale and re-point the cursor
    pub fn commit_results(&mut self, results: ResultSet) {
        self.cursor.reset(results.len());
        self.results = results;
    }

    /// Drop results and cursor, keeping zoom
    pub fn clear_results(&mut self) {
        self.commit_results(ResultSet::empty());
    }

    /// Full reset for a document replacement
    pub fn clear_for_new_document(&mut self) {
        self.clear_results();
        self.zoom = Zoom::default();
    }

    #[must_use]
    pub fn results(&self) -> &ResultSet {
        &self.results
    }

    #[must_use]
    pub fn cursor(&self) -> &ResultCursor {
        &self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut ResultCursor {
        &mut self.cursor
    }

    #[must_use]
    pub fn zoom(&self) -> &Zoom {
        &self.zoom
    }

    pub fn zoom_mut(&mut self) -> &mut Zoom {
        &mut self.zoom
    }

    /// The cursor's active match, if any
    #[must_use]
    pub fn active_match(&self) -> Option<&SearchMatch> {
        self.cursor.active(&self.results)
    }

    /// Highlights for `page` at the current zoom factor
    #[must_use]
    pub fn highlights_for_page(&self, page: usize, page_height: f32) -> Vec<PageHighlight> {
        highlights_for_page(
            &self.results,
            &self.cursor,
            page,
            page_height,
            self.zoom.factor(),
        )
    }
}
