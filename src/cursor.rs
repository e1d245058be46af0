//! Active-result navigation with wraparound

use crate::types::{ResultSet, SearchMatch};

/// Pointer into the ordered result list.
///
/// `None` means no active result. After a reset against a non-empty
/// set the cursor always points at a valid index; `next`/`previous`
/// wrap modulo the result count and are no-ops when there are no
/// results, including before the first reset.
#[derive(Clone, Debug, Default)]
pub struct ResultCursor {
    current: Option<usize>,
    count: usize,
}

impl ResultCursor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-point the cursor at a freshly committed result set
    pub fn reset(&mut self, result_count: usize) {
        self.count = result_count;
        self.current = if result_count > 0 { Some(0) } else { None };
    }

    /// Step to the next result, wrapping past the end
    pub fn next(&mut self) {
        if let Some(idx) = self.current {
            self.current = Some((idx + 1) % self.count);
        }
    }

    /// Step to the previous result, wrapping past the start
    pub fn previous(&mut self) {
        if let Some(idx) = self.current {
            self.current = Some((idx + self.count - 1) % self.count);
        }
    }

    /// Index of the active result in the full ordered set
    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        self.current
    }

    /// Resolve the active match against `results`
    #[must_use]
    pub fn active<'a>(&self, results: &'a ResultSet) -> Option<&'a SearchMatch> {
        self.current.and_then(|idx| results.get(idx))
    }

    /// 1-based position and total, for "result N of M" display
    #[must_use]
    pub fn position(&self) -> Option<(usize, usize)> {
        self.current.map(|idx| (idx + 1, self.count))
    }
}
