//! Per-page highlight projection

use crate::cursor::ResultCursor;
use crate::geometry::{to_display_rect, DisplayRect};
use crate::types::ResultSet;

/// One renderable highlight rectangle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageHighlight {
    /// Bounds in display coordinates at the requested scale
    pub rect: DisplayRect,
    /// Whether this is the cursor's active result
    pub is_active: bool,
}

/// Project the matches on `page` into display rectangles.
///
/// Read-only: consults the stored intrinsic geometry, the cursor, and
/// the supplied scale. Cost is proportional to the number of matches
/// on the requested page, cheap enough for every render or zoom tick.
#[must_use]
pub fn highlights_for_page(
    results: &ResultSet,
    cursor: &ResultCursor,
    page: usize,
    page_height: f32,
    scale: f32,
) -> Vec<PageHighlight> {
    let active = cursor.active_index();

    results
        .indices_on_page(page)
        .iter()
        .filter_map(|&idx| {
            results.get(idx).map(|m| PageHighlight {
                rect: to_display_rect(m.rect, page_height, scale),
                is_active: active == Some(idx),
            })
        })
        .collect()
}
