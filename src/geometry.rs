//! Coordinate transform from intrinsic page space to display space
//!
//! Intrinsic rects have a bottom-left origin and no zoom applied;
//! display rects have a top-left origin and are scaled by the current
//! zoom factor. Matches are stored intrinsically and projected per
//! render, so any zoom level can be served without re-extracting text.

use crate::types::MatchRect;

/// Rectangle in display coordinates (top-left origin, zoom applied)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayRect {
    pub top: f32,
    pub left: f32,
    pub width: f32,
    pub height: f32,
}

/// Project an intrinsic rect onto a page rendered at `scale`.
///
/// `page_height` is the page's intrinsic viewport height; the Y axis
/// flips from bottom-left to top-left origin here.
#[must_use]
pub fn to_display_rect(rect: MatchRect, page_height: f32, scale: f32) -> DisplayRect {
    DisplayRect {
        top: (page_height - rect.y - rect.height) * scale,
        left: rect.x * scale,
        width: rect.width * scale,
        height: rect.height * scale,
    }
}
