//! Literal substring matching over one page's text fragments

use log::warn;

use crate::types::{MatchRect, SearchMatch, TextFragment};

/// Find matches for `query` among the fragments extracted from `page`.
///
/// Matching is case-insensitive literal containment. A fragment yields
/// at most one match covering the fragment's own bounds; multiple
/// occurrences inside one fragment are not separately localized.
/// Output order follows fragment order. An empty query matches
/// nothing. Malformed fragments are skipped and the rest of the page
/// still matches.
#[must_use]
pub fn extract_matches(fragments: &[TextFragment], query: &str, page: usize) -> Vec<SearchMatch> {
    if query.is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    let mut matches = Vec::new();

    for fragment in fragments {
        if let Err(err) = fragment.validate(page) {
            warn!("skipping fragment on page {page}: {err}");
            continue;
        }

        if fragment.text.to_lowercase().contains(&needle) {
            matches.push(SearchMatch {
                page_number: page,
                text: fragment.text.clone(),
                rect: MatchRect {
                    x: fragment.origin_x,
                    y: fragment.origin_y,
                    width: fragment.width,
                    height: fragment.height,
                },
            });
        }
    }

    matches
}
