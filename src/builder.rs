//! Search index construction across the whole document

use log::{debug, warn};

use crate::matcher::extract_matches;
use crate::source::{ExtractError, SearchError, TextSource};
use crate::types::ResultSet;

/// Build the ordered result set for `query` against every page.
///
/// Pages are visited in ascending order and their matches concatenated
/// in page order, so the set is ordered by (page, extraction order). A
/// page that fails to extract contributes no matches and the search
/// continues; only a document-level failure aborts it. An empty query
/// returns an empty set without consulting the source.
pub fn collect_matches(source: &dyn TextSource, query: &str) -> Result<ResultSet, SearchError> {
    if query.is_empty() {
        return Ok(ResultSet::empty());
    }

    let page_count = source.page_count();
    let mut matches = Vec::new();

    for page in 1..=page_count {
        match source.text_fragments(page) {
            Ok(fragments) => {
                matches.extend(extract_matches(&fragments, query, page));
            }
            Err(ExtractError::PageUnreadable { detail, .. }) => {
                warn!("search skipping page {page}: {detail}");
            }
            Err(ExtractError::DocumentUnreadable { detail }) => {
                return Err(SearchError::DocumentUnreadable { detail });
            }
        }
    }

    debug!(
        "search for '{}' found {} matches across {} pages",
        query,
        matches.len(),
        page_count
    );
    Ok(ResultSet::new(matches))
}
