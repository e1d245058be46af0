//! Core value types for search results and their geometry

use std::collections::HashMap;

/// One extracted run of text on a page.
///
/// Coordinates are intrinsic: the page's native space with the origin
/// at the bottom-left, independent of any display zoom. Fragments are
/// produced by the host's extraction collaborator and are only valid
/// for the duration of one extraction pass.
#[derive(Clone, Debug)]
pub struct TextFragment {
    /// Raw text of the fragment
    pub text: String,
    /// Page the fragment belongs to (1-indexed)
    pub page_number: usize,
    /// Left edge X in intrinsic units
    pub origin_x: f32,
    /// Bottom edge Y in intrinsic units
    pub origin_y: f32,
    /// Width in intrinsic units
    pub width: f32,
    /// Height in intrinsic units
    pub height: f32,
}

/// Why a fragment was rejected during match extraction
#[derive(Clone, Debug, thiserror::Error)]
pub enum FragmentError {
    #[error("non-finite geometry ({x}, {y}, {width}x{height})")]
    NonFiniteGeometry {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },

    #[error("negative dimensions {width}x{height}")]
    NegativeDimensions { width: f32, height: f32 },

    #[error("page number 0, pages are 1-indexed")]
    ZeroPageNumber,

    #[error("attributed to page {actual}, extracted from page {expected}")]
    PageMismatch { actual: usize, expected: usize },
}

impl TextFragment {
    /// Check that the fragment carries usable geometry for `page`
    pub fn validate(&self, page: usize) -> Result<(), FragmentError> {
        if !(self.origin_x.is_finite()
            && self.origin_y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite())
        {
            return Err(FragmentError::NonFiniteGeometry {
                x: self.origin_x,
                y: self.origin_y,
                width: self.width,
                height: self.height,
            });
        }

        if self.width < 0.0 || self.height < 0.0 {
            return Err(FragmentError::NegativeDimensions {
                width: self.width,
                height: self.height,
            });
        }

        if self.page_number == 0 {
            return Err(FragmentError::ZeroPageNumber);
        }

        if self.page_number != page {
            return Err(FragmentError::PageMismatch {
                actual: self.page_number,
                expected: page,
            });
        }

        Ok(())
    }
}

/// Axis-aligned rectangle in intrinsic page coordinates (bottom-left origin)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// One located occurrence of a query
#[derive(Clone, Debug)]
pub struct SearchMatch {
    /// Page the match is on (1-indexed)
    pub page_number: usize,
    /// Raw text of the matched fragment, for snippet display
    pub text: String,
    /// Match bounds in intrinsic page coordinates
    pub rect: MatchRect,
}

/// Ordered outcome of one search invocation.
///
/// Matches are ordered by ascending page number, then by extraction
/// order within a page. A committed set is replaced wholesale by the
/// next search, never mutated in place.
#[derive(Clone, Debug, Default)]
pub struct ResultSet {
    matches: Vec<SearchMatch>,
    /// Page number to indices into `matches`, so per-page lookups cost
    /// only the matches on that page
    by_page: HashMap<usize, Vec<usize>>,
}

impl ResultSet {
    #[must_use]
    pub fn new(matches: Vec<SearchMatch>) -> Self {
        let mut by_page: HashMap<usize, Vec<usize>> = HashMap::new();
        for (idx, m) in matches.iter().enumerate() {
            by_page.entry(m.page_number).or_default().push(idx);
        }
        Self { matches, by_page }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&SearchMatch> {
        self.matches.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SearchMatch> {
        self.matches.iter()
    }

    /// Indices into the full ordered set of the matches on `page`
    #[must_use]
    pub fn indices_on_page(&self, page: usize) -> &[usize] {
        self.by_page.get(&page).map(Vec::as_slice).unwrap_or(&[])
    }
}
