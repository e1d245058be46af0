//! LRU cache of extracted page fragments

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;

use crate::types::TextFragment;

/// Cache key: document generation plus page number.
///
/// The generation is bumped on every document replacement, so entries
/// written by a search that outlived a swap can never be read back for
/// the new document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Document generation the entry was extracted under
    pub generation: u64,
    /// Page number (1-indexed)
    pub page: usize,
}

impl CacheKey {
    #[must_use]
    pub const fn new(generation: u64, page: usize) -> Self {
        Self { generation, page }
    }
}

/// LRU cache for per-page extraction results
pub struct FragmentCache {
    cache: LruCache<CacheKey, Arc<Vec<TextFragment>>>,
}

impl FragmentCache {
    /// Create a new cache with the given capacity
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: LruCache::new(
                NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::new(1).expect("1 is non-zero")),
            ),
        }
    }

    /// Get a cached page, promoting it in the LRU order
    #[must_use]
    pub fn get(&mut self, key: &CacheKey) -> Option<Arc<Vec<TextFragment>>> {
        self.cache.get(key).cloned()
    }

    /// Check if a key is in the cache without promoting it
    #[must_use]
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.cache.contains(key)
    }

    /// Insert a page's fragments, returning an Arc to the stored data
    pub fn insert(&mut self, key: CacheKey, fragments: Vec<TextFragment>) -> Arc<Vec<TextFragment>> {
        let arc = Arc::new(fragments);
        self.cache.put(key, arc.clone());
        arc
    }

    /// Clear all cached pages
    pub fn invalidate_all(&mut self) {
        self.cache.clear();
    }

    /// Number of cached pages
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Check if cache is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Cache capacity
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.cache.cap().get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fragment;

    fn page_fragments(page: usize) -> Vec<TextFragment> {
        vec![fragment("sample", page, 0.0, 0.0, 40.0, 12.0)]
    }

    #[test]
    fn cache_insert_and_get() {
        let mut cache = FragmentCache::new(10);
        let key = CacheKey::new(0, 1);

        cache.insert(key, page_fragments(1));

        assert!(cache.contains(&key));
        assert!(cache.get(&key).is_some());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn cache_lru_eviction() {
        let mut cache = FragmentCache::new(2);

        for page in 1..=3 {
            cache.insert(CacheKey::new(0, page), page_fragments(page));
        }

        assert_eq!(cache.len(), 2);
        assert!(!cache.contains(&CacheKey::new(0, 1)));
        assert!(cache.contains(&CacheKey::new(0, 2)));
        assert!(cache.contains(&CacheKey::new(0, 3)));
    }

    #[test]
    fn cache_invalidate_all() {
        let mut cache = FragmentCache::new(10);

        for page in 1..=5 {
            cache.insert(CacheKey::new(0, page), page_fragments(page));
        }

        assert_eq!(cache.len(), 5);
        cache.invalidate_all();
        assert!(cache.is_empty());
    }

    #[test]
    fn generations_keep_documents_apart() {
        let mut cache = FragmentCache::new(10);

        cache.insert(CacheKey::new(0, 1), page_fragments(1));

        assert!(cache.contains(&CacheKey::new(0, 1)));
        assert!(!cache.contains(&CacheKey::new(1, 1)));
    }
}
