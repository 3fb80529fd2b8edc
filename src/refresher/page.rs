//! Rendered-page cache refresher.

use crate::error::DistributedCacheError;
use crate::store::{CacheClass, CacheKey, CacheStore};

use super::{CacheRefresher, PAGE_REFRESHER, RefresherId};

/// Evicts rendered pages by document id, or the whole page class at once.
pub struct PageCacheRefresher;

impl CacheRefresher for PageCacheRefresher {
    fn id(&self) -> RefresherId {
        PAGE_REFRESHER
    }

    fn name(&self) -> &'static str {
        "page"
    }

    fn apply_ids(&self, store: &dyn CacheStore, ids: &[i32]) -> Result<(), DistributedCacheError> {
        for id in ids {
            store.evict(&CacheKey::new(CacheClass::Page, *id));
        }
        Ok(())
    }

    fn apply_all(&self, store: &dyn CacheStore) -> Result<(), DistributedCacheError> {
        store.evict_class(CacheClass::Page);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{CacheEntry, InMemoryStore};

    #[test]
    fn apply_ids_evicts_only_named_pages() {
        let store = InMemoryStore::new();
        store.put(CacheKey::new(CacheClass::Page, 1), CacheEntry::new("a"));
        store.put(CacheKey::new(CacheClass::Page, 2), CacheEntry::new("b"));

        PageCacheRefresher.apply_ids(&store, &[1]).expect("apply");

        assert!(store.get(&CacheKey::new(CacheClass::Page, 1)).is_none());
        assert!(store.get(&CacheKey::new(CacheClass::Page, 2)).is_some());
    }

    #[test]
    fn apply_is_idempotent() {
        let store = InMemoryStore::new();
        store.put(CacheKey::new(CacheClass::Page, 1), CacheEntry::new("a"));

        PageCacheRefresher.apply_ids(&store, &[1]).expect("first");
        PageCacheRefresher.apply_ids(&store, &[1]).expect("second");

        assert_eq!(store.len(), 0);
    }

    #[test]
    fn apply_all_clears_the_page_class() {
        let store = InMemoryStore::new();
        store.put(CacheKey::new(CacheClass::Page, 1), CacheEntry::new("a"));
        store.put(CacheKey::new(CacheClass::Media, 1), CacheEntry::new("b"));

        PageCacheRefresher.apply_all(&store).expect("apply_all");

        assert!(store.get(&CacheKey::new(CacheClass::Page, 1)).is_none());
        assert!(store.get(&CacheKey::new(CacheClass::Media, 1)).is_some());
    }
}
